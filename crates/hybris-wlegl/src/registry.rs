//! Ownership set of imported hybris buffers

use std::collections::HashMap;

use tracing::debug;

use crate::buffer::{BufferResource, HybrisBuffer};
use crate::host::{WaylandHost, WleglGlobal};

/// Owns every hybris buffer imported for the active display, keyed by the
/// client resource handle, together with the `android_wlegl` global.
#[derive(Debug)]
pub struct BufferRegistry {
    global: WleglGlobal,
    buffers: HashMap<BufferResource, HybrisBuffer>,
}

impl BufferRegistry {
    /// Create the registry and advertise its global on `host`.
    pub fn create<H: WaylandHost + ?Sized>(host: &mut H) -> Self {
        let global = host.create_wlegl_global();
        debug!("Created android_wlegl global {}", global.name());
        Self {
            global,
            buffers: HashMap::new(),
        }
    }

    pub fn global(&self) -> WleglGlobal {
        self.global
    }

    /// Take ownership of `buffer`.
    ///
    /// Resource handles are unique; inserting a handle that is already
    /// registered replaces the old record and hands it back.
    pub fn insert(&mut self, buffer: HybrisBuffer) -> Option<HybrisBuffer> {
        let previous = self.buffers.insert(buffer.resource, buffer);
        debug!(
            "Registered hybris buffer {} ({}x{}), {} live",
            buffer.resource.id(),
            buffer.buf.width,
            buffer.buf.height,
            self.buffers.len()
        );
        previous
    }

    pub fn get(&self, resource: BufferResource) -> Option<&HybrisBuffer> {
        self.buffers.get(&resource)
    }

    pub fn contains(&self, resource: BufferResource) -> bool {
        self.buffers.contains_key(&resource)
    }

    /// Give up ownership of a buffer without destroying it.
    pub fn remove(&mut self, resource: BufferResource) -> Option<HybrisBuffer> {
        self.buffers.remove(&resource)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Destroy every remaining buffer, then the global.
    ///
    /// Each record is visited exactly once, in no particular order. Returns
    /// the number of buffers destroyed.
    pub fn teardown<H: WaylandHost + ?Sized>(mut self, host: &mut H) -> usize {
        let mut destroyed = 0;
        for (_, buffer) in self.buffers.drain() {
            host.destroy_buffer(buffer);
            destroyed += 1;
        }
        host.destroy_wlegl_global(self.global);
        debug!(
            "Destroyed android_wlegl global {} and {} buffer(s)",
            self.global.name(),
            destroyed
        );
        destroyed
    }
}
