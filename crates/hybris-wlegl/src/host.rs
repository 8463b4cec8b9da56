use crate::buffer::{BufferResource, HybrisBuffer};

/// Handle to the `android_wlegl` global advertised on the Wayland display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WleglGlobal(u32);

impl WleglGlobal {
    pub const fn new(name: u32) -> Self {
        Self(name)
    }

    pub const fn name(self) -> u32 {
        self.0
    }
}

/// Services the Wayland server provides to the hybris backend
///
/// Everything here runs on the compositor thread, inside the call that
/// triggered it.
pub trait WaylandHost {
    /// Resolve a client `wl_buffer` to the hybris buffer it wraps.
    ///
    /// Returns `None` for resources that are not hybris buffers or that the
    /// host no longer knows about.
    fn hybris_buffer(&self, resource: BufferResource) -> Option<HybrisBuffer>;

    /// Send `wl_buffer.release` for `resource`.
    fn send_release(&mut self, resource: BufferResource);

    /// Advertise the `android_wlegl` global.
    fn create_wlegl_global(&mut self) -> WleglGlobal;

    /// Withdraw a global created by [`create_wlegl_global`](Self::create_wlegl_global).
    fn destroy_wlegl_global(&mut self, global: WleglGlobal);

    /// Destroy the resource linkage of a buffer the backend owned.
    fn destroy_buffer(&mut self, buffer: HybrisBuffer);
}
