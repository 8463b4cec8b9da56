//! Buffer-import backend interface
//!
//! The compositor picks one backend per process and drives it from its
//! `wl_surface` handlers. Each backend owns whatever per-display state it
//! needs; the compositor holds the backend and passes it where needed.

use hybris_wlegl::BufferResource;

use crate::surface::Surface;

/// Which buffer path a backend implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImplementationType {
    /// Client buffers imported as EGL images
    Egl,
    /// Client buffers exported as dma-buf pool entries
    DmabufPool,
}

/// Dma-buf pool entry handed to the renderer for a surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmabufPoolEntry {
    pub fds: Vec<i32>,
    pub width: u32,
    pub height: u32,
    pub format: u32,
}

pub trait Backend {
    fn impl_type(&self) -> ImplementationType;

    fn initialized(&self) -> bool;

    /// `wl_surface.attach`; `None` detaches.
    fn surface_attach(&mut self, surface: &mut Surface, resource: Option<BufferResource>);

    /// `wl_surface.commit`
    fn surface_commit(&mut self, surface: &mut Surface);

    fn create_dmabuf_pool_entry(&mut self, surface: &mut Surface) -> Option<DmabufPoolEntry>;
}
