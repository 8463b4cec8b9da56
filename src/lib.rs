//! Hybris buffer import for the WPE Wayland server
//!
//! Binds `android_wlegl` client buffers to `EGLImageKHR`s so the renderer
//! can sample them without a CPU copy. The compositor owns one
//! [`HybrisEglBackend`], calls [`HybrisEglBackend::initialize`] with its EGL
//! display, and forwards `wl_surface.attach`/`commit` through [`Backend`].

pub mod backend;
pub mod config;
pub mod driver;
pub mod egl;
pub mod hybris_egl;
pub mod surface;

#[cfg(test)]
mod testing;

pub use backend::{Backend, DmabufPoolEntry, ImplementationType};
pub use driver::{DriverError, LibEgl};
pub use egl::{EglDisplay, EglDriver, EglImage, Extensions};
pub use hybris_egl::HybrisEglBackend;
pub use hybris_wlegl::{BufferResource, HybrisBuffer, NativeBuffer, NativeBufferHandle};
pub use surface::{ExportClient, Surface};
