//! Hybris wlegl buffer model
//!
//! Types shared between the Wayland host (which owns the `android_wlegl`
//! global and the client `wl_buffer` resources) and the EGL backend that
//! turns those buffers into EGL images.

pub mod buffer;
pub mod host;
pub mod registry;

pub use buffer::{BufferResource, HybrisBuffer, NativeBuffer, NativeBufferHandle};
pub use host::{WaylandHost, WleglGlobal};
pub use registry::BufferRegistry;
