//! EGL backend for libhybris client buffers
//!
//! Clients allocate buffers through Android's gralloc and hand them to the
//! compositor over `android_wlegl`. This backend turns those buffers into
//! `EGLImageKHR`s with the `EGL_NATIVE_BUFFER_HYBRIS` target and keeps track
//! of which client resources still belong to the compositor.

use std::ptr;

use hybris_wlegl::{BufferRegistry, BufferResource, HybrisBuffer, WaylandHost};
use tracing::{debug, info, trace, warn};

use crate::backend::{Backend, DmabufPoolEntry, ImplementationType};
use crate::egl::{
    EglDisplay, EglDriver, EglImage, Extensions, ImageProcs, EGL_NATIVE_BUFFER_HYBRIS,
};
use crate::surface::Surface;

#[derive(Debug)]
struct EglState {
    display: EglDisplay,
    extensions: Extensions,
    procs: Option<ImageProcs>,
}

/// Hybris buffer import backend
///
/// Accepts exactly one EGL display for its whole lifetime. Until
/// [`initialize`](Self::initialize) succeeds every image call degrades to
/// `EGL_NO_IMAGE_KHR`, a zero size or a no-op.
pub struct HybrisEglBackend<H: WaylandHost, D: EglDriver> {
    host: H,
    driver: D,
    initialized: bool,
    egl: EglState,
    registry: Option<BufferRegistry>,
}

impl<H: WaylandHost, D: EglDriver> HybrisEglBackend<H, D> {
    pub fn new(host: H, driver: D) -> Self {
        Self {
            host,
            driver,
            initialized: false,
            egl: EglState {
                display: EglDisplay::NONE,
                extensions: Extensions::default(),
                procs: None,
            },
            registry: None,
        }
    }

    /// Bind the backend to `display`.
    ///
    /// Calling again with the same display is a no-op. A different display
    /// is refused: only one is supported per process. `EGL_NO_DISPLAY` is
    /// refused as well.
    pub fn initialize(&mut self, display: EglDisplay) -> bool {
        if display.is_none() {
            warn!("Refusing to initialize hybris EGL support with EGL_NO_DISPLAY");
            return false;
        }

        if self.egl.display == display {
            return true;
        }

        if !self.egl.display.is_none() {
            warn!("Multiple EGL displays are not supported");
            return false;
        }

        let extensions = Extensions::query(&self.driver, display);
        let procs = extensions
            .khr_image_base
            .then(|| ImageProcs::resolve(&self.driver));

        self.initialized = true;
        self.egl = EglState {
            display,
            extensions,
            procs,
        };

        assert!(
            self.registry.is_none(),
            "hybris buffer support has already been initialized"
        );
        self.registry = Some(BufferRegistry::create(&mut self.host));

        info!(
            "Hybris EGL initialized (EGL_KHR_image_base: {})",
            extensions.khr_image_base
        );
        true
    }

    pub fn display(&self) -> EglDisplay {
        self.egl.display
    }

    pub fn extensions(&self) -> Extensions {
        self.egl.extensions
    }

    /// Create an `EGLImageKHR` for the hybris buffer behind `resource`.
    pub fn create_image(&self, resource: BufferResource) -> EglImage {
        if self.egl.display.is_none() {
            return EglImage::NONE;
        }

        let Some(buffer) = self.host.hybris_buffer(resource) else {
            return EglImage::NONE;
        };

        let procs = self.image_procs();
        trace!("Creating image for hybris buffer {}", resource.id());
        // SAFETY: the display is initialized, the entry point was resolved
        // from the same driver and the native buffer is alive while the
        // host still resolves its resource.
        let image = unsafe {
            (procs.create_image)(
                self.egl.display.as_ptr(),
                ptr::null_mut(),
                EGL_NATIVE_BUFFER_HYBRIS,
                buffer.native_handle().as_ptr(),
                ptr::null(),
            )
        };
        EglImage::from_ptr(image)
    }

    /// Same as [`create_image`](Self::create_image), starting from the buffer.
    pub fn create_image_for(&self, buffer: &HybrisBuffer) -> EglImage {
        self.create_image(buffer.resource)
    }

    pub fn destroy_image(&self, image: EglImage) {
        if self.egl.display.is_none() {
            return;
        }

        let procs = self.image_procs();
        // SAFETY: see `create_image`; the driver tolerates unknown images.
        unsafe {
            (procs.destroy_image)(self.egl.display.as_ptr(), image.as_ptr());
        }
        trace!("Destroyed image {:?}", image.as_ptr());
    }

    /// Size of the buffer behind `resource`, `(0, 0)` when it is unknown.
    pub fn query_buffer_size(&self, resource: BufferResource) -> (u32, u32) {
        if self.egl.display.is_none() {
            return (0, 0);
        }

        self.host
            .hybris_buffer(resource)
            .map_or((0, 0), |buffer| buffer.size())
    }

    /// Take ownership of a buffer created through `android_wlegl`.
    ///
    /// Ignored before initialization.
    pub fn import_hybris_buffer(&mut self, buffer: HybrisBuffer) {
        let Some(registry) = self.registry.as_mut() else {
            return;
        };

        if registry.insert(buffer).is_some() {
            debug!("Hybris buffer {} re-imported", buffer.resource.id());
        }
    }

    /// Imported buffer registered under `resource`.
    pub fn hybris_buffer(&self, resource: BufferResource) -> Option<&HybrisBuffer> {
        self.registry.as_ref()?.get(resource)
    }

    /// Drop a buffer whose resource the client destroyed.
    ///
    /// The record leaves the registry so teardown will not destroy it again.
    pub fn forget_hybris_buffer(&mut self, resource: BufferResource) -> Option<HybrisBuffer> {
        let buffer = self.registry.as_mut()?.remove(resource);
        if buffer.is_some() {
            debug!("Forgot hybris buffer {}", resource.id());
        }
        buffer
    }

    pub fn buffer_count(&self) -> usize {
        self.registry.as_ref().map_or(0, BufferRegistry::len)
    }

    fn image_procs(&self) -> &ImageProcs {
        assert!(
            self.egl.extensions.khr_image_base,
            "EGL_KHR_image_base is required for hybris images"
        );
        match &self.egl.procs {
            Some(procs) => procs,
            None => unreachable!("image entry points are resolved with EGL_KHR_image_base"),
        }
    }
}

impl<H: WaylandHost, D: EglDriver> Backend for HybrisEglBackend<H, D> {
    fn impl_type(&self) -> ImplementationType {
        ImplementationType::Egl
    }

    fn initialized(&self) -> bool {
        self.initialized
    }

    fn surface_attach(&mut self, surface: &mut Surface, resource: Option<BufferResource>) {
        surface.hybris_buffer = resource.and_then(|r| self.host.hybris_buffer(r));

        // Re-attaching the pending buffer keeps it with the compositor.
        if let Some(previous) = surface.buffer_resource.take().filter(|p| Some(*p) != resource) {
            debug!("Releasing uncommitted buffer {}", previous.id());
            self.host.send_release(previous);
        }
        surface.buffer_resource = resource;
    }

    fn surface_commit(&mut self, surface: &mut Surface) {
        surface.buffer_resource = None;

        let buffer = surface.hybris_buffer;
        let Some(client) = surface.api_client_mut() else {
            return;
        };
        debug!(
            "Exporting hybris buffer {:?}",
            buffer.map(|b| b.resource.id())
        );
        client.export_hybris_buffer(buffer);
    }

    fn create_dmabuf_pool_entry(&mut self, _surface: &mut Surface) -> Option<DmabufPoolEntry> {
        None
    }
}

impl<H: WaylandHost, D: EglDriver> Drop for HybrisEglBackend<H, D> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.take() {
            let destroyed = registry.teardown(&mut self.host);
            debug!("Hybris EGL backend dropped, {} buffer(s) destroyed", destroyed);
        }
    }
}
