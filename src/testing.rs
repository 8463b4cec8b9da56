//! Test doubles for the Wayland host, the EGL driver and export clients

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::ffi::c_void;
use std::ptr;
use std::rc::Rc;

use hybris_wlegl::{
    BufferResource, HybrisBuffer, NativeBuffer, NativeBufferHandle, WaylandHost, WleglGlobal,
};

use crate::egl::{
    EglDisplay, EglDriver, EGL_CREATE_IMAGE_KHR, EGL_DESTROY_IMAGE_KHR, EGL_KHR_IMAGE_BASE,
};
use crate::surface::ExportClient;

thread_local! {
    static CREATED_IMAGES: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
    static DESTROYED_IMAGES: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

unsafe extern "system" fn fake_create_image(
    _display: *mut c_void,
    _context: *mut c_void,
    _target: u32,
    buffer: *mut c_void,
    _attribs: *const i32,
) -> *mut c_void {
    CREATED_IMAGES.with(|images| images.borrow_mut().push(buffer as usize));
    buffer
}

unsafe extern "system" fn fake_destroy_image(_display: *mut c_void, image: *mut c_void) -> u32 {
    DESTROYED_IMAGES.with(|images| images.borrow_mut().push(image as usize));
    1
}

/// Native buffer pointers passed to `eglCreateImageKHR` on this thread
pub(crate) fn created_images() -> Vec<usize> {
    CREATED_IMAGES.with(|images| images.borrow().clone())
}

/// Images passed to `eglDestroyImageKHR` on this thread
pub(crate) fn destroyed_images() -> Vec<usize> {
    DESTROYED_IMAGES.with(|images| images.borrow().clone())
}

pub(crate) fn display(id: usize) -> EglDisplay {
    EglDisplay::from_ptr(id as *mut c_void)
}

pub(crate) fn buffer(id: u32, width: u32, height: u32) -> HybrisBuffer {
    let handle = NativeBufferHandle::from_ptr((0x1000 + id as usize) as *mut c_void);
    HybrisBuffer::new(BufferResource::new(id), NativeBuffer::new(handle, width, height))
}

pub(crate) struct FakeDriver {
    extensions: Vec<&'static str>,
    procs: bool,
}

impl FakeDriver {
    pub(crate) fn with_image_base() -> Self {
        Self {
            extensions: vec![EGL_KHR_IMAGE_BASE],
            procs: true,
        }
    }

    pub(crate) fn without_extensions() -> Self {
        Self {
            extensions: Vec::new(),
            procs: true,
        }
    }

    /// Advertises the extension but cannot resolve its entry points.
    pub(crate) fn broken() -> Self {
        Self {
            extensions: vec![EGL_KHR_IMAGE_BASE],
            procs: false,
        }
    }
}

impl EglDriver for FakeDriver {
    fn has_extension(&self, _display: EglDisplay, name: &str) -> bool {
        self.extensions.contains(&name)
    }

    fn get_proc_address(&self, name: &str) -> *const c_void {
        if !self.procs {
            return ptr::null();
        }
        match name {
            EGL_CREATE_IMAGE_KHR => fake_create_image as *const c_void,
            EGL_DESTROY_IMAGE_KHR => fake_destroy_image as *const c_void,
            _ => ptr::null(),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct HostState {
    pub(crate) buffers: HashMap<BufferResource, HybrisBuffer>,
    pub(crate) released: Vec<BufferResource>,
    pub(crate) destroyed_buffers: Vec<BufferResource>,
    pub(crate) globals_created: u32,
    pub(crate) globals_destroyed: u32,
}

/// Shared-state host so tests can inspect it after the backend is dropped
#[derive(Debug, Default, Clone)]
pub(crate) struct FakeHost(Rc<RefCell<HostState>>);

impl FakeHost {
    pub(crate) fn add_buffer(&self, buffer: HybrisBuffer) {
        self.0.borrow_mut().buffers.insert(buffer.resource, buffer);
    }

    pub(crate) fn state(&self) -> Ref<'_, HostState> {
        self.0.borrow()
    }
}

impl WaylandHost for FakeHost {
    fn hybris_buffer(&self, resource: BufferResource) -> Option<HybrisBuffer> {
        self.0.borrow().buffers.get(&resource).copied()
    }

    fn send_release(&mut self, resource: BufferResource) {
        self.0.borrow_mut().released.push(resource);
    }

    fn create_wlegl_global(&mut self) -> WleglGlobal {
        let mut state = self.0.borrow_mut();
        state.globals_created += 1;
        WleglGlobal::new(state.globals_created)
    }

    fn destroy_wlegl_global(&mut self, _global: WleglGlobal) {
        self.0.borrow_mut().globals_destroyed += 1;
    }

    fn destroy_buffer(&mut self, buffer: HybrisBuffer) {
        let mut state = self.0.borrow_mut();
        state.buffers.remove(&buffer.resource);
        state.destroyed_buffers.push(buffer.resource);
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct RecordingClient(Rc<RefCell<Vec<Option<HybrisBuffer>>>>);

impl RecordingClient {
    pub(crate) fn exported(&self) -> Vec<Option<HybrisBuffer>> {
        self.0.borrow().clone()
    }
}

impl ExportClient for RecordingClient {
    fn export_hybris_buffer(&mut self, buffer: Option<HybrisBuffer>) {
        self.0.borrow_mut().push(buffer);
    }
}
