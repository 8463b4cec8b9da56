//! EGL handle types and the driver seam
//!
//! Only the slice of EGL the hybris backend needs: extension queries,
//! entry-point lookup and the `EGL_KHR_image_base` image functions.

use std::ffi::c_void;
use std::ptr;

pub const EGL_KHR_IMAGE_BASE: &str = "EGL_KHR_image_base";
pub const EGL_CREATE_IMAGE_KHR: &str = "eglCreateImageKHR";
pub const EGL_DESTROY_IMAGE_KHR: &str = "eglDestroyImageKHR";

/// `EGL_NATIVE_BUFFER_HYBRIS` image target from libhybris' nativebufferext
pub const EGL_NATIVE_BUFFER_HYBRIS: u32 = 0x3140;

/// `eglCreateImageKHR(dpy, ctx, target, buffer, attrib_list)`
pub type CreateImageKhrFn = unsafe extern "system" fn(
    *mut c_void,
    *mut c_void,
    u32,
    *mut c_void,
    *const i32,
) -> *mut c_void;

/// `eglDestroyImageKHR(dpy, image)`
pub type DestroyImageKhrFn = unsafe extern "system" fn(*mut c_void, *mut c_void) -> u32;

/// An `EGLDisplay`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EglDisplay(*mut c_void);

impl EglDisplay {
    /// `EGL_NO_DISPLAY`
    pub const NONE: Self = Self(ptr::null_mut());

    pub const fn from_ptr(ptr: *mut c_void) -> Self {
        Self(ptr)
    }

    pub const fn as_ptr(self) -> *mut c_void {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0.is_null()
    }
}

/// An `EGLImageKHR`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EglImage(*mut c_void);

impl EglImage {
    /// `EGL_NO_IMAGE_KHR`
    pub const NONE: Self = Self(ptr::null_mut());

    pub const fn from_ptr(ptr: *mut c_void) -> Self {
        Self(ptr)
    }

    pub const fn as_ptr(self) -> *mut c_void {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0.is_null()
    }
}

/// Extension flags negotiated from a display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extensions {
    pub khr_image_base: bool,
}

impl Extensions {
    pub fn query<D: EglDriver + ?Sized>(driver: &D, display: EglDisplay) -> Self {
        Self {
            khr_image_base: driver.has_extension(display, EGL_KHR_IMAGE_BASE),
        }
    }
}

/// Driver entry points for `EGL_KHR_image_base`
#[derive(Debug, Clone, Copy)]
pub struct ImageProcs {
    pub create_image: CreateImageKhrFn,
    pub destroy_image: DestroyImageKhrFn,
}

impl ImageProcs {
    /// Resolve both image entry points.
    ///
    /// # Panics
    ///
    /// When either entry point is missing. Callers only get here after the
    /// display advertised the extension, so a missing symbol means the driver
    /// is broken.
    pub fn resolve<D: EglDriver + ?Sized>(driver: &D) -> Self {
        let create = driver.get_proc_address(EGL_CREATE_IMAGE_KHR);
        let destroy = driver.get_proc_address(EGL_DESTROY_IMAGE_KHR);
        assert!(
            !create.is_null() && !destroy.is_null(),
            "{EGL_KHR_IMAGE_BASE} is advertised but {EGL_CREATE_IMAGE_KHR}/{EGL_DESTROY_IMAGE_KHR} did not resolve"
        );

        // SAFETY: both pointers are non-null and were returned by the driver
        // for these exact entry points, whose signatures are fixed by the
        // extension.
        unsafe {
            Self {
                create_image: std::mem::transmute::<*const c_void, CreateImageKhrFn>(create),
                destroy_image: std::mem::transmute::<*const c_void, DestroyImageKhrFn>(destroy),
            }
        }
    }
}

/// The parts of an EGL implementation the hybris backend consumes
pub trait EglDriver {
    /// Whether `display` advertises extension `name`.
    fn has_extension(&self, display: EglDisplay, name: &str) -> bool;

    /// Address of the entry point `name`, or null.
    fn get_proc_address(&self, name: &str) -> *const c_void;
}
