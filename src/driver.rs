//! System EGL driver loaded at runtime

use std::ffi::c_void;
use std::path::Path;
use std::ptr;

use khronos_egl as egl;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::egl::{EglDisplay, EglDriver};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to load libEGL: {0}")]
    Load(String),
    #[error("eglGetDisplay returned EGL_NO_DISPLAY")]
    NoDisplay,
    #[error("eglInitialize failed: {0}")]
    Initialize(#[from] egl::Error),
}

/// libEGL opened through `khronos-egl`
pub struct LibEgl {
    egl: egl::DynamicInstance<egl::EGL1_4>,
}

impl LibEgl {
    /// Load the platform's default libEGL.
    pub fn load() -> Result<Self, DriverError> {
        // SAFETY: loading libEGL runs its constructors; nothing else is
        // required of the caller.
        let egl = unsafe { egl::DynamicInstance::<egl::EGL1_4>::load_required() }
            .map_err(|e| DriverError::Load(e.to_string()))?;
        info!("Loaded libEGL");
        Ok(Self { egl })
    }

    /// Load libEGL from an explicit path (e.g. libhybris' `libEGL.so.1`).
    pub fn load_from(path: &Path) -> Result<Self, DriverError> {
        // SAFETY: see `load`.
        let egl = unsafe { egl::DynamicInstance::<egl::EGL1_4>::load_required_from_filename(path) }
            .map_err(|e| DriverError::Load(format!("{}: {}", path.display(), e)))?;
        info!("Loaded libEGL from {:?}", path);
        Ok(Self { egl })
    }

    /// Open and initialize `EGL_DEFAULT_DISPLAY`.
    pub fn default_display(&self) -> Result<EglDisplay, DriverError> {
        // SAFETY: EGL_DEFAULT_DISPLAY is always a valid native display id.
        let display = unsafe { self.egl.get_display(egl::DEFAULT_DISPLAY) }
            .ok_or(DriverError::NoDisplay)?;
        let (major, minor) = self.egl.initialize(display)?;
        info!("EGL version {}.{}", major, minor);
        Ok(EglDisplay::from_ptr(display.as_ptr()))
    }
}

impl EglDriver for LibEgl {
    fn has_extension(&self, display: EglDisplay, name: &str) -> bool {
        if display.is_none() {
            return false;
        }

        // SAFETY: the display was handed to us by the compositor, which got
        // it from this same libEGL.
        let display = unsafe { egl::Display::from_ptr(display.as_ptr()) };
        match self.egl.query_string(Some(display), egl::EXTENSIONS) {
            Ok(extensions) => extensions
                .to_string_lossy()
                .split_ascii_whitespace()
                .any(|ext| ext == name),
            Err(e) => {
                warn!("eglQueryString(EGL_EXTENSIONS) failed: {}", e);
                false
            }
        }
    }

    fn get_proc_address(&self, name: &str) -> *const c_void {
        match self.egl.get_proc_address(name) {
            Some(f) => f as *const c_void,
            None => {
                debug!("eglGetProcAddress({}) returned null", name);
                ptr::null()
            }
        }
    }
}
