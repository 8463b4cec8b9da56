use std::ffi::c_void;
use std::ptr;

/// Client-side `wl_buffer` resource handle
///
/// This is the protocol object id the client uses to refer to the buffer.
/// It is only ever a lookup key; holding one does not keep the buffer alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferResource(u32);

impl BufferResource {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Driver buffer object backing a hybris buffer (`ANativeWindowBuffer*`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeBufferHandle(*mut c_void);

impl NativeBufferHandle {
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

/// Remote window buffer received from the Android allocator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeBuffer {
    pub handle: NativeBufferHandle,
    pub width: u32,
    pub height: u32,
}

impl NativeBuffer {
    pub fn new(handle: NativeBufferHandle, width: u32, height: u32) -> Self {
        Self { handle, width, height }
    }
}

/// A client buffer bound into the compositor through `android_wlegl`
///
/// Copies of this record are non-owning: the native handle stays valid only
/// while the [`BufferRegistry`](crate::BufferRegistry) (or the host, before
/// import) still holds the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HybrisBuffer {
    pub resource: BufferResource,
    pub buf: NativeBuffer,
}

impl HybrisBuffer {
    pub fn new(resource: BufferResource, buf: NativeBuffer) -> Self {
        Self { resource, buf }
    }

    /// Size of the underlying native buffer in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.buf.width, self.buf.height)
    }

    pub fn native_handle(&self) -> NativeBufferHandle {
        self.buf.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size_and_handle() {
        let handle = NativeBufferHandle::from_ptr(0x1000 as *mut c_void);
        let buffer = HybrisBuffer::new(BufferResource::new(7), NativeBuffer::new(handle, 100, 200));

        assert_eq!(buffer.size(), (100, 200));
        assert_eq!(buffer.native_handle(), handle);
        assert_eq!(buffer.resource.id(), 7);
        assert!(!buffer.native_handle().is_none());
        assert!(NativeBufferHandle::NONE.is_none());
    }
}
