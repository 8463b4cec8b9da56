use std::fmt;

use hybris_wlegl::{BufferResource, HybrisBuffer};

/// Renderer-side consumer of a surface's committed buffers
pub trait ExportClient {
    /// Import `buffer` on the GPU side. `None` means the surface has no
    /// hybris buffer attached.
    fn export_hybris_buffer(&mut self, buffer: Option<HybrisBuffer>);
}

/// Per-`wl_surface` buffer state seen by the backend
#[derive(Default)]
pub struct Surface {
    /// Buffer attached by the last `wl_surface.attach`
    ///
    /// Non-owning: the record stays owned by the registry or the host.
    pub(crate) hybris_buffer: Option<HybrisBuffer>,

    /// Resource attached but not yet committed; released to the client if
    /// another buffer replaces it first.
    pub(crate) buffer_resource: Option<BufferResource>,

    api_client: Option<Box<dyn ExportClient>>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_client(client: Box<dyn ExportClient>) -> Self {
        Self {
            api_client: Some(client),
            ..Self::default()
        }
    }

    pub fn set_api_client(&mut self, client: Option<Box<dyn ExportClient>>) {
        self.api_client = client;
    }

    pub fn has_api_client(&self) -> bool {
        self.api_client.is_some()
    }

    pub fn hybris_buffer(&self) -> Option<&HybrisBuffer> {
        self.hybris_buffer.as_ref()
    }

    pub fn buffer_resource(&self) -> Option<BufferResource> {
        self.buffer_resource
    }

    pub(crate) fn api_client_mut(&mut self) -> Option<&mut (dyn ExportClient + 'static)> {
        self.api_client.as_deref_mut()
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("hybris_buffer", &self.hybris_buffer)
            .field("buffer_resource", &self.buffer_resource)
            .field("api_client", &self.api_client.is_some())
            .finish()
    }
}
