//! hybris-ws-info
//!
//! Reports whether the system EGL can import hybris buffers: loads libEGL,
//! opens the default display and checks `EGL_KHR_image_base` together with
//! its entry points.

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hybris_ws::config::Config;
use hybris_ws::egl::{EglDriver, Extensions, EGL_CREATE_IMAGE_KHR, EGL_DESTROY_IMAGE_KHR};
use hybris_ws::LibEgl;

fn main() -> Result<()> {
    let config = Config::load()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log.filter.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let egl = match &config.egl.library {
        Some(path) => LibEgl::load_from(path),
        None => LibEgl::load(),
    }
    .context("Failed to load EGL")?;

    let display = egl
        .default_display()
        .context("Failed to open the default EGL display")?;

    let extensions = Extensions::query(&egl, display);
    info!("EGL_KHR_image_base: {}", extensions.khr_image_base);

    if !extensions.khr_image_base {
        if config.egl.require_image_base {
            bail!("EGL_KHR_image_base is not supported, hybris buffers cannot be imported");
        }
        warn!("EGL_KHR_image_base is not supported, hybris images are disabled");
        return Ok(());
    }

    for name in [EGL_CREATE_IMAGE_KHR, EGL_DESTROY_IMAGE_KHR] {
        if egl.get_proc_address(name).is_null() {
            bail!("{} is advertised but missing", name);
        }
        info!("{}: resolved", name);
    }

    info!("Hybris buffer import is available");
    Ok(())
}
