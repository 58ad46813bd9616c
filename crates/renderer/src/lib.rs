//! Renderer-side uniform target for form matrices: named wgpu uniform buffers
//! (native backends and WebGPU / WebGL2 through wgpu).

pub mod uniforms;

pub use uniforms::{FormUniform, UniformRegistry, form_uniform_layout_entry};

use thiserror::Error;
use wgpu::{
    Backends, Device, DeviceDescriptor, Instance, InstanceDescriptor, Limits, PowerPreference,
    Queue, RequestAdapterOptions,
};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No suitable GPU adapter: {0}")]
    NoAdapter(String),
    #[error("request_device failed: {0}")]
    Device(String),
}

/// Device and queue without a surface, enough to own uniform buffers.
pub async fn request_headless(backends: Backends) -> Result<(Device, Queue), RenderError> {
    let instance = Instance::new(&InstanceDescriptor {
        backends,
        ..Default::default()
    });

    let adapter = instance
        .request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::LowPower,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| RenderError::NoAdapter(e.to_string()))?;

    log::info!("Using adapter: {:?}", adapter.get_info());

    adapter
        .request_device(&DeviceDescriptor {
            label: Some("formview headless device"),
            required_limits: Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits()),
            ..Default::default()
        })
        .await
        .map_err(|e| RenderError::Device(e.to_string()))
}

/// Blocking wrapper around [`request_headless`].
pub fn headless_device(backends: Backends) -> Result<(Device, Queue), RenderError> {
    pollster::block_on(request_headless(backends))
}
