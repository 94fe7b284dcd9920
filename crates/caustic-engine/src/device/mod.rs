//! GPU device + surface management.
//!
//! - creates the wgpu Instance/Adapter/Device/Queue for the window
//! - creates & configures the Surface (swapchain), reconfigures on resize
//! - acquires frames and hands out an encoder + view for rendering

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
