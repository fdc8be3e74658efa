//! GPU rendering: context, buffers and pipelines

pub mod buffer;
pub mod context;
pub mod pipeline;
pub mod texture;

pub use context::GpuContext;
