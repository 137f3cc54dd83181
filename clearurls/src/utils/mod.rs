//! 通用工具
#[cfg(feature = "tracing")]
pub mod log_bridge;

#[cfg(feature = "tracing")]
pub use log_bridge::init_log_bridge;
