//! log → tracing 桥接
//! 库内部统一使用 log 门面，宿主使用 tracing 订阅器时调用一次即可收集全部日志
use crate::error::{ClearUrlsError, ClearUrlsResult};

/// 安装 LogTracer，重复调用返回错误
pub fn init_log_bridge() -> ClearUrlsResult<()> {
    tracing_log::LogTracer::init().map_err(|e| {
        ClearUrlsError::CleanerInitError(format!("Failed to install log bridge: {}", e))
    })?;
    tracing::debug!("log records are now forwarded to tracing");
    Ok(())
}
