//! 全局错误类型定义
use clearurls_engine::CoreError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClearUrlsError {
    // 规则相关错误
    #[error("规则加载失败：{0}")]
    RuleLoadError(String),
    #[error("规则构建失败：{0}")]
    RuleBuildError(#[from] CoreError),

    // 清洗器相关错误
    #[error("清洗器初始化失败: {0}")]
    CleanerInitError(String),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("功能未启用：{0}")]
    FeatureDisabled(String),
}

// 全局Result类型
pub type ClearUrlsResult<T> = Result<T, ClearUrlsError>;
