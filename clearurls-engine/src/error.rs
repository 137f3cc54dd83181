//! clearurls-engine 内核错误定义
//! 封装内核层所有核心错误，与业务层错误解耦，基于thiserror实现类型安全处理
use thiserror::Error;

use regex::Error as RegexError;

/// 内核核心错误枚举
/// 规则构建期的错误全部在此暴露，清洗期不会产生错误
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================== 规则相关错误 =====================
    /// 规则文档解析失败（JSON语法错误/字段类型不符）
    #[error("Rule parse failed: {0}")]
    RuleParseError(String),

    /// Provider 缺少 urlPattern（构建期硬错误）
    #[error("Provider [{provider}] has an empty urlPattern")]
    EmptyUrlPattern { provider: String },

    /// 重定向模式缺少捕获组，无法提取目标URL
    #[error("Provider [{provider}] redirection pattern has no capture group: {pattern}")]
    InvalidRedirection { provider: String, pattern: String },

    // ===================== 编译相关错误 =====================
    /// 正则表达式编译失败（正则语法错误/不支持的特性）
    #[error("Regex compilation failed: provider={provider} pattern={pattern} error={source}")]
    RegexCompileError {
        provider: String,
        pattern: String,
        #[source]
        source: RegexError,
    },
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::RuleParseError(e.to_string())
    }
}

/// 内核层全局Result类型别名
pub type CoreResult<T> = Result<T, CoreError>;

/// URL 拆解失败原因
/// 清洗流程中出现即中止整次清洗，返回原始URL
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlPartsError {
    #[error("URL has no valid scheme")]
    MissingScheme,
    #[error("URL has no host")]
    MissingHost,
    #[error("URL has an invalid port: {0}")]
    InvalidPort(String),
}
