// 核心公共结构体（原始规则/清洗参数/清洗结果）
pub mod core;
// 模式编译 + Provider 构建
pub mod compiler;
// URL 拆解与重建
pub mod url_parts;
// 清洗主流程 + 参数过滤 + 统计
pub mod cleaner;
// 规则源解析 (ClearURLs JSON)
pub mod source;
pub mod error;
pub mod utils;

// 顶层导出常用类型
pub use crate::cleaner::{filter_params, is_cleanable, CleanStats, ProviderOutcome, UrlCleaner};
pub use crate::compiler::{CompiledProvider, CompiledRuleLibrary, Matcher, PatternAnchor, ProviderCompiler};
pub use crate::core::{CleanOptions, CleanResult, ProviderRule, RuleLibrary};
pub use crate::error::{CoreError, CoreResult, UrlPartsError};
pub use crate::source::ClearUrlsParser;
pub use crate::url_parts::{Fragment, ParamMap, UrlParts};
