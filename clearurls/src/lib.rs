//! clearurls - 基于 ClearURLs 规则的URL跟踪参数清洗库

pub mod cleaner;
pub mod config;
pub mod error;
pub mod rule;
pub mod utils;

// 导出全局错误类型
pub use self::error::{ClearUrlsError, ClearUrlsResult};

// 导出配置模块核心结构体与构建器
pub use crate::config::rule::{CustomConfigBuilder, RuleConfig, RuleOptions, RuleOrigin};

// 导出规则加载接口
pub use crate::rule::RuleLoader;

// 导出清洗模块核心接口
pub use crate::cleaner::{
    clean_url, global_cleaner, init_global_cleaner, init_global_cleaner_with_rules, ClearUrls,
};

#[cfg(feature = "tracing")]
pub use crate::utils::init_log_bridge;

// 导出内核常用类型
pub use clearurls_engine::{
    CleanOptions, CleanResult, CleanStats, ClearUrlsParser, CompiledRuleLibrary, CoreError,
    ProviderRule, RuleLibrary,
};

// 嵌入式规则库 - 仅在开启embedded-rules特性时编译
#[cfg(feature = "embedded-rules")]
pub mod clearurls_rules {
    use crate::error::ClearUrlsResult;
    use crate::RuleLoader;
    use clearurls_engine::{CompiledRuleLibrary, ProviderCompiler};
    use once_cell::sync::OnceCell;
    use std::sync::Arc;

    /// 内置 ClearURLs 规则文档
    pub static EMBEDDED_RULES_JSON: &str = include_str!("../data/clearurls_rules.json");

    /// 编译后的内置规则库 - 首次访问时编译，进程内仅一份
    static EMBEDDED_COMPILED_LIB: OnceCell<Arc<CompiledRuleLibrary>> = OnceCell::new();

    pub fn embedded_compiled_lib() -> ClearUrlsResult<Arc<CompiledRuleLibrary>> {
        EMBEDDED_COMPILED_LIB
            .get_or_try_init(|| {
                let rule_lib = RuleLoader::new().load_embedded()?;
                Ok(Arc::new(ProviderCompiler::compile_library(&rule_lib)?))
            })
            .cloned()
    }
}
