pub mod matcher;
mod provider;
mod library;
mod builder;

// 对外只导出具体内容，不导出模块名
pub use matcher::{Matcher, PatternAnchor};
pub use provider::CompiledProvider;
pub use library::CompiledRuleLibrary;
pub use builder::ProviderCompiler;
