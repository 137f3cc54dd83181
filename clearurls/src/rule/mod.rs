//! 规则模块：负责规则文档的加载与解析
pub mod loader;

pub use loader::RuleLoader;
