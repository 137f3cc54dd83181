mod options;
mod result;
mod rule;

// 导出常用项
pub use options::CleanOptions;
pub use result::CleanResult;
pub use rule::{ProviderRule, RuleLibrary};
