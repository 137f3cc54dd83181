// ClearURLs 规则文档解析
mod clearurls;

pub use clearurls::{ClearUrlsOriginalRuleLibrary, ClearUrlsParser};
