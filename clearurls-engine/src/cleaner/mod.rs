// 清洗流程子模块
pub mod clean_stats;
pub mod param_filter;
pub mod url_cleaner;

pub use clean_stats::CleanStats;
pub use param_filter::filter_params;
pub use url_cleaner::{is_cleanable, ProviderOutcome, UrlCleaner};
