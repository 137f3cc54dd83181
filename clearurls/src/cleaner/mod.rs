//! 清洗模块：清洗器句柄 + 全局单例
pub mod cleaner;
pub mod global;

// 导出核心接口
pub use self::cleaner::ClearUrls;
pub use self::global::{clean_url, global_cleaner, init_global_cleaner, init_global_cleaner_with_rules};
