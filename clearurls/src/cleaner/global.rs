//! 全局清洗器单例管理
//! 核心职责：
//! 1. 维护进程生命周期内唯一的ClearUrls实例
//! 2. 支持按配置初始化和手动注入规则库
//! 3. 未初始化时按默认配置（内置规则）懒加载

use clearurls_engine::{CleanResult, RuleLibrary};
use once_cell::sync::OnceCell;

use super::cleaner::ClearUrls;
use crate::error::{ClearUrlsError, ClearUrlsResult};
use crate::{RuleConfig, RuleOptions};

/// 全局清洗器实例 - OnceCell确保进程内仅初始化一次
static GLOBAL_CLEANER: OnceCell<ClearUrls> = OnceCell::new();

/// 初始化全局清洗器
/// 幂等：已初始化则直接返回Ok(())，不替换已有实例
pub fn init_global_cleaner(config: RuleConfig) -> ClearUrlsResult<()> {
    if GLOBAL_CLEANER.get().is_some() {
        log::debug!("Global cleaner already initialized, skip reinitialization");
        return Ok(());
    }

    let cleaner = ClearUrls::new(config).map_err(|e| {
        ClearUrlsError::CleanerInitError(format!("Failed to create ClearUrls instance: {}", e))
    })?;
    install(cleaner);

    log::info!("Global ClearUrls initialized successfully");
    Ok(())
}

/// 手动注入规则库，初始化全局清洗器
pub fn init_global_cleaner_with_rules(rule_lib: RuleLibrary, options: RuleOptions) -> ClearUrlsResult<()> {
    if GLOBAL_CLEANER.get().is_some() {
        log::debug!("Global cleaner already initialized, skip reinitialization with custom rules");
        return Ok(());
    }

    let cleaner = ClearUrls::with_rules(rule_lib, options).map_err(|e| {
        ClearUrlsError::CleanerInitError(format!("Failed to create ClearUrls with custom rules: {}", e))
    })?;
    install(cleaner);

    log::info!("Global ClearUrls initialized with custom rule library");
    Ok(())
}

// 并发初始化时后到者的实例直接丢弃
fn install(cleaner: ClearUrls) {
    if GLOBAL_CLEANER.set(cleaner).is_err() {
        log::debug!("Global cleaner was initialized by another thread first");
    }
}

/// 获取全局清洗器（未初始化则按默认配置懒加载）
pub fn global_cleaner() -> ClearUrlsResult<&'static ClearUrls> {
    GLOBAL_CLEANER.get_or_try_init(|| {
        log::debug!("Lazy initializing global ClearUrls with default config");
        ClearUrls::new(RuleConfig::default())
    })
}

/// 使用全局清洗器清洗单个URL
pub fn clean_url(url: &str) -> ClearUrlsResult<CleanResult> {
    Ok(global_cleaner()?.clean(url))
}

#[cfg(all(test, feature = "embedded-rules"))]
mod tests {
    use super::*;

    fn clean(url: &str) -> CleanResult {
        let _ = env_logger::builder().is_test(true).try_init();
        clean_url(url).unwrap()
    }

    #[test]
    fn test_strips_utm_params() {
        let res = clean("https://example.com/page?utm_source=twitter&utm_medium=social&id=123");
        assert_eq!(res, CleanResult::finished("https://example.com/page?id=123", true));
    }

    #[test]
    fn test_google_redirect() {
        let res = clean("https://www.google.com/url?q=https://example.com/target&ved=123");
        assert_eq!(res, CleanResult::redirected("https://example.com/target"));
    }

    #[test]
    fn test_amazon_params_removed() {
        let res = clean("https://www.amazon.com/dp/B123?ref_=nav&pf_rd_p=123&qid=456");
        assert_eq!(res, CleanResult::finished("https://www.amazon.com/dp/B123", true));
    }

    #[test]
    fn test_amazon_raw_rule_and_referral() {
        let res = clean("https://www.amazon.de/dp/B01/ref=sr_1_1?tag=aff-21&keywords=rust");
        assert_eq!(res.url, "https://www.amazon.de/dp/B01?keywords=rust");
        assert!(res.was_modified);
    }

    #[test]
    fn test_google_exception_untouched() {
        let url = "https://mail.google.com/mail/u/0/?ved=123";
        assert_eq!(clean(url), CleanResult::unchanged(url));
    }

    #[test]
    fn test_data_url_rejected() {
        let url = "data:text/plain;base64,SGVsbG8=";
        assert_eq!(clean(url), CleanResult::unchanged(url));
    }

    #[test]
    fn test_opaque_fragment_kept() {
        let url = "https://example.com/page#section";
        assert_eq!(clean(url), CleanResult::unchanged(url));
    }

    #[test]
    fn test_complete_provider_blocks() {
        let url = "https://block.clearurls.xyz/landing";
        assert_eq!(clean(url), CleanResult::blocked(url));
        // 拦截返回的是前序 Provider 处理后的当前URL
        let res = clean("https://block.clearurls.xyz/?utm_source=x");
        assert_eq!(res, CleanResult::blocked("https://block.clearurls.xyz/"));
    }

    #[test]
    fn test_facebook_redirect_is_decoded() {
        let res = clean("https://l.facebook.com/l.php?u=https%3A%2F%2Fexample.org%2Fa%3Fb%3D1&h=AT0");
        assert_eq!(res, CleanResult::redirected("https://example.org/a?b=1"));
    }

    #[test]
    fn test_global_cleaner_is_shared() {
        let a = global_cleaner().unwrap();
        let b = global_cleaner().unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(a.provider_count() > 0);
        // 已初始化后再次初始化是空操作
        init_global_cleaner(RuleConfig::inline(r#"{"providers": {}}"#)).unwrap();
        assert_eq!(global_cleaner().unwrap().provider_count(), a.provider_count());
    }

    #[test]
    fn test_idempotent_on_embedded_rules() {
        for url in [
            "https://www.google.com/search?q=rust+lang&ei=abc&sca_esv=1#frag",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&feature=share&si=xyz",
            "https://twitter.com/user/status/1?s=20&t=abc",
        ] {
            let once = clean(url);
            let twice = clean(&once.url);
            assert_eq!(once.url, twice.url, "not idempotent for {url}");
            assert!(!twice.was_modified);
        }
    }
}
