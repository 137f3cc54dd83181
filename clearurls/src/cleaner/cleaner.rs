//! URL cleaner handle
//! 清洗器句柄
//! 核心职责：
//! 1. 规则加载与编译（内置/本地文件/内联规则）
//! 2. 持有推广返利开关，每次调用入口快照一次
//! 3. 提供基础清洗/显式参数清洗/带统计清洗等多版本接口

#[cfg(feature = "embedded-rules")]
use crate::clearurls_rules;
use crate::error::ClearUrlsResult;
use crate::{RuleConfig, RuleLoader, RuleOptions, RuleOrigin};
use clearurls_engine::{
    CleanOptions, CleanResult, CleanStats, CompiledRuleLibrary, ProviderCompiler, RuleLibrary,
    UrlCleaner,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// URL 清洗器
/// 设计说明：
/// - cleaner: 无状态清洗核心（内部 Arc 共享已编译规则库）
/// - allow_referral_marketing: 唯一的可变状态，克隆出的句柄共享同一开关
#[derive(Debug, Clone)]
pub struct ClearUrls {
    cleaner: UrlCleaner,
    allow_referral_marketing: Arc<AtomicBool>,
}

impl ClearUrls {
    /// 按配置创建清洗器
    /// 支持规则来源：
    /// 1. Embedded：内置规则（需开启embedded-rules特性，首次使用时编译一次）
    /// 2. LocalFile/Inline：运行时解析并编译
    pub fn new(config: RuleConfig) -> ClearUrlsResult<Self> {
        match &config.origin {
            RuleOrigin::Embedded => Self::from_embedded(config.options),
            RuleOrigin::LocalFile(_) | RuleOrigin::Inline(_) => {
                let rule_lib = RuleLoader::new().load(&config)?;
                Self::with_rules(rule_lib, config.options)
            }
        }
    }

    /// 异步创建（本地规则文件通过 tokio::fs 读取）
    #[cfg(feature = "async-io")]
    pub async fn new_async(config: RuleConfig) -> ClearUrlsResult<Self> {
        match &config.origin {
            RuleOrigin::Embedded => Self::from_embedded(config.options),
            RuleOrigin::LocalFile(_) | RuleOrigin::Inline(_) => {
                let rule_lib = RuleLoader::new().load_async(&config).await?;
                Self::with_rules(rule_lib, config.options)
            }
        }
    }

    /// 使用内存中的RuleLibrary创建清洗器
    /// 任一 Provider 编译失败即整体失败
    pub fn with_rules(rule_lib: RuleLibrary, options: RuleOptions) -> ClearUrlsResult<Self> {
        let start = Instant::now();
        let compiled_lib = ProviderCompiler::compile_library(&rule_lib)?;
        log::info!(
            "ClearUrls initialized | Providers: {} | Patterns: {} | Time: {}ms",
            compiled_lib.len(),
            compiled_lib.pattern_count(),
            start.elapsed().as_millis()
        );
        Ok(Self::with_compiled_lib(Arc::new(compiled_lib), options))
    }

    /// 使用已编译的规则库创建清洗器
    pub fn with_compiled_lib(compiled_lib: Arc<CompiledRuleLibrary>, options: RuleOptions) -> Self {
        Self {
            cleaner: UrlCleaner::new(compiled_lib),
            allow_referral_marketing: Arc::new(AtomicBool::new(options.allow_referral_marketing)),
        }
    }

    #[cfg(feature = "embedded-rules")]
    fn from_embedded(options: RuleOptions) -> ClearUrlsResult<Self> {
        let compiled_lib = clearurls_rules::embedded_compiled_lib()?;
        log::info!("Using clearurls embedded rule library | Providers: {}", compiled_lib.len());
        Ok(Self::with_compiled_lib(compiled_lib, options))
    }

    #[cfg(not(feature = "embedded-rules"))]
    fn from_embedded(_options: RuleOptions) -> ClearUrlsResult<Self> {
        Err(crate::error::ClearUrlsError::FeatureDisabled(
            "embedded-rules feature is disabled, cannot use embedded rule library. Please enable this feature or use local/inline rules.".to_string(),
        ))
    }

    /// 清洗单个URL（开关在入口快照一次）
    pub fn clean(&self, url: &str) -> CleanResult {
        self.cleaner.clean(url, &self.snapshot_options())
    }

    /// 显式传入本次调用参数，忽略句柄上的开关
    pub fn clean_with(&self, url: &str, options: &CleanOptions) -> CleanResult {
        self.cleaner.clean(url, options)
    }

    pub fn clean_with_stats(&self, url: &str) -> (CleanResult, CleanStats) {
        self.cleaner.clean_with_stats(url, &self.snapshot_options())
    }

    /// 修改推广返利开关，只影响之后开始的调用
    pub fn set_allow_referral_marketing(&self, allow: bool) {
        self.allow_referral_marketing.store(allow, Ordering::Release);
    }

    pub fn allow_referral_marketing(&self) -> bool {
        self.allow_referral_marketing.load(Ordering::Acquire)
    }

    pub fn provider_count(&self) -> usize {
        self.cleaner.library().len()
    }

    pub fn compiled_lib(&self) -> &CompiledRuleLibrary {
        self.cleaner.library()
    }

    #[inline]
    fn snapshot_options(&self) -> CleanOptions {
        CleanOptions::new(self.allow_referral_marketing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClearUrlsError;
    use clearurls_engine::ProviderRule;

    fn shop_rules() -> RuleLibrary {
        RuleLibrary::new(vec![ProviderRule::new("shop", r"^https?:\/\/shop\.example")
            .with_rules(["sid"])
            .with_referral_marketing(["tag"])])
    }

    #[test]
    fn test_toggle_affects_later_calls() {
        let cleaner = ClearUrls::with_rules(shop_rules(), RuleOptions::default()).unwrap();
        let url = "https://shop.example/item?tag=aff-20&sid=1&id=7";

        let res = cleaner.clean(url);
        assert_eq!(res.url, "https://shop.example/item?id=7");

        cleaner.set_allow_referral_marketing(true);
        assert!(cleaner.allow_referral_marketing());
        let res = cleaner.clean(url);
        assert_eq!(res.url, "https://shop.example/item?tag=aff-20&id=7");
        assert!(res.was_modified);
    }

    #[test]
    fn test_clones_share_toggle() {
        let cleaner = ClearUrls::with_rules(shop_rules(), RuleOptions::default()).unwrap();
        let other = cleaner.clone();
        other.set_allow_referral_marketing(true);
        assert!(cleaner.allow_referral_marketing());
    }

    #[test]
    fn test_clean_with_ignores_handle_toggle() {
        let cleaner = ClearUrls::with_rules(
            shop_rules(),
            RuleOptions {
                allow_referral_marketing: true,
            },
        )
        .unwrap();
        let res = cleaner.clean_with("https://shop.example/?tag=x", &CleanOptions::new(false));
        assert_eq!(res.url, "https://shop.example/");
    }

    #[test]
    fn test_invalid_rule_fails_construction() {
        let lib = RuleLibrary::new(vec![ProviderRule::new("bad", "shop").with_rules(["(unclosed"])]);
        let err = ClearUrls::with_rules(lib, RuleOptions::default()).unwrap_err();
        assert!(matches!(err, ClearUrlsError::RuleBuildError(_)));
    }

    #[test]
    fn test_inline_config() {
        let config = RuleConfig::inline(
            r#"{"providers": {"shop": {"urlPattern": "shop\\.example", "rules": ["sid"]}}}"#,
        );
        let cleaner = ClearUrls::new(config).unwrap();
        assert_eq!(cleaner.provider_count(), 1);
        let (res, stats) = cleaner.clean_with_stats("https://shop.example/a?sid=1");
        assert_eq!(res.url, "https://shop.example/a");
        assert_eq!(stats.matched_providers, vec!["shop"]);
    }

    #[test]
    fn test_concurrent_callers_share_handle() {
        let cleaner = ClearUrls::with_rules(shop_rules(), RuleOptions::default()).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cleaner = cleaner.clone();
                std::thread::spawn(move || cleaner.clean(&format!("https://shop.example/{i}?sid=x&id={i}")))
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let res = handle.join().unwrap();
            assert_eq!(res.url, format!("https://shop.example/{i}?id={i}"));
        }
    }
}
