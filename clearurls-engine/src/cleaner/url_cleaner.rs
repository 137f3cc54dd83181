//! URL 清洗核心流程
//! 核心职责：
//! 1. 快速拒绝无法清洗的输入
//! 2. 按规则库顺序遍历所有命中的 Provider
//! 3. 重定向/拦截立即短路返回
//! 4. rawRules → 拆解 → 字段过滤 → 重建

use std::borrow::Cow;
use std::sync::Arc;

use url::Url;

use crate::{
    cleaner::{filter_params, CleanStats},
    compiler::{CompiledProvider, CompiledRuleLibrary},
    core::{CleanOptions, CleanResult},
    error::UrlPartsError,
    url_parts::{Fragment, UrlParts},
    utils::preview::{preview_compact, URL_PREVIEW_LEN},
};

/// 单个 Provider 的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    /// 未命中或命中例外，URL 不变
    Skipped,
    /// 已清洗，继续处理下一个 Provider
    Continue { url: String, modified: bool },
    /// 提取到重定向目标，终止整个流程
    Redirect(String),
    /// completeProvider 命中，终止整个流程
    Blocked,
}

/// URL 清洗器
/// 无内部可变状态，可在多线程间直接共享
#[derive(Debug, Clone)]
pub struct UrlCleaner {
    library: Arc<CompiledRuleLibrary>,
}

impl UrlCleaner {
    pub fn new(library: Arc<CompiledRuleLibrary>) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &CompiledRuleLibrary {
        &self.library
    }

    /// 清洗单个URL
    pub fn clean(&self, url: &str, options: &CleanOptions) -> CleanResult {
        self.clean_with_stats(url, options).0
    }

    /// 清洗单个URL，同时返回本次调用的统计信息
    pub fn clean_with_stats(&self, url: &str, options: &CleanOptions) -> (CleanResult, CleanStats) {
        let mut stats = CleanStats::default();

        if !is_cleanable(url) {
            log::trace!("Skip uncleanable input | URL: {}", preview_compact(url, URL_PREVIEW_LEN));
            return (CleanResult::unchanged(url), stats);
        }

        // 开关只在入口读取一次，整个调用内保持一致
        let include_referral = options.include_referral_rules();
        let mut current = url.to_string();
        let mut modified = false;

        for provider in &self.library.providers {
            match Self::apply_provider(provider, &current, url, include_referral, &mut stats) {
                Ok(ProviderOutcome::Skipped) => {}
                Ok(ProviderOutcome::Continue { url: next, modified: changed }) => {
                    modified |= changed;
                    current = next;
                }
                Ok(ProviderOutcome::Redirect(target)) => {
                    log::debug!(
                        "Redirection extracted | Provider: {} | Target: {}",
                        provider.name(),
                        preview_compact(&target, URL_PREVIEW_LEN)
                    );
                    return (CleanResult::redirected(target), stats);
                }
                Ok(ProviderOutcome::Blocked) => {
                    log::debug!(
                        "URL blocked by complete provider | Provider: {} | URL: {}",
                        provider.name(),
                        preview_compact(&current, URL_PREVIEW_LEN)
                    );
                    return (CleanResult::blocked(current), stats);
                }
                Err(e) => {
                    // rawRules 破坏了URL结构，放弃全部改动
                    log::warn!(
                        "Clean aborted, returning original URL | Provider: {} | Reason: {} | URL: {}",
                        provider.name(),
                        e,
                        preview_compact(url, URL_PREVIEW_LEN)
                    );
                    return (CleanResult::unchanged(url), stats);
                }
            }
        }

        log::trace!("Clean finished | Modified: {} | {}", modified, stats.summary());
        (CleanResult::finished(current, modified), stats)
    }

    /// 对单个 Provider 执行完整流程
    /// 执行顺序：匹配/例外 → 重定向 → 拦截 → rawRules → 拆解 → 过滤 → 重建
    pub fn apply_provider(
        provider: &CompiledProvider,
        current: &str,
        original: &str,
        include_referral: bool,
        stats: &mut CleanStats,
    ) -> Result<ProviderOutcome, UrlPartsError> {
        if !provider.matches_url(current) {
            return Ok(ProviderOutcome::Skipped);
        }
        stats.record_provider(provider.name());

        if let Some(target) = provider.redirection(current) {
            return Ok(ProviderOutcome::Redirect(target));
        }

        if provider.is_complete_provider() {
            return Ok(ProviderOutcome::Blocked);
        }

        let mut modified = false;
        let raw_cleaned = provider.apply_raw_rules(current);
        if matches!(raw_cleaned, Cow::Owned(_)) && raw_cleaned != current {
            modified = true;
            stats.record_raw_rule_hit();
        }

        let mut parts = UrlParts::parse(&raw_cleaned)?;
        let rules = provider.effective_rules(include_referral);
        let mut removed = 0;

        if let Some(query) = parts.query.take() {
            let before = query.len();
            let filtered = filter_params(query, &rules);
            removed += before - filtered.len();
            parts.query = Some(filtered);
        }

        parts.fragment = match parts.fragment.take() {
            Some(Fragment::Params(params)) => {
                let before = params.len();
                let filtered = filter_params(params, &rules);
                removed += before - filtered.len();
                Some(Fragment::Params(filtered))
            }
            other => other,
        };
        stats.record_removed_fields(removed);

        let rebuilt = parts.compose();
        if rebuilt != original {
            modified = true;
        }

        Ok(ProviderOutcome::Continue {
            url: rebuilt,
            modified,
        })
    }
}

/// 快速拒绝：空串、无法解析为绝对URL、data:/javascript: 协议
/// 仅用于避免无意义的处理，不做严格校验
pub fn is_cleanable(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    match Url::parse(url) {
        Ok(parsed) => !matches!(parsed.scheme(), "data" | "javascript"),
        Err(_) => false,
    }
}
