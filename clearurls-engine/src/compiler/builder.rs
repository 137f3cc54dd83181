use std::time::Instant;

use crate::{
    compiler::{
        library::CompiledRuleLibrary,
        matcher::{Matcher, PatternAnchor},
        CompiledProvider,
    },
    core::{ProviderRule, RuleLibrary},
    CoreError, CoreResult,
};

/// Provider 编译器
/// 核心职责：
/// 1. 校验原始规则（urlPattern 非空、重定向规则带捕获组）
/// 2. 按作用域选择锚定方式并编译全部模式
/// 3. 任一模式失败即整体失败，不跳过不降级
pub struct ProviderCompiler;

impl ProviderCompiler {
    /// 编译单个 Provider
    pub fn compile(rule: &ProviderRule) -> CoreResult<CompiledProvider> {
        if rule.url_pattern.trim().is_empty() {
            return Err(CoreError::EmptyUrlPattern {
                provider: rule.name.clone(),
            });
        }

        let url_pattern = Self::compile_one(&rule.name, &rule.url_pattern, PatternAnchor::Anywhere)?;
        let rules = Self::compile_all(&rule.name, &rule.rules, PatternAnchor::Field)?;
        let raw_rules = Self::compile_all(&rule.name, &rule.raw_rules, PatternAnchor::Anywhere)?;
        let referral_marketing =
            Self::compile_all(&rule.name, &rule.referral_marketing, PatternAnchor::Field)?;
        let exceptions = Self::compile_all(&rule.name, &rule.exceptions, PatternAnchor::Anywhere)?;
        let redirections =
            Self::compile_all(&rule.name, &rule.redirections, PatternAnchor::Anywhere)?;

        if let Some(bad) = redirections.iter().find(|r| r.capture_groups() == 0) {
            return Err(CoreError::InvalidRedirection {
                provider: rule.name.clone(),
                pattern: bad.pattern().to_string(),
            });
        }

        Ok(CompiledProvider {
            name: rule.name.clone(),
            url_pattern,
            complete_provider: rule.complete_provider,
            force_redirection: rule.force_redirection,
            rules,
            raw_rules,
            referral_marketing,
            exceptions,
            redirections,
        })
    }

    /// 编译整个规则库（保持 Provider 顺序）
    pub fn compile_library(rule_lib: &RuleLibrary) -> CoreResult<CompiledRuleLibrary> {
        let start = Instant::now();

        let providers = rule_lib
            .providers
            .iter()
            .map(Self::compile)
            .collect::<CoreResult<Vec<_>>>()?;
        let compiled = CompiledRuleLibrary::new(providers);

        log::debug!(
            "Rule library compiled | Providers: {} | Patterns: {} | Time: {}ms",
            compiled.len(),
            compiled.pattern_count(),
            start.elapsed().as_millis()
        );

        Ok(compiled)
    }

    fn compile_all(
        provider: &str,
        patterns: &[String],
        anchor: PatternAnchor,
    ) -> CoreResult<Vec<Matcher>> {
        patterns
            .iter()
            .map(|pattern| Self::compile_one(provider, pattern, anchor))
            .collect()
    }

    fn compile_one(provider: &str, pattern: &str, anchor: PatternAnchor) -> CoreResult<Matcher> {
        Matcher::compile(pattern, anchor).map_err(|source| CoreError::RegexCompileError {
            provider: provider.to_string(),
            pattern: pattern.to_string(),
            source,
        })
    }
}
