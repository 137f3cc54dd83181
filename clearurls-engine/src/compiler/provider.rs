use std::borrow::Cow;

use super::matcher::Matcher;

/// 编译后的 Provider（不可变，构建后跨调用只读共享）
/// 职责：封装单个站点/规则类别的全部匹配模式
#[derive(Debug, Clone)]
pub struct CompiledProvider {
    /// Provider 名称，仅用于诊断
    pub(crate) name: String,
    pub(crate) url_pattern: Matcher,
    pub(crate) complete_provider: bool,
    pub(crate) force_redirection: bool,
    pub(crate) rules: Vec<Matcher>,
    pub(crate) raw_rules: Vec<Matcher>,
    pub(crate) referral_marketing: Vec<Matcher>,
    pub(crate) exceptions: Vec<Matcher>,
    pub(crate) redirections: Vec<Matcher>,
}

impl CompiledProvider {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_complete_provider(&self) -> bool {
        self.complete_provider
    }

    /// 保留字段，清洗流程不读取
    pub fn is_force_redirection(&self) -> bool {
        self.force_redirection
    }

    pub fn rules(&self) -> &[Matcher] {
        &self.rules
    }

    pub fn raw_rules(&self) -> &[Matcher] {
        &self.raw_rules
    }

    pub fn referral_marketing(&self) -> &[Matcher] {
        &self.referral_marketing
    }

    pub fn exceptions(&self) -> &[Matcher] {
        &self.exceptions
    }

    pub fn redirections(&self) -> &[Matcher] {
        &self.redirections
    }

    /// 模式总数（含 urlPattern）
    pub fn pattern_count(&self) -> usize {
        1 + self.rules.len()
            + self.raw_rules.len()
            + self.referral_marketing.len()
            + self.exceptions.len()
            + self.redirections.len()
    }

    /// urlPattern 命中且没有任何例外命中
    /// urlPattern 未命中时不再评估例外
    #[inline]
    pub fn matches_url(&self, url: &str) -> bool {
        self.url_pattern.matches(url) && !self.is_exception(url)
    }

    #[inline]
    fn is_exception(&self, url: &str) -> bool {
        self.exceptions.iter().any(|exception| exception.matches(url))
    }

    /// 按顺序尝试重定向规则，首个命中的规则决定结果
    /// 捕获内容经百分号解码后返回；捕获组缺失或解码失败返回 None
    pub fn redirection(&self, url: &str) -> Option<String> {
        for redirection in &self.redirections {
            if !redirection.matches(url) {
                continue;
            }

            let captured = redirection.find_capture(url)?;
            return match urlencoding::decode(captured) {
                Ok(target) => Some(target.into_owned()),
                Err(e) => {
                    log::warn!(
                        "Redirection target is not valid UTF-8 | Provider: {} | Rule: {} | Error: {}",
                        self.name,
                        redirection.describe(),
                        e
                    );
                    None
                }
            };
        }
        None
    }

    /// 当前调用生效的字段规则：rules 在前，referralMarketing 追加在后
    pub fn effective_rules(&self, include_referral: bool) -> Vec<&Matcher> {
        let mut effective = Vec::with_capacity(
            self.rules.len()
                + if include_referral {
                    self.referral_marketing.len()
                } else {
                    0
                },
        );
        effective.extend(self.rules.iter());
        if include_referral {
            effective.extend(self.referral_marketing.iter());
        }
        effective
    }

    /// 依次应用 rawRules 全局删除
    /// 任何规则都未改动时返回 Borrowed
    pub fn apply_raw_rules<'a>(&self, url: &'a str) -> Cow<'a, str> {
        let mut current = Cow::Borrowed(url);
        for raw_rule in &self.raw_rules {
            let removed = match raw_rule.remove_all(&current) {
                Cow::Owned(removed) => Some(removed),
                Cow::Borrowed(_) => None,
            };
            if let Some(removed) = removed {
                current = Cow::Owned(removed);
            }
        }
        current
    }
}
