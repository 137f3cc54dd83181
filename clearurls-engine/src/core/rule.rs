use serde::{Deserialize, Serialize};

/// 原始 Provider 规则（未编译）
/// 字段命名与 ClearURLs 规则文档保持一致
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRule {
    /// Provider 名称（取自规则文档的键名），仅用于诊断
    #[serde(skip)]
    pub name: String,
    /// 激活该 Provider 的URL模式
    #[serde(default)]
    pub url_pattern: String,
    /// 命中即拦截
    #[serde(default)]
    pub complete_provider: bool,
    /// 字段名规则（整名锚定）
    #[serde(default)]
    pub rules: Vec<String>,
    /// 整串替换删除规则（不锚定）
    #[serde(default)]
    pub raw_rules: Vec<String>,
    /// 推广返利字段规则（整名锚定）
    #[serde(default)]
    pub referral_marketing: Vec<String>,
    /// 例外规则（命中则整体跳过该 Provider）
    #[serde(default)]
    pub exceptions: Vec<String>,
    /// 重定向规则（首个捕获组为编码后的目标URL）
    #[serde(default)]
    pub redirections: Vec<String>,
    /// 保留字段，不参与清洗
    #[serde(default)]
    pub force_redirection: bool,
}

impl ProviderRule {
    pub fn new(name: impl Into<String>, url_pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_pattern: url_pattern.into(),
            ..Self::default()
        }
    }

    pub fn with_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules = rules.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_raw_rules<I, S>(mut self, raw_rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw_rules = raw_rules.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_referral_marketing<I, S>(mut self, referral_marketing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.referral_marketing = referral_marketing.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exceptions<I, S>(mut self, exceptions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exceptions = exceptions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_redirections<I, S>(mut self, redirections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.redirections = redirections.into_iter().map(Into::into).collect();
        self
    }

    pub fn complete(mut self, complete_provider: bool) -> Self {
        self.complete_provider = complete_provider;
        self
    }

    pub fn force_redirection(mut self, force_redirection: bool) -> Self {
        self.force_redirection = force_redirection;
        self
    }
}

/// 规则库：按规则文档顺序排列的 Provider 列表
/// 顺序有语义（清洗按此顺序遍历），因此使用 Vec 而非 Map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleLibrary {
    pub providers: Vec<ProviderRule>,
}

impl RuleLibrary {
    pub fn new(providers: Vec<ProviderRule>) -> Self {
        Self { providers }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
