//! 全局规则配置管理

use std::path::PathBuf;

use clearurls_engine::CleanOptions;
use serde::{Deserialize, Serialize};

/// 规则来源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleOrigin {
    Embedded,           // 内置规则（编译期 embed）
    LocalFile(PathBuf), // 本地 ClearURLs 规则文件（运行时）
    Inline(String),     // 调用方直接提供的规则文档内容
}

/// 核心规则选项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    /// 是否保留推广返利参数（构建时的初始值，之后可通过 setter 修改）
    pub allow_referral_marketing: bool,
}

impl RuleOptions {
    pub fn clean_options(&self) -> CleanOptions {
        CleanOptions::new(self.allow_referral_marketing)
    }
}

/// 完整规则配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub origin: RuleOrigin,
    pub options: RuleOptions,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            origin: RuleOrigin::Embedded,
            options: RuleOptions::default(),
        }
    }
}

impl RuleConfig {
    /// 内置规则
    pub fn embedded() -> Self {
        Self::default()
    }

    /// 本地规则文件
    pub fn local_file(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: RuleOrigin::LocalFile(path.into()),
            options: RuleOptions::default(),
        }
    }

    /// 内联规则文档（ClearURLs JSON 格式）
    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            origin: RuleOrigin::Inline(content.into()),
            options: RuleOptions::default(),
        }
    }
}

/// 自定义构建器（链式 API）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: RuleConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: RuleOrigin) -> Self {
        self.config.origin = origin;
        self
    }

    pub fn allow_referral_marketing(mut self, allow: bool) -> Self {
        self.config.options.allow_referral_marketing = allow;
        self
    }

    pub fn build(self) -> RuleConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_embedded_and_strict() {
        let config = RuleConfig::default();
        assert_eq!(config.origin, RuleOrigin::Embedded);
        assert!(!config.options.allow_referral_marketing);
        assert!(config.options.clean_options().include_referral_rules());
    }

    #[test]
    fn test_builder() {
        let config = CustomConfigBuilder::new()
            .origin(RuleOrigin::LocalFile(PathBuf::from("rules.json")))
            .allow_referral_marketing(true)
            .build();
        assert_eq!(config.origin, RuleOrigin::LocalFile(PathBuf::from("rules.json")));
        assert!(config.options.allow_referral_marketing);
        assert_eq!(RuleConfig::local_file("rules.json").origin, config.origin);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: RuleConfig =
            serde_json::from_str(r#"{"options": {"allow_referral_marketing": true}}"#).unwrap();
        assert_eq!(config.origin, RuleOrigin::Embedded);
        assert!(config.options.allow_referral_marketing);

        let config: RuleConfig = serde_json::from_str(r#"{"origin": {"LocalFile": "rules.json"}}"#).unwrap();
        assert_eq!(config.origin, RuleOrigin::LocalFile(PathBuf::from("rules.json")));
        assert!(!config.options.allow_referral_marketing);
    }
}
