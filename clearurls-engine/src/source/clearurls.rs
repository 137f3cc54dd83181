use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::{ProviderRule, RuleLibrary};
use crate::{CoreError, CoreResult};

/// ClearURLs 原始规则库
/// `providers` 为 名称 → 规则 的映射，依赖 serde_json 的 preserve_order 保持文档顺序
#[derive(Debug, Clone, Deserialize)]
pub struct ClearUrlsOriginalRuleLibrary {
    pub providers: Map<String, Value>,
}

/// ClearURLs 规则解析器
#[derive(Debug, Clone, Default)]
pub struct ClearUrlsParser;

impl ClearUrlsParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_from_str(&self, content: &str) -> CoreResult<ClearUrlsOriginalRuleLibrary> {
        serde_json::from_str(content)
            .map_err(|e| CoreError::RuleParseError(format!("ClearURLs JSON parse failed: {}", e)))
    }

    pub fn parse_from_bytes(&self, bytes: &[u8]) -> CoreResult<ClearUrlsOriginalRuleLibrary> {
        serde_json::from_slice(bytes)
            .map_err(|e| CoreError::RuleParseError(format!("ClearURLs byte stream parse failed: {}", e)))
    }

    pub fn parse_to_rule_lib(&self, content: &str) -> CoreResult<RuleLibrary> {
        let original = self.parse_from_str(content)?;
        self.convert_original_to_rule_lib(original)
    }

    pub fn parse_bytes_to_rule_lib(&self, bytes: &[u8]) -> CoreResult<RuleLibrary> {
        let original = self.parse_from_bytes(bytes)?;
        self.convert_original_to_rule_lib(original)
    }

    /// 原始规则 → 规则库
    /// 单条 Provider 结构非法即整体失败，不跳过
    pub fn convert_original_to_rule_lib(
        &self,
        original: ClearUrlsOriginalRuleLibrary,
    ) -> CoreResult<RuleLibrary> {
        let providers = original
            .providers
            .into_iter()
            .map(|(name, value)| {
                let mut rule: ProviderRule = serde_json::from_value(value).map_err(|e| {
                    CoreError::RuleParseError(format!("Provider [{}] is malformed: {}", name, e))
                })?;
                rule.name = name;
                Ok(rule)
            })
            .collect::<CoreResult<Vec<_>>>()?;

        log::debug!("ClearURLs rule document parsed | Providers: {}", providers.len());
        Ok(RuleLibrary::new(providers))
    }
}
