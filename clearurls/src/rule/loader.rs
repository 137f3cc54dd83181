use std::path::Path;
use std::time::Instant;

use clearurls_engine::{ClearUrlsParser, RuleLibrary};

use crate::error::{ClearUrlsError, ClearUrlsResult};
use crate::{RuleConfig, RuleOrigin};

/// 规则加载器
/// 只负责把规则文档读入内存并解析为 RuleLibrary，不联网、不缓存
#[derive(Debug, Clone, Default)]
pub struct RuleLoader {
    parser: ClearUrlsParser,
}

impl RuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按配置的规则来源同步加载
    pub fn load(&self, config: &RuleConfig) -> ClearUrlsResult<RuleLibrary> {
        match &config.origin {
            RuleOrigin::Embedded => self.load_embedded(),
            RuleOrigin::LocalFile(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    ClearUrlsError::RuleLoadError(format!(
                        "本地规则文件[{}]读取失败: {}",
                        path.display(),
                        e
                    ))
                })?;
                self.parse_bytes(&bytes, path)
            }
            RuleOrigin::Inline(content) => self.parse_str(content),
        }
    }

    /// 异步加载（本地文件走 tokio::fs，其余来源与同步版一致）
    #[cfg(feature = "async-io")]
    pub async fn load_async(&self, config: &RuleConfig) -> ClearUrlsResult<RuleLibrary> {
        match &config.origin {
            RuleOrigin::LocalFile(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|e| {
                    ClearUrlsError::RuleLoadError(format!(
                        "本地规则文件[{}]读取失败: {}",
                        path.display(),
                        e
                    ))
                })?;
                self.parse_bytes(&bytes, path)
            }
            _ => self.load(config),
        }
    }

    /// 内置规则文档
    #[cfg(feature = "embedded-rules")]
    pub fn load_embedded(&self) -> ClearUrlsResult<RuleLibrary> {
        self.parse_str(crate::clearurls_rules::EMBEDDED_RULES_JSON)
    }

    #[cfg(not(feature = "embedded-rules"))]
    pub fn load_embedded(&self) -> ClearUrlsResult<RuleLibrary> {
        Err(ClearUrlsError::FeatureDisabled(
            "embedded-rules feature is disabled, cannot use embedded rule library. Please enable this feature or use local/inline rules.".to_string(),
        ))
    }

    fn parse_str(&self, content: &str) -> ClearUrlsResult<RuleLibrary> {
        Ok(self.parser.parse_to_rule_lib(content)?)
    }

    fn parse_bytes(&self, bytes: &[u8], path: &Path) -> ClearUrlsResult<RuleLibrary> {
        let start = Instant::now();
        let rule_lib = self.parser.parse_bytes_to_rule_lib(bytes)?;
        log::debug!(
            "Local rule file loaded | Path: {} | Providers: {} | Time: {}ms",
            path.display(),
            rule_lib.len(),
            start.elapsed().as_millis()
        );
        Ok(rule_lib)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{"providers": {"site": {"urlPattern": "site\\.example", "rules": ["sid"]}}}"#;

    fn temp_rule_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("clearurls_{}_{}.json", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_inline() {
        let lib = RuleLoader::new().load(&RuleConfig::inline(DOC)).unwrap();
        assert_eq!(lib.len(), 1);
        assert_eq!(lib.providers[0].name, "site");
        assert_eq!(lib.providers[0].rules, vec!["sid"]);
    }

    #[test]
    fn test_load_local_file() {
        let path = temp_rule_file("load_local", DOC);
        let lib = RuleLoader::new().load(&RuleConfig::local_file(&path)).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(lib.len(), 1);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = RuleLoader::new()
            .load(&RuleConfig::local_file("/definitely/not/here/rules.json"))
            .unwrap_err();
        assert!(matches!(err, ClearUrlsError::RuleLoadError(_)));
    }

    #[test]
    fn test_malformed_document_is_build_error() {
        let err = RuleLoader::new().load(&RuleConfig::inline("{ nope")).unwrap_err();
        assert!(matches!(err, ClearUrlsError::RuleBuildError(_)));
    }

    #[cfg(feature = "embedded-rules")]
    #[test]
    fn test_load_embedded() {
        let lib = RuleLoader::new().load(&RuleConfig::embedded()).unwrap();
        assert!(lib.providers.iter().any(|p| p.name == "globalRules"));
        assert!(lib.providers.iter().any(|p| p.name == "google"));
    }

    #[cfg(feature = "async-io")]
    #[tokio::test]
    async fn test_load_async_local_file() {
        let path = temp_rule_file("load_async", DOC);
        let lib = RuleLoader::new()
            .load_async(&RuleConfig::local_file(&path))
            .await
            .unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(lib.providers[0].name, "site");
    }
}
