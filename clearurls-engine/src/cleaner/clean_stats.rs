//! 负责单次清洗统计数据的定义与更新

/// 单次清洗统计信息
/// 记录清洗过程中的各类指标：
/// 1. 命中的 Provider（按处理顺序）
/// 2. 实际改动URL的 rawRules 轮次
/// 3. 被移除的查询/片段字段数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanStats {
    /// 命中并处理的 Provider 名称（含最终重定向/拦截的那个）
    pub matched_providers: Vec<String>,
    /// rawRules 改动URL的 Provider 数
    pub raw_rule_hits: u32,
    /// 移除的字段总数（查询串 + 类查询片段）
    pub removed_fields: u32,
}

impl CleanStats {
    pub fn record_provider(&mut self, name: &str) {
        self.matched_providers.push(name.to_string());
    }

    pub fn record_raw_rule_hit(&mut self) {
        self.raw_rule_hits += 1;
    }

    pub fn record_removed_fields(&mut self, count: usize) {
        self.removed_fields += count as u32;
    }

    /// 格式化输出统计摘要（用于日志）
    pub fn summary(&self) -> String {
        format!(
            "providers=[{}] raw_rule_hits={} removed_fields={}",
            self.matched_providers.join(", "),
            self.raw_rule_hits,
            self.removed_fields
        )
    }
}
