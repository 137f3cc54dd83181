use super::CompiledProvider;

// 编译后规则库
// Provider 顺序与规则文档一致，清洗时按此顺序遍历
#[derive(Debug, Clone, Default)]
pub struct CompiledRuleLibrary {
    pub providers: Vec<CompiledProvider>,
}

impl CompiledRuleLibrary {
    pub fn new(providers: Vec<CompiledProvider>) -> Self {
        Self { providers }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// 全部 Provider 的模式总数
    pub fn pattern_count(&self) -> usize {
        self.providers.iter().map(CompiledProvider::pattern_count).sum()
    }

    pub fn provider(&self, name: &str) -> Option<&CompiledProvider> {
        self.providers.iter().find(|p| p.name() == name)
    }
}
