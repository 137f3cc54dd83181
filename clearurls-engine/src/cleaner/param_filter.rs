use crate::{compiler::Matcher, url_parts::ParamMap};

/// 参数过滤：任一规则命中字段名即移除该字段
/// 基于字段名快照遍历，删除过程中不会漏项
pub fn filter_params(mut fields: ParamMap, rules: &[&Matcher]) -> ParamMap {
    for name in fields.keys() {
        if rules.iter().any(|rule| rule.matches(&name)) {
            fields.remove(&name);
        }
    }
    fields
}
