use std::borrow::Cow;

/// 有序参数表（查询串/类查询片段）
/// 1. 保持字段首次出现的位置
/// 2. 重复字段以最后一次出现的值为准
/// 3. 名称与值均已百分号解码（`+` 视为空格）
/// 4. 无 `=` 的字段值为 None，重建时不补 `=`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    entries: Vec<(String, Option<String>)>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解析 `a=1&b=2` 形式的字符串，空段跳过
    pub fn parse(input: &str) -> Self {
        let mut map = Self::new();
        for segment in input.split('&').filter(|s| !s.is_empty()) {
            match segment.split_once('=') {
                Some((name, value)) => map.insert(decode_component(name), Some(decode_component(value))),
                None => map.insert(decode_component(segment), None),
            }
        }
        map
    }

    /// 插入字段：已存在则原位覆盖值
    pub fn insert(&mut self, name: String, value: Option<String>) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| existing != name);
        self.entries.len() != before
    }

    /// 字段名快照（按原始顺序），遍历期间可安全删除
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// 按 RFC 3986 非保留字符规则重新编码并拼接
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (idx, (name, value)) in self.entries.iter().enumerate() {
            if idx > 0 {
                out.push('&');
            }
            out.push_str(&urlencoding::encode(name));
            if let Some(value) = value {
                out.push('=');
                out.push_str(&urlencoding::encode(value));
            }
        }
        out
    }
}

/// 百分号解码，`+` 转空格；非法 UTF-8 按有损方式解码
fn decode_component(raw: &str) -> String {
    let raw: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order() {
        let map = ParamMap::parse("b=2&a=1&c=3");
        assert_eq!(map.keys(), vec!["b", "a", "c"]);
        assert_eq!(map.to_query_string(), "b=2&a=1&c=3");
    }

    #[test]
    fn test_duplicate_last_wins_at_first_position() {
        let map = ParamMap::parse("a=1&b=2&a=3");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(Some("3")));
        assert_eq!(map.to_query_string(), "a=3&b=2");
    }

    #[test]
    fn test_valueless_field_and_empty_segments() {
        let map = ParamMap::parse("flag&&x=&y=1");
        assert_eq!(map.get("flag"), Some(None));
        assert_eq!(map.get("x"), Some(Some("")));
        assert_eq!(map.to_query_string(), "flag&x=&y=1");
    }

    #[test]
    fn test_decode_and_reencode() {
        let map = ParamMap::parse("q=hello+world&u=https%3A%2F%2Fexample.com&k=a%20b~c");
        assert_eq!(map.get("q"), Some(Some("hello world")));
        assert_eq!(map.get("u"), Some(Some("https://example.com")));
        // 非保留字符 `~` 原样保留，空格编码为 %20
        assert_eq!(
            map.to_query_string(),
            "q=hello%20world&u=https%3A%2F%2Fexample.com&k=a%20b~c"
        );
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let map = ParamMap::parse("x=%FF");
        assert_eq!(map.get("x"), Some(Some("\u{FFFD}")));
    }

    #[test]
    fn test_remove() {
        let mut map = ParamMap::parse("a=1&b=2");
        assert!(map.remove("a"));
        assert!(!map.remove("a"));
        assert!(!map.contains("a"));
        assert_eq!(map.to_query_string(), "b=2");
    }
}
