use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::sync::{Arc, RwLock};

/// 模式锚定方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternAnchor {
    /// 整名锚定，用于字段名规则（rules/referralMarketing）
    Field,
    /// 不锚定，在整个URL中任意位置匹配（urlPattern/exceptions/rawRules/redirections）
    Anywhere,
}

/// 全局正则缓存类型定义
/// Key: (原始模式字符串, 锚定方式)
/// Value: 编译后的正则Arc（避免重复编译，规则库中大量模式重复出现）
type RegexCacheKey = (Arc<str>, PatternAnchor);
pub static REGEX_CACHE: Lazy<RwLock<FxHashMap<RegexCacheKey, Arc<Regex>>>> =
    Lazy::new(|| RwLock::new(FxHashMap::default()));

/// 编译后的匹配器
/// 核心特性：
/// 1. 一律忽略大小写
/// 2. 构建期编译，编译失败直接返回错误，不回退
/// 3. 全局正则缓存共享
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: Arc<str>,
    anchor: PatternAnchor,
    regex: Arc<Regex>,
}

impl Matcher {
    /// 编译匹配器（读锁查缓存 → 未命中则编译并写入缓存）
    pub fn compile(pattern: &str, anchor: PatternAnchor) -> Result<Self, regex::Error> {
        let pattern: Arc<str> = Arc::from(pattern);
        let cache_key = (pattern.clone(), anchor);

        let cached = REGEX_CACHE
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&cache_key)
            .cloned();

        let regex = match cached {
            Some(re) => re,
            None => {
                // 编译失败的模式不写入缓存
                let re = Arc::new(Self::compile_regex(&pattern, anchor)?);
                let mut cache_write = REGEX_CACHE
                    .write()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                cache_write.entry(cache_key).or_insert(re).clone()
            }
        };

        Ok(Self {
            pattern,
            anchor,
            regex,
        })
    }

    fn compile_regex(pattern: &str, anchor: PatternAnchor) -> Result<Regex, regex::Error> {
        let source: Cow<'_, str> = match anchor {
            PatternAnchor::Field => Cow::Owned(format!("^(?:{})$", pattern)),
            PatternAnchor::Anywhere => Cow::Borrowed(pattern),
        };
        RegexBuilder::new(&source).case_insensitive(true).build()
    }

    /// 原始模式字符串（未加锚点）
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn anchor(&self) -> PatternAnchor {
        self.anchor
    }

    /// 捕获组数量（不含整体匹配组0）
    pub fn capture_groups(&self) -> usize {
        self.regex.captures_len().saturating_sub(1)
    }

    #[inline(always)]
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// 首个匹配的第一个捕获组
    /// 捕获组未参与匹配时返回 None
    pub fn find_capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// 全局删除所有不重叠的匹配
    /// 无匹配时返回 Borrowed（零拷贝）
    pub fn remove_all<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.regex.replace_all(text, "")
    }

    /// 描述匹配器规则（用于日志/调试输出）
    pub fn describe(&self) -> String {
        match self.anchor {
            PatternAnchor::Field => format!("field: {}", self.pattern),
            PatternAnchor::Anywhere => format!("anywhere: {}", self.pattern),
        }
    }
}
