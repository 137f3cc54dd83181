use std::fmt::{self, Write};

// ======================== 输出截断工具函数 ========================
/// 空白字符折叠 + 截断 - 零堆分配的日志预览核心函数
/// 逻辑：
/// 1. 遍历字符，连续空白折叠为单个空格（不修改原字符串，仅格式化输出）
/// 2. 超过最大长度时追加省略号并终止
/// 3. 全程无堆分配、无String创建
#[inline(always)]
pub fn preview_compact<'a>(s: &'a str, max_len: usize) -> impl fmt::Display + 'a {
    struct CompactView<'a> {
        source: &'a str,
        max_length: usize,
    }

    impl<'a> fmt::Display for CompactView<'a> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut char_count = 0;
            let mut last_was_whitespace = false;

            for ch in self.source.chars() {
                if char_count >= self.max_length {
                    f.write_char('…')?;
                    break;
                }

                if ch.is_whitespace() {
                    if !last_was_whitespace {
                        f.write_char(' ')?;
                        char_count += 1;
                        last_was_whitespace = true;
                    }
                } else {
                    f.write_char(ch)?;
                    char_count += 1;
                    last_was_whitespace = false;
                }
            }
            Ok(())
        }
    }

    CompactView {
        source: s,
        max_length: max_len,
    }
}

/// 日志中URL预览的默认长度
pub const URL_PREVIEW_LEN: usize = 120;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_is_untouched() {
        assert_eq!(preview_compact("https://x.com/a", 120).to_string(), "https://x.com/a");
    }

    #[test]
    fn test_preview_truncates_and_folds() {
        assert_eq!(preview_compact("ab   cd", 10).to_string(), "ab cd");
        assert_eq!(preview_compact("abcdefgh", 4).to_string(), "abcd…");
    }
}
