use serde::{Deserialize, Serialize};

/// 单次清洗结果
/// 约束：was_blocked 与 was_redirected 至多一个为 true
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanResult {
    /// 最终输出的URL
    pub url: String,
    /// 输出与输入在文本上是否不同
    pub was_modified: bool,
    /// 命中 completeProvider，URL 被拦截
    pub was_blocked: bool,
    /// 命中重定向规则，url 为提取出的目标地址
    pub was_redirected: bool,
}

impl CleanResult {
    /// 原样返回（无效输入/中止清洗）
    pub fn unchanged(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            was_modified: false,
            was_blocked: false,
            was_redirected: false,
        }
    }

    /// 重定向到提取出的目标URL
    pub fn redirected(target: impl Into<String>) -> Self {
        Self {
            url: target.into(),
            was_modified: true,
            was_blocked: false,
            was_redirected: true,
        }
    }

    /// 被 completeProvider 拦截，URL 原样返回
    pub fn blocked(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            was_modified: false,
            was_blocked: true,
            was_redirected: false,
        }
    }

    /// 全部 Provider 处理完毕的正常结果
    pub fn finished(url: impl Into<String>, was_modified: bool) -> Self {
        Self {
            url: url.into(),
            was_modified,
            was_blocked: false,
            was_redirected: false,
        }
    }
}
