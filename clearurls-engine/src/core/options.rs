use serde::{Deserialize, Serialize};

/// 单次清洗调用的参数
/// 每次调用显式传入，清洗过程中只读取一次，保证同一调用内各 Provider 看到一致的值
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanOptions {
    /// 是否保留推广返利参数（true=保留，false=按 referralMarketing 规则移除）
    pub allow_referral_marketing: bool,
}

impl CleanOptions {
    pub fn new(allow_referral_marketing: bool) -> Self {
        Self {
            allow_referral_marketing,
        }
    }

    /// 是否需要追加 referralMarketing 规则
    #[inline(always)]
    pub fn include_referral_rules(&self) -> bool {
        !self.allow_referral_marketing
    }
}
