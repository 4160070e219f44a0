//! 支付会话状态机
//!
//! 支付页的核心逻辑：一个倒计时驱动的小状态机。
//! UI 层只负责每秒调用一次 [`PaymentSession::tick`] 并按
//! 当前相位渲染；所有转移规则集中在这里，可离线测试。

/// 支付会话相位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentPhase {
    /// 初始相位，倒计时运行中，可发起支付
    Pending,
    /// 支付请求已发出，等待后端确认
    Processing,
    /// 终态：支付成功（倒计时失效）
    Succeeded,
    /// 终态：倒计时归零且未支付成功
    Expired,
}

/// 单次支付会话
///
/// 转移规则：
/// - `tick`: Pending/Processing 下每秒递减，归零时进入 Expired（恰好触发一次）
/// - `begin_payment`: Pending -> Processing
/// - `confirm_success`: Processing -> Succeeded（终态）
/// - `confirm_failure`: Processing -> Pending（可重试，除非已过期）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSession {
    phase: PaymentPhase,
    remaining_secs: u32,
}

impl PaymentSession {
    pub fn new(window_secs: u32) -> Self {
        Self {
            phase: PaymentPhase::Pending,
            remaining_secs: window_secs,
        }
    }

    pub fn phase(&self) -> PaymentPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// 推进一秒
    ///
    /// 返回 `true` 当且仅当本次调用触发了到期转移；
    /// 终态下调用是无害的空操作（到期只会上报一次）。
    pub fn tick(&mut self) -> bool {
        match self.phase {
            PaymentPhase::Pending | PaymentPhase::Processing => {
                if self.remaining_secs > 0 {
                    self.remaining_secs -= 1;
                }
                if self.remaining_secs == 0 {
                    self.phase = PaymentPhase::Expired;
                    return true;
                }
                false
            }
            PaymentPhase::Succeeded | PaymentPhase::Expired => false,
        }
    }

    /// 用户触发支付动作；仅 Pending 下允许
    pub fn begin_payment(&mut self) -> bool {
        if self.phase == PaymentPhase::Pending {
            self.phase = PaymentPhase::Processing;
            true
        } else {
            false
        }
    }

    /// 后端确认支付成功
    pub fn confirm_success(&mut self) {
        if self.phase == PaymentPhase::Processing {
            self.phase = PaymentPhase::Succeeded;
        }
    }

    /// 后端拒绝本次支付，回到可重试状态
    ///
    /// 若响应返回前倒计时已归零，保持 Expired 不变。
    pub fn confirm_failure(&mut self) {
        if self.phase == PaymentPhase::Processing {
            self.phase = PaymentPhase::Pending;
        }
    }

    /// 支付按钮是否可用
    pub fn can_pay(&self) -> bool {
        self.phase == PaymentPhase::Pending && self.remaining_secs > 0
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, PaymentPhase::Succeeded | PaymentPhase::Expired)
    }
}

/// 把剩余秒数格式化为 `M:SS`（秒补零到两位）
pub fn format_countdown(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests;
