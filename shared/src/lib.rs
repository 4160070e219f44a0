//! ConnectAPark 共享领域层
//!
//! 不依赖任何浏览器 API 的纯领域 crate：
//! - 车位 / 停车票的视图模型（镜像后端 JSON）
//! - `protocol`: 类型化的 API 请求/响应契约
//! - `payment`: 支付会话倒计时状态机
//! - `date`: 时间戳展示格式化
//!
//! 所有排序、分组等纯逻辑集中在此，可在原生目标上直接测试。

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub mod date;
pub mod payment;
pub mod protocol;

// =========================================================
// 产品级常量 (Product Constants)
// =========================================================

/// 支付倒计时上限（15 分钟）
pub const PAYMENT_WINDOW_SECS: u32 = 900;

/// 车位列表后台轮询间隔
pub const SPACE_POLL_INTERVAL_MS: u32 = 15_000;

/// 车位列表单页请求上限
pub const SPACES_PAGE_SIZE: u32 = 100;

/// 注册成功后跳转登录页前的停留时间（给用户阅读提示）
pub const REGISTER_REDIRECT_DELAY_SECS: u64 = 2;

/// 重置密码成功后跳转登录页前的停留时间
pub const RESET_REDIRECT_DELAY_SECS: u64 = 3;

/// 支付成功后返回车位列表前的停留时间
pub const PAYMENT_REDIRECT_DELAY_SECS: u64 = 3;

/// 密码最小长度（与后端校验保持一致）
pub const MIN_PASSWORD_LEN: usize = 6;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 车位状态，生命周期完全由后端持有
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpaceStatus {
    Available,
    Reserved,
    Occupied,
    PendingVacate,
}

/// 单个车位的时点快照，每次轮询整体替换
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: String,
    pub code: String,
    pub status: SpaceStatus,
    #[serde(default)]
    pub zone_id: Option<String>,
}

/// 停车票状态
///
/// 后端可能引入新状态，未知值统一落入 `Unknown`，
/// 分组逻辑只依赖 `is_active`，因此新状态默认归入历史票。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Reserved,
    Parked,
    PendingPayment,
    Completed,
    NoShow,
    #[serde(other)]
    Unknown,
}

impl TicketStatus {
    /// 是否属于"进行中"的票（预约中 / 在场 / 待付款）
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            TicketStatus::Reserved | TicketStatus::Parked | TicketStatus::PendingPayment
        )
    }

    /// 展示用的状态文本（与后端枚举字面量一致）
    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Reserved => "RESERVED",
            TicketStatus::Parked => "PARKED",
            TicketStatus::PendingPayment => "PENDING_PAYMENT",
            TicketStatus::Completed => "COMPLETED",
            TicketStatus::NoShow => "NO_SHOW",
            TicketStatus::Unknown => "UNKNOWN",
        }
    }
}

/// 票据中内嵌的车位信息（后端只回传 code）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketSpace {
    pub code: String,
}

/// 停车票视图模型，镜像 `GET /tickets/my` 的元素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub status: TicketStatus,
    pub vehicle_plate: String,
    #[serde(default)]
    pub checkin_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub reservation_start_time: Option<chrono::DateTime<chrono::Utc>>,
    pub space: TicketSpace,
    #[serde(default)]
    pub amount_due: Option<f64>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 当前登录用户档案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl UserProfile {
    /// 展示名：优先昵称，缺省回退到邮箱
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

// =========================================================
// 导航载荷 (Navigation Payloads)
// =========================================================
// 仅存在于单次页面跳转的内存中，刷新即丢失；
// 依赖它们的页面在缺失时必须重定向回车位列表。

/// 车位列表 -> 确认预约 页携带的上下文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub space_id: String,
    pub space_code: String,
}

/// 确认预约 -> 支付 页携带的上下文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentContext {
    pub qr_code_url: String,
    pub amount_due: f64,
    pub space_code: String,
}

/// 预付时长二选一（默认 30 分钟）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrepaidOption {
    #[default]
    HalfHour,
    FullHour,
}

impl PrepaidOption {
    pub fn minutes(&self) -> u32 {
        match self {
            PrepaidOption::HalfHour => 30,
            PrepaidOption::FullHour => 60,
        }
    }

    /// 对应的预付金额（THB）
    pub fn fee(&self) -> u32 {
        match self {
            PrepaidOption::HalfHour => 15,
            PrepaidOption::FullHour => 30,
        }
    }
}

// =========================================================
// 纯逻辑 (Pure Logic)
// =========================================================

/// 车位编号的数字感知比较
///
/// 把编号拆成数字段与非数字段交替比较：数字段按数值比较
/// （先比长度再逐字符，避免大数溢出），其余按字节比较。
/// 保证 "A-2" 排在 "A-10" 之前。
pub fn compare_space_codes(a: &str, b: &str) -> Ordering {
    let ab = a.as_bytes();
    let bb = b.as_bytes();
    let (mut i, mut j) = (0usize, 0usize);

    while i < ab.len() && j < bb.len() {
        if ab[i].is_ascii_digit() && bb[j].is_ascii_digit() {
            let si = i;
            while i < ab.len() && ab[i].is_ascii_digit() {
                i += 1;
            }
            let sj = j;
            while j < bb.len() && bb[j].is_ascii_digit() {
                j += 1;
            }
            let da = a[si..i].trim_start_matches('0');
            let db = b[sj..j].trim_start_matches('0');
            let ord = da.len().cmp(&db.len()).then_with(|| da.cmp(db));
            if ord != Ordering::Equal {
                return ord;
            }
        } else {
            let ord = ab[i].cmp(&bb[j]);
            if ord != Ordering::Equal {
                return ord;
            }
            i += 1;
            j += 1;
        }
    }

    (ab.len() - i).cmp(&(bb.len() - j))
}

/// 按编号升序排序车位列表（展示前调用）
pub fn sort_spaces(spaces: &mut [Space]) {
    spaces.sort_by(|a, b| compare_space_codes(&a.code, &b.code));
}

/// 把票据拆分为 (进行中, 历史) 两组
///
/// 完全由 `status` 决定，每张票恰好落入其中一组。
pub fn partition_tickets(tickets: Vec<Ticket>) -> (Vec<Ticket>, Vec<Ticket>) {
    tickets.into_iter().partition(|t| t.status.is_active())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(code: &str) -> Space {
        Space {
            id: format!("id-{code}"),
            code: code.to_string(),
            status: SpaceStatus::Available,
            zone_id: None,
        }
    }

    fn ticket(id: &str, status: TicketStatus) -> Ticket {
        Ticket {
            id: id.to_string(),
            status,
            vehicle_plate: "AB-1234".to_string(),
            checkin_at: None,
            reservation_start_time: None,
            space: TicketSpace {
                code: "A-01".to_string(),
            },
            amount_due: None,
            created_at: None,
        }
    }

    #[test]
    fn numeric_segments_compare_by_value() {
        assert_eq!(compare_space_codes("A-2", "A-10"), Ordering::Less);
        assert_eq!(compare_space_codes("A-10", "A-2"), Ordering::Greater);
        assert_eq!(compare_space_codes("A-02", "A-2"), Ordering::Equal);
        assert_eq!(compare_space_codes("B-1", "A-9"), Ordering::Greater);
        assert_eq!(compare_space_codes("A-1", "A-1"), Ordering::Equal);
    }

    #[test]
    fn shorter_prefix_sorts_first() {
        assert_eq!(compare_space_codes("A-1", "A-1-1"), Ordering::Less);
        assert_eq!(compare_space_codes("A", "A-1"), Ordering::Less);
    }

    #[test]
    fn sort_spaces_is_non_decreasing_by_code() {
        let mut spaces = vec![space("A-10"), space("A-2"), space("B-1"), space("A-1")];
        sort_spaces(&mut spaces);
        let codes: Vec<&str> = spaces.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["A-1", "A-2", "A-10", "B-1"]);
    }

    #[test]
    fn partition_is_total_and_non_overlapping() {
        let tickets = vec![
            ticket("t1", TicketStatus::Reserved),
            ticket("t2", TicketStatus::Completed),
            ticket("t3", TicketStatus::Parked),
            ticket("t4", TicketStatus::NoShow),
            ticket("t5", TicketStatus::PendingPayment),
            ticket("t6", TicketStatus::Unknown),
        ];
        let total = tickets.len();
        let (active, past) = partition_tickets(tickets);

        assert_eq!(active.len() + past.len(), total);
        assert!(active.iter().all(|t| t.status.is_active()));
        assert!(past.iter().all(|t| !t.status.is_active()));
        let active_ids: Vec<&str> = active.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(active_ids, vec!["t1", "t3", "t5"]);
    }

    #[test]
    fn unknown_status_deserializes_as_catch_all() {
        let json = r#"{
            "id": "t9",
            "status": "CANCELLED",
            "vehiclePlate": "XX-1",
            "space": { "code": "C-3" }
        }"#;
        let t: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(t.status, TicketStatus::Unknown);
        assert!(!t.status.is_active());
    }

    #[test]
    fn prepaid_options_map_to_fixed_fees() {
        assert_eq!(PrepaidOption::default(), PrepaidOption::HalfHour);
        assert_eq!(PrepaidOption::HalfHour.minutes(), 30);
        assert_eq!(PrepaidOption::HalfHour.fee(), 15);
        assert_eq!(PrepaidOption::FullHour.minutes(), 60);
        assert_eq!(PrepaidOption::FullHour.fee(), 30);
    }
}
