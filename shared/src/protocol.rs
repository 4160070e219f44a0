use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{SPACES_PAGE_SIZE, Space, Ticket, UserProfile};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// 每个端点由一个请求类型描述：方法、路径、查询参数、
/// 是否携带 JSON body，以及成功时的响应类型。
/// HTTP 客户端据此泛型地构造并解析请求。
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path suffix (appended to the API base path).
    const PATH: &'static str;
    /// Whether the request serializes itself as a JSON body.
    const HAS_BODY: bool = false;

    /// 实际请求路径；带路径参数的端点覆写此方法
    fn path(&self) -> String {
        Self::PATH.to_string()
    }

    /// 附加的查询参数
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

// =========================================================
// 认证 (Auth)
// =========================================================

/// POST /auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/auth/login";
    const HAS_BODY: bool = true;
}

/// POST /auth/register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ApiRequest for RegisterRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/auth/register";
    const HAS_BODY: bool = true;
}

/// GET /auth/profile（需要 bearer）
#[derive(Debug, Clone, Serialize)]
pub struct ProfileRequest;

impl ApiRequest for ProfileRequest {
    type Response = UserProfile;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/auth/profile";
}

/// 后端用于确认类操作的通用响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// POST /auth/forgot-password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ApiRequest for ForgotPasswordRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/auth/forgot-password";
    const HAS_BODY: bool = true;
}

/// POST /auth/reset-password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

impl ApiRequest for ResetPasswordRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/auth/reset-password";
    const HAS_BODY: bool = true;
}

// =========================================================
// 车位 (Spaces)
// =========================================================

/// GET /spaces?page_size=100
#[derive(Debug, Clone, Serialize)]
pub struct ListSpacesRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceListResponse {
    pub data: Vec<Space>,
}

impl ApiRequest for ListSpacesRequest {
    type Response = SpaceListResponse;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/spaces";

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("page_size", SPACES_PAGE_SIZE.to_string())]
    }
}

// =========================================================
// 票据 (Tickets)
// =========================================================

/// POST /tickets/reserve
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest {
    pub space_id: String,
    pub vehicle_plate: String,
    pub pre_paid_duration_minutes: u32,
}

/// 预约成功响应
///
/// 字段全部按 Option 解析：`ticket_id` 缺失属于后端契约被破坏，
/// 由调用方当作客户端致命错误处理（区别于 HTTP 失败）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveResponse {
    #[serde(default)]
    pub ticket_id: Option<String>,
    #[serde(default)]
    pub qr_code_url: Option<String>,
    #[serde(default)]
    pub amount_due: Option<f64>,
}

impl ApiRequest for ReserveRequest {
    type Response = ReserveResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/tickets/reserve";
    const HAS_BODY: bool = true;
}

/// POST /tickets/reserve/confirm-payment/:ticketId（模拟支付回调）
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmPaymentRequest {
    #[serde(skip)]
    pub ticket_id: String,
}

impl ApiRequest for ConfirmPaymentRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;
    const PATH: &'static str = "/tickets/reserve/confirm-payment";

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.ticket_id)
    }
}

/// GET /tickets/my（需要 bearer）
#[derive(Debug, Clone, Serialize)]
pub struct MyTicketsRequest;

impl ApiRequest for MyTicketsRequest {
    type Response = Vec<Ticket>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const PATH: &'static str = "/tickets/my";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_payment_path_carries_ticket_id() {
        let req = ConfirmPaymentRequest {
            ticket_id: "tk_42".to_string(),
        };
        assert_eq!(req.path(), "/tickets/reserve/confirm-payment/tk_42");
        assert!(!ConfirmPaymentRequest::HAS_BODY);
    }

    #[test]
    fn list_spaces_requests_fixed_page_size() {
        let req = ListSpacesRequest;
        assert_eq!(req.path(), "/spaces");
        assert_eq!(req.query(), vec![("page_size", "100".to_string())]);
    }

    #[test]
    fn reserve_request_serializes_camel_case() {
        let req = ReserveRequest {
            space_id: "s1".to_string(),
            vehicle_plate: "AB-1234".to_string(),
            pre_paid_duration_minutes: 30,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["spaceId"], "s1");
        assert_eq!(json["vehiclePlate"], "AB-1234");
        assert_eq!(json["prePaidDurationMinutes"], 30);
    }

    #[test]
    fn register_request_omits_absent_name() {
        let req = RegisterRequest {
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
            name: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("name").is_none());
    }

    #[test]
    fn reset_password_uses_backend_field_name() {
        let req = ResetPasswordRequest {
            token: "tok".to_string(),
            new_password: "secret1".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["newPassword"], "secret1");
    }
}
