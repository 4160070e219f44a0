//! HTTP 客户端适配层
//!
//! 在 `gloo_net` 之上做一层薄封装：拼接 base 路径、
//! 按请求自动附加 bearer 凭证、统一解析错误响应体。
//!
//! 适配层本身不处理 401/403 —— 对认证失败的解释
//! （登出、跳转等）由各调用方按场景决定。

use gloo_net::http::{Request, RequestBuilder};

use connectapark_shared::protocol::{ApiRequest, HttpMethod};

use crate::session;

/// API 请求错误
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 网络层失败（请求未到达或无响应）
    Network(String),
    /// 响应解析失败
    Decode(String),
    /// 非 2xx 响应；`message` 为后端提供的人类可读信息（若有）
    Status { status: u16, message: Option<String> },
}

impl ApiError {
    /// HTTP 状态码（网络/解析错误时为 None）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 是否为认证失败（401/403，统一视为凭证失效）
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// 后端提供的错误信息
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// 后端信息，缺失时回退到给定文案
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Decode(msg) => write!(f, "response decode error: {msg}"),
            ApiError::Status { status, message } => match message {
                Some(m) => write!(f, "HTTP {status}: {m}"),
                None => write!(f, "HTTP {status}"),
            },
        }
    }
}

/// 从错误响应体提取 `message` 字段
///
/// 兼容后端校验器的两种形态：单个字符串，或字符串数组
/// （数组用 ", " 拼接后原样展示给用户）。
fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

/// 轻量 API 客户端
///
/// 无状态（只持有 base 路径），可廉价克隆；
/// 通过 Context 注入，测试中可替换 base_url。
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url("/api")
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 发送一个类型化请求
    ///
    /// 每次调用都重新读取会话存储中的凭证并附加为
    /// `Authorization: Bearer` 头（若存在）。
    pub async fn send<R: ApiRequest>(&self, req: &R) -> Result<R::Response, ApiError> {
        let url = format!("{}{}", self.base_url, req.path());

        let mut builder: RequestBuilder = match R::METHOD {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
        };

        let query = req.query();
        if !query.is_empty() {
            builder = builder.query(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        if let Some(token) = session::stored_token() {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let response = if R::HAS_BODY {
            builder
                .json(req)
                .map_err(|e| ApiError::Decode(e.to_string()))?
                .send()
                .await
        } else {
            builder.send().await
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let message = match response.text().await {
                Ok(body) => extract_server_message(&body),
                Err(_) => None,
            };
            return Err(ApiError::Status { status, message });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        // 空响应体（204 / 无内容的确认端点）按 JSON null 解析，
        // 使 `type Response = ()` 的端点无需特判。
        let body = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str::<R::Response>(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> ApiClient {
    leptos::prelude::use_context::<ApiClient>().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_plain_string_message() {
        let body = r#"{"message": "Invalid credentials", "statusCode": 401}"#;
        assert_eq!(
            extract_server_message(body),
            Some("Invalid credentials".to_string())
        );
    }

    #[test]
    fn joins_message_arrays_with_commas() {
        let body = r#"{"message": ["email must be an email", "password too short"]}"#;
        assert_eq!(
            extract_server_message(body),
            Some("email must be an email, password too short".to_string())
        );
    }

    #[test]
    fn missing_or_malformed_message_yields_none() {
        assert_eq!(extract_server_message("not json"), None);
        assert_eq!(extract_server_message(r#"{"error": "x"}"#), None);
        assert_eq!(extract_server_message(r#"{"message": 42}"#), None);
        assert_eq!(extract_server_message(r#"{"message": []}"#), None);
    }

    #[test]
    fn auth_failure_covers_401_and_403_only() {
        let unauthorized = ApiError::Status {
            status: 401,
            message: None,
        };
        let forbidden = ApiError::Status {
            status: 403,
            message: None,
        };
        let conflict = ApiError::Status {
            status: 409,
            message: None,
        };
        assert!(unauthorized.is_auth_failure());
        assert!(forbidden.is_auth_failure());
        assert!(!conflict.is_auth_failure());
        assert!(!ApiError::Network("offline".to_string()).is_auth_failure());
    }

    #[test]
    fn message_or_falls_back_when_server_is_silent() {
        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.message_or("Login failed."), "Login failed.");

        let err = ApiError::Status {
            status: 401,
            message: Some("Invalid credentials".to_string()),
        };
        assert_eq!(err.message_or("Login failed."), "Invalid credentials");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        assert_eq!(
            ApiClient::with_base_url("/api/"),
            ApiClient::with_base_url("/api")
        );
    }
}
