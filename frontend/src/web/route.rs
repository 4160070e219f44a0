//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 欢迎页 (默认路由)
    #[default]
    Home,
    /// 登录页面
    Login,
    /// 注册页面
    Register,
    /// 找回密码（请求重置链接）
    ForgotPassword,
    /// 重置密码；token 来自 URL 查询串，缺失时页面渲染错误态
    ResetPassword { token: Option<String> },
    /// 个人票据面板 (需要认证)
    Dashboard,
    /// 车位列表 (需要认证)
    Parking,
    /// 预约确认 (需要认证；依赖导航载荷)
    ReserveConfirm,
    /// 支付页 (需要认证；路径携带票据 id)
    Payment { ticket_id: String },
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL（path 与可选的查询串）解析为路由枚举
    pub fn from_path(path_and_query: &str) -> Self {
        let (path, query) = match path_and_query.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path_and_query, None),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["forgot-password"] => Self::ForgotPassword,
            ["reset-password"] => Self::ResetPassword {
                token: query.and_then(|q| query_param(q, "token")),
            },
            ["dashboard"] => Self::Dashboard,
            ["parking"] => Self::Parking,
            ["reserve-confirm"] => Self::ReserveConfirm,
            ["payment", ticket_id] => Self::Payment {
                ticket_id: (*ticket_id).to_string(),
            },
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path（含必要的查询串）
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::ForgotPassword => "/forgot-password".to_string(),
            Self::ResetPassword { token } => match token {
                Some(token) => format!("/reset-password?token={token}"),
                None => "/reset-password".to_string(),
            },
            Self::Dashboard => "/dashboard".to_string(),
            Self::Parking => "/parking".to_string(),
            Self::ReserveConfirm => "/reserve-confirm".to_string(),
            Self::Payment { ticket_id } => format!("/payment/{ticket_id}"),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Parking | Self::ReserveConfirm | Self::Payment { .. }
        )
    }

    /// 定义已认证用户是否应该离开此路由（如登录/注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录/注册页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 从查询串中取出指定参数的值
fn query_param(query: &str, key: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == key && !v.is_empty() {
            Some(v.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_static_routes() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/register"), AppRoute::Register);
        assert_eq!(
            AppRoute::from_path("/forgot-password"),
            AppRoute::ForgotPassword
        );
        assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/parking"), AppRoute::Parking);
        assert_eq!(
            AppRoute::from_path("/reserve-confirm"),
            AppRoute::ReserveConfirm
        );
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/payment"), AppRoute::NotFound);
    }

    #[test]
    fn parses_payment_ticket_id() {
        assert_eq!(
            AppRoute::from_path("/payment/tk_42"),
            AppRoute::Payment {
                ticket_id: "tk_42".to_string()
            }
        );
    }

    #[test]
    fn parses_reset_token_from_query() {
        assert_eq!(
            AppRoute::from_path("/reset-password?token=abc123"),
            AppRoute::ResetPassword {
                token: Some("abc123".to_string())
            }
        );
        assert_eq!(
            AppRoute::from_path("/reset-password"),
            AppRoute::ResetPassword { token: None }
        );
        assert_eq!(
            AppRoute::from_path("/reset-password?token="),
            AppRoute::ResetPassword { token: None }
        );
        assert_eq!(
            AppRoute::from_path("/reset-password?foo=1&token=t9"),
            AppRoute::ResetPassword {
                token: Some("t9".to_string())
            }
        );
    }

    #[test]
    fn path_round_trips() {
        let routes = vec![
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::ForgotPassword,
            AppRoute::ResetPassword {
                token: Some("tok".to_string()),
            },
            AppRoute::Dashboard,
            AppRoute::Parking,
            AppRoute::ReserveConfirm,
            AppRoute::Payment {
                ticket_id: "tk_1".to_string(),
            },
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn auth_guard_covers_the_authenticated_group() {
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(AppRoute::Parking.requires_auth());
        assert!(AppRoute::ReserveConfirm.requires_auth());
        assert!(
            AppRoute::Payment {
                ticket_id: "x".to_string()
            }
            .requires_auth()
        );

        assert!(!AppRoute::Home.requires_auth());
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::ForgotPassword.requires_auth());
        assert!(!AppRoute::ResetPassword { token: None }.requires_auth());
    }

    #[test]
    fn authenticated_users_leave_login_and_register() {
        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(AppRoute::Register.should_redirect_when_authenticated());
        assert!(!AppRoute::Home.should_redirect_when_authenticated());
        assert!(!AppRoute::Parking.should_redirect_when_authenticated());
    }
}
