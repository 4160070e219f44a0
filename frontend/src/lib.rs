//! ConnectAPark 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎，含一次性导航载荷）
//! - `session`: 登录凭证状态管理
//! - `api`: HTTP 客户端适配层
//! - `components`: UI 组件层

mod api;
mod components {
    pub mod dashboard;
    pub mod forgot_password;
    pub mod home;
    pub mod layout;
    pub mod login;
    pub mod parking_lot;
    pub mod payment;
    pub mod register;
    pub mod reserve_confirm;
    pub mod reset_password;
}
mod session;

use leptos::prelude::*;

// 浏览器环境封装模块
pub(crate) mod web {
    pub mod route;
    pub mod router;
}

use crate::api::ApiClient;
use crate::components::dashboard::DashboardPage;
use crate::components::forgot_password::ForgotPasswordPage;
use crate::components::home::HomePage;
use crate::components::layout::MainLayout;
use crate::components::login::LoginPage;
use crate::components::parking_lot::ParkingLotPage;
use crate::components::payment::PaymentPage;
use crate::components::register::RegisterPage;
use crate::components::reserve_confirm::ReserveConfirmPage;
use crate::components::reset_password::ResetPasswordPage;
use crate::session::SessionContext;
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件；
/// 已认证分组统一包在 MainLayout（带导航栏）内。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::ForgotPassword => view! { <ForgotPasswordPage /> }.into_any(),
        AppRoute::ResetPassword { token } => {
            view! { <ResetPasswordPage token=token /> }.into_any()
        }
        AppRoute::Dashboard => view! {
            <MainLayout>
                <DashboardPage />
            </MainLayout>
        }
        .into_any(),
        AppRoute::Parking => view! {
            <MainLayout>
                <ParkingLotPage />
            </MainLayout>
        }
        .into_any(),
        AppRoute::ReserveConfirm => view! {
            <MainLayout>
                <ReserveConfirmPage />
            </MainLayout>
        }
        .into_any(),
        AppRoute::Payment { ticket_id } => view! {
            <MainLayout>
                <PaymentPage ticket_id=ticket_id />
            </MainLayout>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="min-h-screen flex items-center justify-center bg-gray-900 text-white">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-red-500">"404"</h1>
                    <p class="text-xl mt-4 text-gray-300">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文（从 LocalStorage 恢复凭证）
    let session = SessionContext::new();
    provide_context(session);

    // 2. HTTP 客户端（可注入，便于测试替换 base_url）
    provide_context(ApiClient::new());

    // 3. 认证信号注入路由服务，实现守卫与解耦
    let is_authenticated = session.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
