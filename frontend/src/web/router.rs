//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。
//!
//! 在路径之外，本模块还承载**一次性导航载荷**：
//! 预约草稿与支付上下文只附着在单次跳转的内存中，
//! 刷新或前进后退即丢失，依赖方必须容忍缺失并重定向。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use connectapark_shared::{PaymentContext, ReservationDraft};

use super::route::AppRoute;

/// 附着在单次导航上的临时载荷
#[derive(Debug, Clone, PartialEq)]
pub enum NavState {
    /// 车位列表 -> 预约确认
    Reservation(ReservationDraft),
    /// 预约确认 -> 支付页
    Payment(PaymentContext),
}

/// 获取当前浏览器路径（含查询串，供 token 等参数解析）
fn current_path() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return "/".to_string(),
    };
    let location = window.location();
    let pathname = location.pathname().unwrap_or_else(|_| "/".to_string());
    match location.search() {
        Ok(search) if !search.is_empty() => format!("{pathname}{search}"),
        _ => pathname,
    }
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证检查信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 当前导航的临时载荷（整页刷新即丢失）
    nav_state: RwSignal<Option<NavState>>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        // 初始化当前路由（从 URL 解析）
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            nav_state: RwSignal::new(None),
            is_authenticated,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**（pushState，清空导航载荷）
    pub fn navigate(&self, route: AppRoute) {
        self.apply(route, None, true);
    }

    /// 携带一次性载荷的导航
    pub fn navigate_with_state(&self, route: AppRoute, state: NavState) {
        self.apply(route, Some(state), true);
    }

    /// 重定向（replaceState，不产生历史记录；用于守卫跳转）
    pub fn replace(&self, route: AppRoute) {
        self.apply(route, None, false);
    }

    /// 读取本次导航携带的预约草稿（挂载期快照，不订阅）
    pub fn reservation_state(&self) -> Option<ReservationDraft> {
        match self.nav_state.get_untracked() {
            Some(NavState::Reservation(draft)) => Some(draft),
            _ => None,
        }
    }

    /// 读取本次导航携带的支付上下文（挂载期快照，不订阅）
    pub fn payment_state(&self) -> Option<PaymentContext> {
        match self.nav_state.get_untracked() {
            Some(NavState::Payment(ctx)) => Some(ctx),
            _ => None,
        }
    }

    /// 导航流程：请求 -> 验证(Guard) -> 处理 -> 加载
    fn apply(&self, target_route: AppRoute, state: Option<NavState>, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();

        // --- Step 1: 验证目标路由 ---
        // 如果目标需要认证但用户未认证
        if target_route.requires_auth() && !is_auth {
            log::info!("[router] access denied, redirecting to login");
            self.load(AppRoute::auth_failure_redirect(), None, use_push);
            return;
        }

        // 如果用户已认证但访问登录/注册页，重定向到面板
        if target_route.should_redirect_when_authenticated() && is_auth {
            log::info!("[router] already authenticated, redirecting to dashboard");
            self.load(AppRoute::auth_success_redirect(), None, use_push);
            return;
        }

        // --- Step 2: 加载页面 ---
        self.load(target_route, state, use_push);
    }

    /// 写入 History 并更新信号；载荷先于路由更新，
    /// 保证目标页挂载时快照已就位。
    fn load(&self, route: AppRoute, state: Option<NavState>, use_push: bool) {
        let path = route.to_path();
        if use_push {
            push_history_state(&path);
        } else {
            replace_history_state(&path);
        }
        self.nav_state.set(state);
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let nav_state = self.nav_state;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            let is_auth = is_authenticated.get_untracked();

            // 历史跳转不携带内存载荷，依赖方必须自行守卫
            nav_state.set(None);

            // popstate 时也执行守卫逻辑
            if target_route.requires_auth() && !is_auth {
                let redirect = AppRoute::auth_failure_redirect();
                replace_history_state(&redirect.to_path());
                set_route.set(redirect);
            } else {
                set_route.set(target_route);
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    ///
    /// 登录成功（在登录/注册页）自动进入面板；
    /// 凭证被清除（在受保护页）自动回到登录页。
    /// 守卫跳转一律 replaceState，不在历史中留下被守卫的地址。
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let service = *self;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            if let Some(target) = auth_change_redirect(is_auth, &route) {
                log::info!("[router] auth state changed, redirecting to {target}");
                service.load(target, None, false);
            }
        });
    }
}

/// 认证状态变化后应执行的重定向目标（`None` 表示停留原地）
fn auth_change_redirect(is_auth: bool, route: &AppRoute) -> Option<AppRoute> {
    if is_auth && route.should_redirect_when_authenticated() {
        Some(AppRoute::auth_success_redirect())
    } else if !is_auth && route.requires_auth() {
        Some(AppRoute::auth_failure_redirect())
    } else {
        None
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 应用内链接
///
/// 渲染为 `<a>` 以保留右键/悬停语义，点击时拦截默认行为
/// 走客户端导航。
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    /// 附加的 class
    #[prop(optional, into)]
    class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = to.to_path();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(to.clone());
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logout_on_protected_routes_redirects_to_login() {
        assert_eq!(
            auth_change_redirect(false, &AppRoute::Dashboard),
            Some(AppRoute::Login)
        );
        assert_eq!(
            auth_change_redirect(false, &AppRoute::Parking),
            Some(AppRoute::Login)
        );
        assert_eq!(
            auth_change_redirect(
                false,
                &AppRoute::Payment {
                    ticket_id: "tk_1".to_string()
                }
            ),
            Some(AppRoute::Login)
        );
    }

    #[test]
    fn login_on_auth_pages_redirects_to_dashboard() {
        assert_eq!(
            auth_change_redirect(true, &AppRoute::Login),
            Some(AppRoute::Dashboard)
        );
        assert_eq!(
            auth_change_redirect(true, &AppRoute::Register),
            Some(AppRoute::Dashboard)
        );
    }

    #[test]
    fn stable_states_do_not_redirect() {
        assert_eq!(auth_change_redirect(true, &AppRoute::Parking), None);
        assert_eq!(auth_change_redirect(false, &AppRoute::Login), None);
        assert_eq!(auth_change_redirect(false, &AppRoute::Home), None);
        assert_eq!(
            auth_change_redirect(false, &AppRoute::ResetPassword { token: None }),
            None
        );
    }
}
