//! 会话凭证管理
//!
//! 管理 bearer token 的唯一全局槽位，与路由系统解耦：
//! 路由服务通过注入的认证信号来检查认证状态。
//!
//! LocalStorage 中的持久化键是"是否已登录"的唯一事实来源；
//! 内存信号只是它的响应式镜像，用于驱动路由守卫与界面。

use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;

/// 持久化凭证的存储键（与原后端约定一致）
const ACCESS_TOKEN_KEY: &str = "accessToken";

/// 会话上下文
///
/// 通过 Context 在组件间共享。凭证缺失即视为未认证。
#[derive(Clone, Copy)]
pub struct SessionContext {
    token: RwSignal<Option<String>>,
}

impl SessionContext {
    /// 创建上下文并从 LocalStorage 恢复上次的凭证（跨刷新存活）
    pub fn new() -> Self {
        let token = RwSignal::new(stored_token());
        Self { token }
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let token = self.token;
        Signal::derive(move || token.get().is_some())
    }

    /// 登录成功：持久化凭证并更新信号
    pub fn set_token(&self, token: &str) {
        if LocalStorage::set(ACCESS_TOKEN_KEY, token).is_err() {
            log::warn!("[session] failed to persist access token");
        }
        self.token.set(Some(token.to_string()));
    }

    /// 注销或凭证失效：清除持久化与内存状态
    ///
    /// 导航由路由服务的认证状态监听自动处理，这里不做跳转。
    pub fn clear(&self) {
        LocalStorage::delete(ACCESS_TOKEN_KEY);
        self.token.set(None);
    }

    /// 当前是否持有凭证（非响应式读取，用于挂载期判断）
    pub fn is_authenticated(&self) -> bool {
        self.token.get_untracked().is_some()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 直接读取持久化凭证
///
/// HTTP 适配层在每次请求时调用，保证始终以存储为准，
/// 不跨页面缓存副本。
pub fn stored_token() -> Option<String> {
    LocalStorage::get::<String>(ACCESS_TOKEN_KEY).ok()
}
