//! 已认证页面的外壳：顶部导航栏 + 内容区

use leptos::prelude::*;
use leptos::task::spawn_local;

use connectapark_shared::UserProfile;
use connectapark_shared::protocol::ProfileRequest;

use crate::api::use_api;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let api = use_api();

    let (user, set_user) = signal(Option::<UserProfile>::None);

    // Fetch the profile once per mount. The profile is display-only and
    // deliberately not cached across navigations.
    if session.is_authenticated() {
        let api = api.clone();
        spawn_local(async move {
            match api.send(&ProfileRequest).await {
                Ok(profile) => set_user.set(Some(profile)),
                Err(err) if err.is_auth_failure() => {
                    // Token invalid or expired. Clearing the session makes the
                    // router redirect to the login page.
                    log::warn!("[navbar] credential rejected ({err}), logging out");
                    session.clear();
                }
                Err(err) => {
                    // 策略：非认证类错误（5xx、断网）结论不明，
                    // 不改动会话状态，交给下一次受保护调用裁决。
                    log::warn!("[navbar] profile fetch failed, keeping session: {err}");
                }
            }
        });
    }

    let on_logout = move |_| {
        set_user.set(None);
        // 导航由路由服务的认证状态监听自动处理
        session.clear();
    };

    view! {
        <nav class="flex justify-between items-center p-4 bg-gray-800 text-white shadow-md">
            <div class="flex items-center gap-4">
                <Link to=AppRoute::Parking class="text-xl font-bold hover:text-blue-400">
                    "ConnectAPark"
                </Link>
                <Link to=AppRoute::Dashboard class="text-sm text-gray-300 hover:text-blue-400">
                    "My Dashboard"
                </Link>
            </div>
            <div class="flex items-center">
                <Show
                    when=move || user.get().is_some()
                    fallback=|| {
                        view! {
                            <Link
                                to=AppRoute::Login
                                class="bg-blue-500 hover:bg-blue-700 text-white font-bold py-1 px-3 rounded text-sm"
                            >
                                "Login"
                            </Link>
                        }
                    }
                >
                    <span class="mr-4 text-sm text-gray-300">
                        "Welcome, "
                        {move || user.get().map(|u| u.display_name().to_string())}
                        "!"
                    </span>
                    <button
                        on:click=on_logout
                        class="bg-red-500 hover:bg-red-700 text-white font-bold py-1 px-3 rounded text-sm"
                    >
                        "Logout"
                    </button>
                </Show>
            </div>
        </nav>
    }
}

/// 带导航栏的页面布局（/dashboard、/parking、/reserve-confirm、/payment）
#[component]
pub fn MainLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col bg-gray-900 text-white">
            <Navbar />
            <main>{children()}</main>
        </div>
    }
}
