use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;

use connectapark_shared::protocol::ListSpacesRequest;
use connectapark_shared::{
    ReservationDraft, SPACE_POLL_INTERVAL_MS, Space, SpaceStatus, sort_spaces,
};

use crate::api::use_api;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::{NavState, use_router};

#[component]
pub fn ParkingLotPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let api = use_api();

    let (spaces, set_spaces) = signal(Vec::<Space>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (notice, set_notice) = signal(Option::<String>::None);

    // Shared by the initial load, the manual Refresh button and the poll.
    // Background refreshes skip the loading indicator to avoid flicker.
    let fetch_spaces = {
        let api = api.clone();
        move |show_loading: bool| {
            if show_loading || spaces.get_untracked().is_empty() {
                set_is_loading.set(true);
            }
            set_error.set(None);

            let api = api.clone();
            spawn_local(async move {
                match api.send(&ListSpacesRequest).await {
                    Ok(response) => {
                        let mut data = response.data;
                        sort_spaces(&mut data);
                        set_spaces.set(data);
                    }
                    Err(err) => {
                        set_error.set(Some(
                            "Failed to load parking spaces. Please try again.".to_string(),
                        ));
                        if err.is_auth_failure() {
                            log::warn!("[parking] credential rejected ({err}), logging out");
                            // 清除凭证后由路由服务自动跳回登录页
                            session.clear();
                        }
                    }
                }
                set_is_loading.set(false);
            });
        }
    };

    // 首次加载（显示加载指示）
    fetch_spaces(true);

    // 每 15 秒静默刷新一次占用状态；页面卸载时销毁定时器，
    // 避免遗留后台轮询。
    let poll = {
        let fetch_spaces = fetch_spaces.clone();
        Interval::new(SPACE_POLL_INTERVAL_MS, move || fetch_spaces(false))
    };
    let poll = send_wrapper::SendWrapper::new(poll);
    on_cleanup(move || drop(poll));

    let on_space_click = move |space: Space| {
        if space.status != SpaceStatus::Available {
            set_notice.set(Some(format!("Space {} is not available.", space.code)));
            return;
        }
        router.navigate_with_state(
            AppRoute::ReserveConfirm,
            NavState::Reservation(ReservationDraft {
                space_id: space.id,
                space_code: space.code,
            }),
        );
    };

    let available = move || {
        spaces
            .get()
            .into_iter()
            .filter(|s| s.status == SpaceStatus::Available)
            .collect::<Vec<_>>()
    };
    let reserved = move || {
        spaces
            .get()
            .into_iter()
            .filter(|s| s.status == SpaceStatus::Reserved)
            .collect::<Vec<_>>()
    };
    let occupied = move || {
        spaces
            .get()
            .into_iter()
            .filter(|s| {
                matches!(s.status, SpaceStatus::Occupied | SpaceStatus::PendingVacate)
            })
            .collect::<Vec<_>>()
    };

    let refresh = fetch_spaces.clone();

    view! {
        <div class="container mx-auto p-4">
            // 点击不可用车位时的阻断提示
            <Show when=move || notice.get().is_some()>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/60">
                    <div class="bg-gray-800 p-6 rounded-lg shadow-xl text-center max-w-xs">
                        <p class="text-white mb-4">{move || notice.get().unwrap_or_default()}</p>
                        <button
                            on:click=move |_| set_notice.set(None)
                            class="bg-blue-600 hover:bg-blue-500 text-white font-bold py-2 px-6 rounded"
                        >
                            "OK"
                        </button>
                    </div>
                </div>
            </Show>

            <div class="flex justify-between items-center mb-4">
                <h2 class="text-2xl sm:text-3xl font-bold text-green-400">
                    "Available Parking Spaces"
                </h2>
                <button
                    on:click=move |_| refresh(true)
                    disabled=move || is_loading.get()
                    class="bg-blue-600 hover:bg-blue-500 text-white font-bold py-2 px-4 rounded disabled:opacity-50"
                >
                    {move || if is_loading.get() { "Refreshing..." } else { "Refresh" }}
                </button>
            </div>

            <Show when=move || error.get().is_some()>
                <p class="text-red-500 mb-4">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <Show
                when=move || !(is_loading.get() && spaces.get().is_empty())
                fallback=|| {
                    view! {
                        <p class="text-center text-gray-400">"Loading parking spaces..."</p>
                    }
                }
            >
                <div class="grid grid-cols-2 sm:grid-cols-3 md:grid-cols-4 lg:grid-cols-6 gap-3 sm:gap-4">
                    <For
                        each=available
                        key=|s| s.id.clone()
                        children=move |space: Space| {
                            let on_click_space = space.clone();
                            view! {
                                <button
                                    on:click=move |_| on_space_click(on_click_space.clone())
                                    class="p-4 sm:p-5 border-2 border-green-500 bg-green-500/20 text-white text-lg sm:text-xl font-bold rounded-lg shadow-md hover:bg-green-500 hover:text-gray-900 transition-all duration-200"
                                >
                                    {space.code.clone()}
                                </button>
                            }
                        }
                    />
                </div>
                <Show when=move || available().is_empty() && !is_loading.get()>
                    <p class="text-gray-400 mt-4">"No available spaces found."</p>
                </Show>

                <h3 class="text-xl sm:text-2xl font-bold text-yellow-400 mt-8 mb-4">
                    "Reserved Spaces"
                </h3>
                <div class="grid grid-cols-2 sm:grid-cols-3 md:grid-cols-4 lg:grid-cols-6 gap-3 sm:gap-4">
                    <For
                        each=reserved
                        key=|s| s.id.clone()
                        children=move |space: Space| {
                            let on_click_space = space.clone();
                            view! {
                                <div
                                    on:click=move |_| on_space_click(on_click_space.clone())
                                    class="p-4 sm:p-5 border border-yellow-600 bg-yellow-600/20 text-yellow-200 text-center rounded-lg shadow-sm opacity-70"
                                >
                                    {space.code.clone()}
                                </div>
                            }
                        }
                    />
                </div>
                <Show when=move || reserved().is_empty()>
                    <p class="text-gray-500 mt-4">"No reserved spaces."</p>
                </Show>

                <h3 class="text-xl sm:text-2xl font-bold text-red-400 mt-8 mb-4">
                    "Occupied Spaces"
                </h3>
                <div class="grid grid-cols-2 sm:grid-cols-3 md:grid-cols-4 lg:grid-cols-6 gap-3 sm:gap-4">
                    <For
                        each=occupied
                        key=|s| s.id.clone()
                        children=move |space: Space| {
                            let on_click_space = space.clone();
                            view! {
                                <div
                                    on:click=move |_| on_space_click(on_click_space.clone())
                                    class="p-4 sm:p-5 border border-red-700 bg-red-700/20 text-red-200 text-center rounded-lg shadow-sm opacity-70"
                                >
                                    {space.code.clone()}
                                </div>
                            }
                        }
                    />
                </div>
                <Show when=move || occupied().is_empty()>
                    <p class="text-gray-500 mt-4">"No occupied spaces."</p>
                </Show>
            </Show>
        </div>
    }
}
