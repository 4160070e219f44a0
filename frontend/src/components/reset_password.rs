use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

use connectapark_shared::RESET_REDIRECT_DELAY_SECS;
use connectapark_shared::protocol::ResetPasswordRequest;

use crate::api::use_api;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

#[component]
pub fn ResetPasswordPage(
    /// 重置令牌，来自 URL 查询串；缺失时渲染错误态而非表单
    token: Option<String>,
) -> impl IntoView {
    let api = use_api();
    let router = use_router();

    // Broken deep link: no token, no form. Offer the way back instead.
    let Some(token) = token else {
        return view! {
            <div class="min-h-screen flex flex-col items-center justify-center bg-gray-900 text-white p-4 sm:p-6 text-center">
                <div class="w-full max-w-xs sm:max-w-sm bg-gray-800 p-6 sm:p-8 rounded-lg shadow-xl">
                    <h2 class="text-xl sm:text-2xl font-bold text-red-500 mb-4">"Error"</h2>
                    <p class="text-gray-300 mb-6">"Invalid reset link: Token is missing."</p>
                    <Link to=AppRoute::ForgotPassword class="text-blue-400 hover:text-blue-300">
                        "Request a new link"
                    </Link>
                </div>
            </div>
        }
        .into_any();
    };

    let (new_password, set_new_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);
        set_success_msg.set(None);

        let password_value = new_password.get();
        if password_value != confirm_password.get() {
            set_error_msg.set(Some("Passwords do not match.".to_string()));
            return;
        }

        set_is_submitting.set(true);

        let api = api.clone();
        let token = token.clone();
        spawn_local(async move {
            let request = ResetPasswordRequest {
                token,
                new_password: password_value,
            };
            match api.send(&request).await {
                Ok(response) => {
                    set_success_msg.set(Some(response.message.unwrap_or_else(|| {
                        "Password reset successfully! Redirecting to login...".to_string()
                    })));
                    set_timeout(
                        move || router.navigate(AppRoute::Login),
                        Duration::from_secs(RESET_REDIRECT_DELAY_SECS),
                    );
                }
                Err(err) => {
                    set_error_msg.set(Some(err.message_or(
                        "Password reset failed. The link might be expired or invalid.",
                    )));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen flex flex-col items-center justify-center bg-gray-900 text-white p-4 sm:p-6">
            <div class="w-full max-w-xs sm:max-w-sm bg-gray-800 p-6 sm:p-8 rounded-lg shadow-xl">
                <h2 class="text-xl sm:text-2xl font-bold text-center text-blue-400 mb-6">
                    "Reset Password"
                </h2>
                <form on:submit=on_submit>
                    <div class="mb-4">
                        <label class="block text-gray-300 text-sm font-bold mb-2" for="new-password">
                            "New Password"
                        </label>
                        <input
                            id="new-password"
                            type="password"
                            placeholder="********"
                            on:input=move |ev| set_new_password.set(event_target_value(&ev))
                            prop:value=new_password
                            disabled=move || is_submitting.get()
                            class="shadow appearance-none border rounded w-full py-2 px-3 bg-gray-700 text-white leading-tight focus:outline-none focus:border-blue-500"
                            required
                        />
                    </div>
                    <div class="mb-6">
                        <label
                            class="block text-gray-300 text-sm font-bold mb-2"
                            for="confirm-password"
                        >
                            "Confirm New Password"
                        </label>
                        <input
                            id="confirm-password"
                            type="password"
                            placeholder="********"
                            on:input=move |ev| set_confirm_password.set(event_target_value(&ev))
                            prop:value=confirm_password
                            disabled=move || is_submitting.get()
                            class="shadow appearance-none border rounded w-full py-2 px-3 bg-gray-700 text-white leading-tight focus:outline-none focus:border-blue-500"
                            required
                        />
                    </div>

                    <Show when=move || error_msg.get().is_some()>
                        <p class="text-red-500 text-xs italic mb-4">
                            {move || error_msg.get().unwrap_or_default()}
                        </p>
                    </Show>
                    <Show when=move || success_msg.get().is_some()>
                        <p class="text-green-500 text-xs italic mb-4">
                            {move || success_msg.get().unwrap_or_default()}
                        </p>
                    </Show>

                    <button
                        type="submit"
                        disabled=move || is_submitting.get()
                        class="w-full bg-blue-500 hover:bg-blue-700 disabled:bg-gray-500 text-white font-bold py-2 px-4 rounded focus:outline-none text-sm sm:text-base"
                    >
                        {move || if is_submitting.get() { "Resetting..." } else { "Reset Password" }}
                    </button>
                </form>
            </div>
        </div>
    }
    .into_any()
}
