use leptos::prelude::*;
use leptos::task::spawn_local;

use connectapark_shared::protocol::ForgotPasswordRequest;

use crate::api::use_api;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// 防账号枚举：无论邮箱是否存在都展示同一条确认文案
const GENERIC_CONFIRMATION: &str =
    "If your email is registered, you will receive a password reset link.";

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let api = use_api();

    let (email, set_email) = signal(String::new());
    let (message, set_message) = signal(Option::<String>::None);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_message.set(None);
        set_is_submitting.set(true);

        let email_value = email.get();
        let api = api.clone();
        spawn_local(async move {
            let request = ForgotPasswordRequest { email: email_value };
            let text = match api.send(&request).await {
                Ok(response) => response
                    .message
                    .unwrap_or_else(|| GENERIC_CONFIRMATION.to_string()),
                // Same generic confirmation on failure, for security.
                Err(_) => GENERIC_CONFIRMATION.to_string(),
            };
            set_message.set(Some(text));
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen flex flex-col items-center justify-center bg-gray-900 text-white p-4 sm:p-6">
            <div class="w-full max-w-xs sm:max-w-sm bg-gray-800 p-6 sm:p-8 rounded-lg shadow-xl">
                <h2 class="text-xl sm:text-2xl font-bold text-center text-blue-400 mb-4">
                    "Forgot Password"
                </h2>
                <p class="text-center text-gray-300 text-sm mb-6">
                    "Enter your email and we'll send you a reset link."
                </p>

                <form on:submit=on_submit>
                    <div class="mb-4">
                        <label class="block text-gray-300 text-sm font-bold mb-2" for="email">
                            "Email"
                        </label>
                        <input
                            id="email"
                            type="email"
                            placeholder="you@example.com"
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            prop:value=email
                            disabled=move || is_submitting.get()
                            class="shadow appearance-none border rounded w-full py-2 px-3 bg-gray-700 text-white leading-tight focus:outline-none focus:border-blue-500"
                            required
                        />
                    </div>

                    <Show when=move || message.get().is_some()>
                        <p class="text-green-500 text-sm text-center mb-4">
                            {move || message.get().unwrap_or_default()}
                        </p>
                    </Show>

                    <button
                        type="submit"
                        disabled=move || is_submitting.get()
                        class="w-full mt-4 bg-blue-500 hover:bg-blue-700 disabled:bg-gray-500 text-white font-bold py-2 px-4 rounded focus:outline-none text-sm sm:text-base"
                    >
                        {move || if is_submitting.get() { "Sending..." } else { "Send Reset Link" }}
                    </button>
                </form>

                <p class="mt-6 text-center text-gray-400 text-xs sm:text-sm">
                    "Remembered your password? "
                    <Link to=AppRoute::Login class="text-blue-400 hover:text-blue-300">
                        "Login here"
                    </Link>
                </p>
            </div>
        </div>
    }
}
