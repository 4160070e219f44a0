use leptos::prelude::*;
use leptos::task::spawn_local;

use connectapark_shared::MIN_PASSWORD_LEN;
use connectapark_shared::protocol::LoginRequest;

use crate::api::use_api;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let api = use_api();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // Already-authenticated visitors are bounced to the dashboard by the
    // router's auth-redirect effect; no per-render guard needed here.

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let email_value = email.get();
        let password_value = password.get();
        if email_value.is_empty() || password_value.is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }
        if password_value.len() < MIN_PASSWORD_LEN {
            set_error_msg.set(Some(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters."
            )));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        spawn_local(async move {
            let request = LoginRequest {
                email: email_value,
                password: password_value,
            };
            match api.send(&request).await {
                Ok(response) => {
                    // Storing the token flips the auth signal; the router
                    // then moves us off the login page to the dashboard.
                    session.set_token(&response.access_token);
                }
                Err(err) => {
                    set_error_msg.set(Some(err.message_or("Login failed.")));
                    set_is_submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="min-h-screen flex flex-col items-center justify-center bg-gray-900 text-white p-4 sm:p-6">
            <div class="w-full max-w-xs sm:max-w-sm bg-gray-800 p-6 sm:p-8 rounded-lg shadow-xl">
                <h2 class="text-xl sm:text-2xl font-bold text-center text-blue-400 mb-6">"Login"</h2>
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
                    <div class="mb-6">
                        <label class="block text-gray-300 text-sm font-bold mb-2" for="password">
                            "Password"
                        </label>
                        <input
                            id="password"
                            type="password"
                            placeholder="********"
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                            disabled=move || is_submitting.get()
                            class="shadow appearance-none border rounded w-full py-2 px-3 bg-gray-700 text-white mb-1 leading-tight focus:outline-none focus:border-blue-500"
                            required
                        />
                        <div class="text-right text-xs sm:text-sm">
                            <Link to=AppRoute::ForgotPassword class="text-blue-400 hover:text-blue-300">
                                "Forgot Password?"
                            </Link>
                        </div>
                    </div>

                    <Show when=move || error_msg.get().is_some()>
                        <p class="text-red-500 text-xs italic mb-4">
                            {move || error_msg.get().unwrap_or_default()}
                        </p>
                    </Show>

                    <div class="flex items-center justify-between">
                        <button
                            type="submit"
                            disabled=move || is_submitting.get()
                            class="w-full bg-blue-500 hover:bg-blue-700 disabled:bg-gray-500 text-white font-bold py-2 px-4 rounded focus:outline-none text-sm sm:text-base"
                        >
                            {move || if is_submitting.get() { "Logging in..." } else { "Login" }}
                        </button>
                    </div>
                </form>

                <p class="mt-6 text-center text-gray-400 text-xs sm:text-sm">
                    "Don't have an account? "
                    <Link to=AppRoute::Register class="text-blue-400 hover:text-blue-300">
                        "Register here"
                    </Link>
                </p>
            </div>
        </div>
    }
}
