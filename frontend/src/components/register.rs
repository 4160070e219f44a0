use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

use connectapark_shared::protocol::RegisterRequest;
use connectapark_shared::{MIN_PASSWORD_LEN, REGISTER_REDIRECT_DELAY_SECS};

use crate::api::{ApiError, use_api};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

/// 注册失败的文案映射
///
/// 409 固定映射为重复邮箱提示；400 透传后端校验信息
/// （数组已在适配层拼接）；其余一律使用通用文案。
fn register_error_message(err: &ApiError) -> String {
    match err.status() {
        Some(409) => "This email is already registered.".to_string(),
        Some(400) if err.server_message().is_some() => {
            err.server_message().unwrap_or_default().to_string()
        }
        _ => "Registration failed. Please try again.".to_string(),
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (name, set_name) = signal(String::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);
        set_success_msg.set(None);

        let email_value = email.get();
        let password_value = password.get();
        if email_value.is_empty() || password_value.len() < MIN_PASSWORD_LEN {
            set_error_msg.set(Some(format!(
                "Please enter an email and a password of at least {MIN_PASSWORD_LEN} characters."
            )));
            return;
        }

        set_is_submitting.set(true);

        let name_value = name.get();
        let api = api.clone();
        spawn_local(async move {
            let request = RegisterRequest {
                email: email_value,
                password: password_value,
                name: if name_value.is_empty() {
                    None
                } else {
                    Some(name_value)
                },
            };
            match api.send(&request).await {
                Ok(()) => {
                    set_success_msg
                        .set(Some("Registration successful! Redirecting to login...".to_string()));
                    // 刻意停留 2 秒让用户读完提示，再跳转登录页
                    set_timeout(
                        move || router.navigate(AppRoute::Login),
                        Duration::from_secs(REGISTER_REDIRECT_DELAY_SECS),
                    );
                }
                Err(err) => {
                    set_error_msg.set(Some(register_error_message(&err)));
                    set_is_submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="min-h-screen flex flex-col items-center justify-center bg-gray-900 text-white p-4 sm:p-6">
            <div class="w-full max-w-xs sm:max-w-sm bg-gray-800 p-6 sm:p-8 rounded-lg shadow-xl">
                <h2 class="text-xl sm:text-2xl font-bold text-center text-blue-400 mb-6">
                    "Register"
                </h2>
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
                    <div class="mb-4">
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
                    </div>
                    <div class="mb-6">
                        <label class="block text-gray-300 text-sm font-bold mb-2" for="name">
                            "Name (Optional)"
                        </label>
                        <input
                            id="name"
                            type="text"
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                            prop:value=name
                            disabled=move || is_submitting.get()
                            class="shadow appearance-none border rounded w-full py-2 px-3 bg-gray-700 text-white leading-tight focus:outline-none focus:border-blue-500"
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

                    <div class="flex items-center justify-between">
                        <button
                            type="submit"
                            disabled=move || is_submitting.get()
                            class="w-full bg-blue-500 hover:bg-blue-700 disabled:bg-gray-500 text-white font-bold py-2 px-4 rounded focus:outline-none text-sm sm:text-base"
                        >
                            {move || if is_submitting.get() { "Registering..." } else { "Register" }}
                        </button>
                    </div>
                </form>

                <p class="mt-6 text-center text-gray-400 text-xs sm:text-sm">
                    "Already have an account? "
                    <Link to=AppRoute::Login class="text-blue-400 hover:text-blue-300">
                        "Login here"
                    </Link>
                </p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_email_maps_to_fixed_message() {
        let err = ApiError::Status {
            status: 409,
            message: Some("Conflict".to_string()),
        };
        assert_eq!(register_error_message(&err), "This email is already registered.");
    }

    #[test]
    fn validation_errors_surface_joined_server_messages() {
        let err = ApiError::Status {
            status: 400,
            message: Some("email must be an email, password too short".to_string()),
        };
        assert_eq!(
            register_error_message(&err),
            "email must be an email, password too short"
        );
    }

    #[test]
    fn other_failures_use_the_generic_fallback() {
        let err = ApiError::Status {
            status: 500,
            message: Some("internal".to_string()),
        };
        assert_eq!(
            register_error_message(&err),
            "Registration failed. Please try again."
        );
        assert_eq!(
            register_error_message(&ApiError::Network("offline".to_string())),
            "Registration failed. Please try again."
        );
    }
}
