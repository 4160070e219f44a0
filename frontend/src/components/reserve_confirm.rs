use leptos::prelude::*;
use leptos::task::spawn_local;

use connectapark_shared::protocol::ReserveRequest;
use connectapark_shared::{PaymentContext, PrepaidOption};

use crate::api::{ApiError, use_api};
use crate::web::route::AppRoute;
use crate::web::router::{NavState, use_router};

/// 预约失败文案：优先透传后端信息（400 校验数组已拼接），
/// 否则使用通用回退。
fn reserve_error_message(err: &ApiError) -> String {
    err.message_or("Reservation failed. Please try again.")
}

#[component]
pub fn ReserveConfirmPage() -> impl IntoView {
    let router = use_router();
    let api = use_api();

    // This page is only reachable through the parking lot flow. A direct
    // deep link has no draft: schedule one guard redirect and render a
    // placeholder instead of the form.
    let Some(draft) = router.reservation_state() else {
        Effect::new(move |_| router.replace(AppRoute::Parking));
        return view! {
            <div class="container mx-auto p-4 text-center text-gray-400">
                "No space selected. Redirecting to parking..."
            </div>
        }
        .into_any();
    };

    let (vehicle_plate, set_vehicle_plate) = signal(String::new());
    let (duration, set_duration) = signal(PrepaidOption::default());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (is_submitting, set_is_submitting) = signal(false);

    let space_code = draft.space_code.clone();

    let on_submit = {
        let draft = draft.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            set_error_msg.set(None);

            let plate = vehicle_plate.get();
            if plate.is_empty() {
                // 本地前置校验：不发起任何 HTTP 调用
                set_error_msg.set(Some("Please enter a vehicle plate.".to_string()));
                return;
            }

            set_is_submitting.set(true);

            let api = api.clone();
            let draft = draft.clone();
            spawn_local(async move {
                let request = ReserveRequest {
                    space_id: draft.space_id.clone(),
                    vehicle_plate: plate,
                    pre_paid_duration_minutes: duration.get_untracked().minutes(),
                };
                match api.send(&request).await {
                    Ok(response) => match response.ticket_id {
                        Some(ticket_id) => {
                            router.navigate_with_state(
                                AppRoute::Payment { ticket_id },
                                NavState::Payment(PaymentContext {
                                    qr_code_url: response.qr_code_url.unwrap_or_default(),
                                    amount_due: response.amount_due.unwrap_or_default(),
                                    space_code: draft.space_code.clone(),
                                }),
                            );
                        }
                        None => {
                            // 契约被破坏：与 HTTP 失败区分开的客户端致命错误
                            set_error_msg.set(Some(
                                "Failed to retrieve ticketId from API response.".to_string(),
                            ));
                            set_is_submitting.set(false);
                        }
                    },
                    Err(err) => {
                        set_error_msg.set(Some(reserve_error_message(&err)));
                        set_is_submitting.set(false);
                    }
                }
            });
        }
    };

    let option_class = move |option: PrepaidOption| {
        if duration.get() == option {
            "w-1/2 p-3 rounded-lg border-2 text-center bg-blue-600 border-blue-400 text-white"
        } else {
            "w-1/2 p-3 rounded-lg border-2 text-center bg-gray-700 border-gray-600 text-gray-300 hover:bg-gray-600"
        }
    };

    view! {
        <div class="container mx-auto p-4">
            <div class="w-full max-w-xs sm:max-w-sm bg-gray-800 p-6 sm:p-8 rounded-lg shadow-xl mx-auto mt-10">
                <h2 class="text-xl sm:text-2xl font-bold text-center text-blue-400 mb-4">
                    "Confirm Reservation"
                </h2>

                <p class="text-center text-gray-300 text-lg mb-6">
                    "You are reserving space: "
                    <span class="font-bold text-green-400 ml-2">{space_code}</span>
                </p>

                <form on:submit=on_submit>
                    <div class="mb-6">
                        <label class="block text-gray-300 text-sm font-bold mb-3">
                            "Select Pre-payment Option"
                        </label>
                        <div class="flex space-x-2">
                            <button
                                type="button"
                                on:click=move |_| set_duration.set(PrepaidOption::HalfHour)
                                class=move || option_class(PrepaidOption::HalfHour)
                            >
                                <span class="font-bold">
                                    {format!("{} THB", PrepaidOption::HalfHour.fee())}
                                </span>
                                <span class="block text-xs">
                                    {format!("{} Mins Pre-paid", PrepaidOption::HalfHour.minutes())}
                                </span>
                            </button>
                            <button
                                type="button"
                                on:click=move |_| set_duration.set(PrepaidOption::FullHour)
                                class=move || option_class(PrepaidOption::FullHour)
                            >
                                <span class="font-bold">
                                    {format!("{} THB", PrepaidOption::FullHour.fee())}
                                </span>
                                <span class="block text-xs">
                                    {format!("{} Mins Pre-paid", PrepaidOption::FullHour.minutes())}
                                </span>
                            </button>
                        </div>
                    </div>

                    <div class="mb-4">
                        <label class="block text-gray-300 text-sm font-bold mb-2" for="vehicle-plate">
                            "Vehicle License Plate"
                        </label>
                        <input
                            id="vehicle-plate"
                            type="text"
                            placeholder="e.g., AB-1234"
                            // 车牌输入即时转大写
                            on:input=move |ev| {
                                set_vehicle_plate.set(event_target_value(&ev).to_uppercase())
                            }
                            prop:value=vehicle_plate
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

                    <div class="flex items-center justify-between mt-6">
                        <button
                            type="submit"
                            disabled=move || is_submitting.get()
                            class="w-full bg-blue-500 hover:bg-blue-700 disabled:bg-gray-500 text-white font-bold py-2 px-4 rounded focus:outline-none text-sm sm:text-base"
                        >
                            {move || {
                                if is_submitting.get() {
                                    "Creating ticket..."
                                } else {
                                    "Proceed to Payment"
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_validation_messages_pass_through() {
        let err = ApiError::Status {
            status: 400,
            message: Some("vehiclePlate should not be empty".to_string()),
        };
        assert_eq!(
            reserve_error_message(&err),
            "vehiclePlate should not be empty"
        );
    }

    #[test]
    fn silent_failures_fall_back_to_generic_text() {
        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(
            reserve_error_message(&err),
            "Reservation failed. Please try again."
        );
    }
}
