use std::time::Duration;

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;

use connectapark_shared::payment::{PaymentPhase, PaymentSession, format_countdown};
use connectapark_shared::protocol::ConfirmPaymentRequest;
use connectapark_shared::{PAYMENT_REDIRECT_DELAY_SECS, PAYMENT_WINDOW_SECS};

use crate::api::use_api;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

const EXPIRED_MESSAGE: &str =
    "Time expired! Your reservation has been cancelled. Please try again.";

#[component]
pub fn PaymentPage(
    /// 路径参数中的票据 id
    ticket_id: String,
) -> impl IntoView {
    let router = use_router();
    let api = use_api();

    // Direct access without a reservation context (reload, deep link):
    // nothing to pay for, go back to the lot.
    let Some(ctx) = router.payment_state() else {
        Effect::new(move |_| router.replace(AppRoute::Parking));
        return view! {
            <div class="container mx-auto p-4 text-center text-gray-400">
                "Loading payment details..."
            </div>
        }
        .into_any();
    };

    let (pay, set_pay) = signal(PaymentSession::new(PAYMENT_WINDOW_SECS));
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);

    // 每秒推进状态机；到期转移由状态机保证只触发一次，
    // 成功后的 tick 是空操作，不会用过期文案覆盖成功提示。
    let tick = Interval::new(1_000, move || {
        set_pay.update(|session| {
            if session.tick() {
                set_error_msg.set(Some(EXPIRED_MESSAGE.to_string()));
            }
        });
    });
    let tick = send_wrapper::SendWrapper::new(tick);
    on_cleanup(move || drop(tick));

    let on_pay = {
        let api = api.clone();
        let ticket_id = ticket_id.clone();
        move |_| {
            if !pay.get_untracked().can_pay() {
                return;
            }
            set_pay.update(|session| {
                session.begin_payment();
            });
            set_error_msg.set(None);
            set_success_msg.set(None);

            let api = api.clone();
            let ticket_id = ticket_id.clone();
            spawn_local(async move {
                let request = ConfirmPaymentRequest { ticket_id };
                match api.send(&request).await {
                    Ok(()) => {
                        set_pay.update(|session| session.confirm_success());
                        set_success_msg.set(Some(
                            "Payment successful! Your reservation is confirmed.".to_string(),
                        ));
                        set_timeout(
                            move || router.navigate(AppRoute::Parking),
                            Duration::from_secs(PAYMENT_REDIRECT_DELAY_SECS),
                        );
                    }
                    Err(err) => {
                        // 回到 Pending（若尚未过期），允许重试
                        set_pay.update(|session| session.confirm_failure());
                        set_error_msg.set(Some(
                            err.message_or("Payment failed. The ticket might have expired."),
                        ));
                    }
                }
            });
        }
    };

    let countdown_class = move || {
        if pay.get().remaining_secs() < 60 {
            "text-4xl font-bold text-red-500"
        } else {
            "text-4xl font-bold text-yellow-400"
        }
    };

    let pay_label = move || match pay.get().phase() {
        PaymentPhase::Pending => "Simulate Payment (Webhook)",
        PaymentPhase::Processing => "Processing Payment...",
        PaymentPhase::Succeeded => "Payment Successful!",
        PaymentPhase::Expired => "Time Expired",
    };

    let amount_label = format!("฿ {:.2}", ctx.amount_due);
    let scan_hint = format!(
        "Please scan the QR code with your banking app to pay ฿{:.2} within 15 minutes.",
        ctx.amount_due
    );

    view! {
        <div class="container mx-auto p-4">
            <div class="w-full max-w-sm bg-gray-800 p-6 sm:p-8 rounded-lg shadow-xl mx-auto mt-10">
                <h2 class="text-2xl font-bold text-center text-blue-400 mb-2">
                    "Complete Your Reservation"
                </h2>
                <p class="text-center text-gray-300 text-lg mb-4">
                    "For Space: "
                    <span class="font-bold text-green-400">{ctx.space_code.clone()}</span>
                </p>

                <div class="text-center bg-gray-900 p-4 rounded-lg mb-6">
                    <div class="text-sm text-gray-400">"Time remaining (15 mins)"</div>
                    <div class=countdown_class>
                        {move || format_countdown(pay.get().remaining_secs())}
                    </div>
                </div>

                <div class="text-center mb-6">
                    <p class="text-gray-300">"Amount Due (Pre-payment)"</p>
                    <p class="text-3xl font-bold text-white">{amount_label}</p>
                </div>

                <div class="flex justify-center mb-6">
                    <div class="p-4 bg-white rounded-lg">
                        <img
                            src=ctx.qr_code_url.clone()
                            alt="QR Code for Payment"
                            class="w-48 h-48"
                        />
                    </div>
                </div>

                <p class="text-center text-gray-400 text-xs mb-6">{scan_hint}</p>

                <Show when=move || error_msg.get().is_some()>
                    <p class="text-red-500 text-center text-sm italic mb-4">
                        {move || error_msg.get().unwrap_or_default()}
                    </p>
                </Show>
                <Show when=move || success_msg.get().is_some()>
                    <p class="text-green-500 text-center text-sm italic mb-4">
                        {move || success_msg.get().unwrap_or_default()}
                    </p>
                </Show>

                <div class="flex items-center justify-between mt-6">
                    <button
                        on:click=on_pay
                        disabled=move || !pay.get().can_pay()
                        class="w-full bg-green-600 hover:bg-green-700 disabled:bg-gray-500 text-white font-bold py-3 px-4 rounded focus:outline-none text-base"
                    >
                        {pay_label}
                    </button>
                </div>
            </div>
        </div>
    }
    .into_any()
}
