use leptos::prelude::*;
use leptos::task::spawn_local;

use connectapark_shared::date::format_short_datetime;
use connectapark_shared::protocol::MyTicketsRequest;
use connectapark_shared::{Ticket, TicketStatus, partition_tickets};

use crate::api::use_api;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::Link;

/// 固定的状态 -> 徽标配色映射
fn status_badge_class(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Parked => "bg-blue-600 text-blue-100",
        TicketStatus::Reserved => "bg-yellow-600 text-yellow-100",
        TicketStatus::PendingPayment => "bg-orange-600 text-orange-100",
        TicketStatus::Completed => "bg-green-600 text-green-100",
        TicketStatus::NoShow => "bg-red-700 text-red-100",
        TicketStatus::Unknown => "bg-gray-600 text-gray-100",
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let session = use_session();

    let (tickets, set_tickets) = signal(Vec::<Ticket>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    // 挂载时拉取一次本人票据
    {
        let api = api.clone();
        spawn_local(async move {
            match api.send(&MyTicketsRequest).await {
                Ok(data) => set_tickets.set(data),
                Err(err) => {
                    set_error.set(Some("Failed to load your tickets.".to_string()));
                    if err.is_auth_failure() {
                        log::warn!("[dashboard] credential rejected ({err}), logging out");
                        session.clear();
                    }
                }
            }
            set_is_loading.set(false);
        });
    }

    // 每次数据更新都重算分组（仅用于展示，不持久化）
    let active = Memo::new(move |_| partition_tickets(tickets.get()).0);
    let past = Memo::new(move |_| partition_tickets(tickets.get()).1);

    view! {
        <div class="container mx-auto p-4">
            <h1 class="text-3xl font-bold text-white mb-6">"My Dashboard"</h1>

            <div class="mb-8">
                <Link
                    to=AppRoute::Parking
                    class="inline-block w-full sm:w-auto bg-blue-600 hover:bg-blue-500 text-white font-bold py-3 px-6 rounded-lg text-lg text-center"
                >
                    "Go to Parking Lot"
                </Link>
            </div>

            <Show
                when=move || !is_loading.get()
                fallback=|| view! { <p class="text-gray-400">"Loading your tickets..."</p> }
            >
                <Show
                    when=move || error.get().is_none()
                    fallback=move || {
                        view! { <p class="text-red-500">{move || error.get().unwrap_or_default()}</p> }
                    }
                >
                    <h2 class="text-2xl font-semibold text-white mb-4">"Active Tickets"</h2>
                    <TicketList tickets=active />

                    <h2 class="text-2xl font-semibold text-white mt-8 mb-4">"Past Tickets"</h2>
                    <TicketList tickets=past />
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn TicketList(#[prop(into)] tickets: Signal<Vec<Ticket>>) -> impl IntoView {
    view! {
        <Show
            when=move || !tickets.get().is_empty()
            fallback=|| {
                view! { <p class="text-gray-400">"No tickets found in this category."</p> }
            }
        >
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <For
                    each=move || tickets.get()
                    key=|t| t.id.clone()
                    children=move |ticket: Ticket| {
                        let show_amount = ticket.status == TicketStatus::PendingPayment
                            && ticket.amount_due.is_some();
                        let amount = ticket.amount_due.unwrap_or_default();
                        view! {
                            <div class="bg-gray-800 rounded-lg shadow-lg p-4 flex flex-col justify-between">
                                <div>
                                    <div class="flex justify-between items-center mb-2">
                                        <span class="text-lg font-bold text-white">
                                            {format!("Space {}", ticket.space.code)}
                                        </span>
                                        <span class=format!(
                                            "text-xs font-semibold px-2 py-0.5 rounded-full {}",
                                            status_badge_class(ticket.status),
                                        )>{ticket.status.label()}</span>
                                    </div>
                                    <p class="text-sm text-gray-300">
                                        {format!("Plate: {}", ticket.vehicle_plate)}
                                    </p>
                                    <p class="text-sm text-gray-400">
                                        {format!("Booked: {}", format_short_datetime(ticket.created_at))}
                                    </p>
                                    <Show when=move || ticket.checkin_at.is_some()>
                                        <p class="text-sm text-gray-400">
                                            {format!(
                                                "Checked-in: {}",
                                                format_short_datetime(ticket.checkin_at),
                                            )}
                                        </p>
                                    </Show>
                                </div>
                                <Show when=move || show_amount>
                                    <div class="mt-3 text-right">
                                        <span class="text-yellow-400 font-bold">
                                            {format!("Due: {amount:.2} THB")}
                                        </span>
                                    </div>
                                </Show>
                            </div>
                        }
                    }
                />
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_has_a_badge_color() {
        let statuses = [
            TicketStatus::Reserved,
            TicketStatus::Parked,
            TicketStatus::PendingPayment,
            TicketStatus::Completed,
            TicketStatus::NoShow,
            TicketStatus::Unknown,
        ];
        for status in statuses {
            assert!(!status_badge_class(status).is_empty());
        }
        assert_eq!(
            status_badge_class(TicketStatus::PendingPayment),
            "bg-orange-600 text-orange-100"
        );
    }
}
