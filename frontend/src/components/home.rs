//! 欢迎页（公开路由）

use leptos::prelude::*;

use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col items-center justify-center bg-gray-900 text-white p-4 sm:p-6 md:p-8 text-center">
            <h1 class="text-3xl sm:text-4xl md:text-5xl font-bold mb-3 sm:mb-4 text-blue-400">
                "ConnectAPark"
            </h1>
            <p class="text-base sm:text-lg text-gray-300 mb-6 sm:mb-8 max-w-md">
                "Connecting you to the parking space you need."
            </p>
            <div class="mt-6 sm:mt-8">
                <Link
                    to=AppRoute::Login
                    class="bg-blue-500 hover:bg-blue-700 text-white font-bold py-2 px-5 sm:py-3 sm:px-7 rounded text-base sm:text-lg"
                >
                    "Login / Register"
                </Link>
            </div>
        </div>
    }
}
