use dioxus::prelude::*;

mod auth;
mod browser;
mod format_helpers;
mod i18n;
mod live;
mod routes;

use auth::AuthState;
use i18n::LanguageState;
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        // Loads .env and config.toml, then builds the seeded workspace.
        let state = server::state::get_state().clone();
        let config = server::config::config();

        if config.features.telemetry {
            server::telemetry::init_telemetry();
        }
        server::health::record_start_time();

        server::sync::spawn_background_tasks(state.clone(), config);

        let login_limit = server::rate_limit::RateLimitState::for_login(&config.rate_limit);
        let mut router = dioxus::server::router(App)
            .merge(server::openapi::api_router(state.clone(), login_limit));

        if config.features.telemetry {
            router = router.layer(server::telemetry::OtelTraceLayer);
        }

        let router = router
            .layer(axum::middleware::from_fn_with_state(
                state.workforce.clone(),
                server::auth::middleware::session_middleware,
            ))
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(AuthState::new);
    use_context_provider(LanguageState::new);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Title { "SS Technologies Workforce" }
        SuspenseBoundary {
            fallback: |_| rsx! {
                div { class: "auth-guard-loading",
                    p { "Loading..." }
                }
            },
            Router::<Route> {}
        }
    }
}
