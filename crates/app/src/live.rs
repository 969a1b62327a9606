use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use shared_types::{AppError, WorkspaceSnapshot};

use crate::auth::use_auth;
#[cfg(not(feature = "server"))]
use crate::browser;
#[cfg(not(feature = "server"))]
use crate::routes::Route;

/// Delay between background snapshot refreshes.
#[cfg_attr(feature = "server", allow(dead_code))]
pub const SNAPSHOT_POLL_MS: u64 = 4_000;

/// The latest role-filtered snapshot, shared by every page behind the
/// auth guard.
#[derive(Clone, Copy, PartialEq)]
pub struct Workspace {
    pub snapshot: Signal<Option<WorkspaceSnapshot>>,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            snapshot: Signal::new(None),
        }
    }

    /// Fetch a fresh snapshot and publish it. Pages call this after every
    /// mutation so the change shows without waiting for the next poll.
    pub async fn reload(mut self) -> Result<(), AppError> {
        match server::api::get_snapshot().await {
            Ok(snapshot) => {
                self.snapshot.set(Some(snapshot));
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                Err(AppError::from_server_error(&message)
                    .unwrap_or_else(|| AppError::internal(message)))
            }
        }
    }
}

pub fn use_workspace() -> Workspace {
    use_context::<Workspace>()
}

/// Headless component that keeps the snapshot fresh and, while location
/// sharing is on, streams position fixes to the server.
///
/// Mount once inside the layout so it runs on every authenticated page.
#[component]
pub fn LiveSync() -> Element {
    let workspace = use_workspace();
    let auth = use_auth();

    use_coroutine(move |_: UnboundedReceiver<()>| async move {
        // Server functions run in-process during SSR; polling there would
        // block the render.
        #[cfg(not(feature = "server"))]
        {
            let mut auth = auth;
            loop {
                browser::sleep_ms(SNAPSHOT_POLL_MS).await;
                match workspace.reload().await {
                    Ok(()) => {}
                    Err(e) if e.is_session_failure() => {
                        tracing::info!("Session ended; returning to login");
                        auth.clear_auth();
                        navigator().replace(Route::Login {});
                        break;
                    }
                    Err(e) => tracing::debug!(error = %e.message, "Snapshot refresh failed"),
                }
            }
        }
        #[cfg(feature = "server")]
        let _ = (workspace, auth);
    });

    let sharing = use_memo(move || {
        workspace
            .snapshot
            .read()
            .as_ref()
            .is_some_and(|s| s.sharing_location)
    });

    // Restarts whenever the sharing flag flips; the dropped future ends the
    // previous watch.
    let _broadcast = use_resource(move || {
        let on = sharing();
        async move {
            #[cfg(not(feature = "server"))]
            {
                if !on {
                    browser::clear_watch();
                    return;
                }
                let mut watch = browser::watch_position();
                while let Some(fix) = watch.next().await {
                    if let Err(e) = server::api::update_location(fix.lat, fix.lng).await {
                        tracing::debug!(error = %e, "Location update rejected");
                    }
                }
            }
            #[cfg(feature = "server")]
            let _ = on;
        }
    });

    rsx! {}
}

/// Wall clock that ticks once a second on the client, for countdowns.
pub fn use_now() -> Signal<DateTime<Utc>> {
    let now = use_signal(Utc::now);
    use_coroutine(move |_: UnboundedReceiver<()>| async move {
        #[cfg(not(feature = "server"))]
        {
            let mut now = now;
            loop {
                browser::sleep_ms(1_000).await;
                now.set(Utc::now());
            }
        }
        #[cfg(feature = "server")]
        let _ = now;
    });
    now
}
