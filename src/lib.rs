//! Lume is a web app for managing your personal finances.
//!
//! This library serves HTML pages rendered on the server and enhanced with HTMX.
//! The user's data lives behind a separate REST API, which the pages read from
//! and write to on behalf of the logged in user.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod account;
mod alert;
mod api_client;
mod app_state;
mod asset;
mod auth;
mod budget;
mod cash_flow;
mod category;
mod cpf;
mod credit_card;
mod dashboard;
mod endpoints;
mod error;
mod form_fields;
mod html;
mod internal_server_error;
mod logging;
mod month;
mod navigation;
mod not_found;
mod notification;
mod recurring;
mod report;
mod routing;
mod settings;
mod timezone;
mod transaction;
mod transaction_type;
mod wallet;

#[cfg(test)]
mod test_utils;

pub use api_client::DEFAULT_API_URL;
pub use app_state::AppState;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use timezone::get_local_offset;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
