//! Ahorrista is a personal finance backend for tracking savings goals.
//!
//! Each goal carries a target amount and a running current amount, and the
//! current amount is kept equal to the sum of the goal's recorded
//! contributions by routing every ledger mutation through a transaction
//! coordinator. This library provides the stores, the coordinator, the
//! service facade, and a JSON REST API over them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod auth;
mod contribution;
pub mod database_id;
pub mod date_validation;
pub mod db;
pub mod endpoints;
mod goal;
mod logging;
pub mod models;
mod routing;
pub mod service;
pub mod stores;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required request field was missing or empty.
    #[error("the field '{0}' is required")]
    MissingField(&'static str),

    /// A zero or negative amount was used where a positive amount is
    /// required.
    ///
    /// Contributions and target amounts record money being put aside, so
    /// they must be strictly greater than zero.
    #[error("the amount must be greater than zero")]
    InvalidAmount,

    /// A string could not be validated as a calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A string did not name a valid goal status.
    #[error("invalid goal status \"{0}\", expected \"active\", \"completed\" or \"cancelled\"")]
    InvalidStatus(String),

    /// An update request did not supply any fields to change.
    #[error("no fields were provided to update")]
    EmptyUpdate,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the
    /// parameters (e.g., ID) are correct and that the resource has been
    /// created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The authenticated caller does not own the resource they tried to
    /// access.
    #[error("the caller does not have permission to access this resource")]
    Forbidden,

    /// The request did not carry a verified caller identity.
    ///
    /// Authentication happens upstream of this service; this error means
    /// the identity header was missing or malformed.
    #[error("missing or malformed caller identity")]
    Unauthenticated,

    /// An atomic ledger operation could not be committed.
    ///
    /// The transaction is rolled back in full, so no partial state is left
    /// behind. The caller may retry the whole operation.
    #[error("the transaction could not be committed: {0}")]
    TransactionFailure(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            // Code 787 occurs when a FOREIGN KEY constraint failed: a write
            // referenced a goal row that does not exist.
            rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 787 => {
                Error::NotFound
            }
            // Code 275 occurs when a CHECK constraint failed, e.g. an update
            // that would drive a goal's current amount below zero.
            rusqlite::Error::SqliteFailure(sql_error, ref desc) if sql_error.extended_code == 275 => {
                Error::TransactionFailure(
                    desc.clone()
                        .unwrap_or_else(|| "a storage constraint rejected the write".to_owned()),
                )
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::MissingField(_)
            | Error::InvalidAmount
            | Error::InvalidDate(_)
            | Error::InvalidStatus(_)
            | Error::EmptyUpdate => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::TransactionFailure(_) | Error::DatabaseLock | Error::SqlError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Internal faults are logged for the operator and replaced with a
        // generic message so storage details never reach the client.
        let message = if status.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
            "Internal server error.".to_owned()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}
