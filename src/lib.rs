//! Matrículas is a web dashboard for exploring school-enrollment records.
//!
//! The dataset is read once from a delimited file at startup and shared
//! read-only by every request. Each page runs the same pipeline: global
//! filters, then page filters, then grouping and summation, and hands the
//! result to server-rendered HTML and ECharts charts.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod aggregation;
mod app_state;
mod dataset;
mod endpoints;
mod enrollment;
mod filters;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod pages;
mod routing;

#[cfg(test)]
mod test_utils;

pub use aggregation::{GroupTotal, distinct_values, filter_by, group_sum, top_n};
pub use app_state::AppState;
pub use dataset::Dataset;
pub use enrollment::{EnrollmentRecord, Field, FieldValue};
pub use filters::{FilterCascade, FilterQuery, FilterStage, RegionFilterPlacement, Selection};
pub use pages::Page;
pub use routing::build_router;

use crate::{internal_server_error::InternalServerError, not_found::get_404_not_found_response};

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
    /// The dataset file could not be opened or read.
    ///
    /// Callers should pass in the path and the original error as a string.
    #[error("could not read the dataset file {0}: {1}")]
    DatasetUnreadable(String, String),

    /// The header row of the dataset does not contain a required column.
    #[error("the dataset is missing the required column \"{0}\"")]
    MissingColumn(String),

    /// A row could not be parsed, e.g. a number column holds text or the
    /// row has the wrong number of fields.
    #[error("invalid record on line {line}: {reason}")]
    InvalidRecord {
        /// The 1-based line number in the dataset file.
        line: u64,
        /// What was wrong with the row.
        reason: String,
    },

    /// A row has a negative enrollment count.
    ///
    /// Sums over negative counts are meaningless, so the dataset is rejected
    /// instead of silently aggregated.
    #[error("negative enrollment count {value} on line {line}")]
    NegativeEnrollmentCount {
        /// The 1-based line number in the dataset file.
        line: u64,
        /// The offending value.
        value: i128,
    },

    /// A text column is blank.
    #[error("the column \"{column}\" is empty on line {line}")]
    EmptyField {
        /// The 1-based line number in the dataset file.
        line: u64,
        /// The name of the blank column.
        column: String,
    },

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}
