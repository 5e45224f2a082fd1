//! Card store general application items.

use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::middleware::Next;
use axum::{
    Json,
    response::{IntoResponse, Response},
};

use http::{HeaderValue, StatusCode, header};

use cardstore_model::{Error as ApiError, Status};

use derive_more::{Deref, Display, From};

use crate::config::{ServerConfig, Validation};
use crate::store::{CardStore, FileStore, StoreError};

/// Shared server state.
///
/// Cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// The port the server is binded to.
    pub port: u16,
    /// How strictly card bodies are checked.
    pub validation: Validation,
    /// The card store.
    pub store: Arc<dyn CardStore>,
}

impl AppState {
    /// Creates a new `AppState` backed by the configured data file.
    ///
    /// See [`ServerConfig`] to learn more on what the options do.
    pub async fn new(config: ServerConfig) -> AppState {
        let ServerConfig {
            port,
            data_path,
            validation,
        } = config;

        let store = FileStore::open(data_path).await;

        AppState {
            port,
            validation,
            store: Arc::new(store),
        }
    }

    /// Creates a new `AppState` over an existing store.
    pub fn with_store(store: Arc<dyn CardStore>, validation: Validation) -> AppState {
        AppState {
            port: crate::config::DEFAULT_PORT,
            validation,
            store,
        }
    }
}

impl Debug for AppState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("port", &self.port)
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

/// App REST headers.
pub async fn app_rest_headers(request: Request, next: Next) -> Response {
    let mut res = next.run(request).await;

    // apply additional headers for REST safety
    res.headers_mut().extend([
        (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        (
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("frame-ancestors 'none'"),
        ),
        (
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ),
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
    ]);

    res
}

/// Logs the internal error a handler attached to its response, if any.
pub async fn log_app_errors(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if let Some(err) = response.extensions().get::<Arc<AppError>>() {
        tracing::error!(?err, "an unexpected error occurred inside a handler");
    }
    response
}

/// App JSON extractor and responder.
#[derive(Deref, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T> IntoResponse for AppJson<T>
where
    Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}

/// An app error.
#[derive(Debug)]
pub struct AppError {
    kind: AppErrorKind,
}

impl AppError {
    /// The kind of error.
    pub fn kind(&self) -> &AppErrorKind {
        &self.kind
    }

    /// Checks if an error is internal.
    pub fn is_internal(&self) -> bool {
        self.kind.is_internal()
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            AppErrorKind::Json(err) => Some(err),
            AppErrorKind::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<T> for AppError
where
    AppErrorKind: From<T>,
{
    fn from(value: T) -> Self {
        AppError {
            kind: AppErrorKind::from(value),
        }
    }
}

#[derive(Debug, Display, From)]
pub enum AppErrorKind {
    /// The request's JSON body was malformed or unexpected.
    #[display("{_0}")]
    Json(JsonRejection),
    /// A card body was missing fields it needs.
    #[from(ignore)]
    #[display("Missing required fields: {}", _0.join(", "))]
    MissingFields(Vec<&'static str>),
    /// The card wasn't found.
    #[from(ignore)]
    #[display("Resource not found")]
    NotFound,
    /// The data file could not be read or written.
    #[display("{_0}")]
    Store(StoreError),
}

impl AppErrorKind {
    /// Checks if an error is internal.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppErrorKind::Store(_) | AppErrorKind::Json(JsonRejection::BytesRejection(_))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, internal_error) = match self.kind {
            // JSON errors
            AppErrorKind::Json(JsonRejection::JsonDataError(error)) => (
                StatusCode::BAD_REQUEST,
                ApiError::new(Status::BadRequest).with_message(error.body_text()),
                None,
            ),
            AppErrorKind::Json(JsonRejection::JsonSyntaxError(error)) => (
                StatusCode::BAD_REQUEST,
                ApiError::new(Status::BadRequest).with_message(error.body_text()),
                None,
            ),
            AppErrorKind::Json(JsonRejection::MissingJsonContentType(_)) => (
                StatusCode::BAD_REQUEST,
                ApiError::new(Status::BadRequest)
                    .with_message("Expected request with `Content-Type: application/json`."),
                None,
            ),
            // Card errors
            AppErrorKind::MissingFields(_) => (
                StatusCode::BAD_REQUEST,
                ApiError::new(Status::BadRequest).with_message("Missing required fields"),
                None,
            ),
            AppErrorKind::NotFound => (
                StatusCode::NOT_FOUND,
                ApiError::new(Status::NotFound),
                None,
            ),
            // create a generic internal error
            error_kind => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new(Status::InternalServerError)
                    .with_message("An internal server error occurred."),
                Some(AppError { kind: error_kind }),
            ),
        };

        let mut response = (status, AppJson(error)).into_response();
        if let Some(error) = internal_error {
            response.extensions_mut().insert(Arc::new(error));
        }
        response
    }
}
