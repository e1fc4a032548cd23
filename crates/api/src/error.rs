use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use biblioteca_core::error::CoreError;
use biblioteca_db::store::StoreError;
use serde_json::json;

/// Message returned for every sanitized 500.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// Message returned for unmatched routes.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Ruta no encontrada";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for backend
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce the `{ "success": false, "error": ..., "code": ... }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `biblioteca_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A catalog backend failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matched the request.
    #[error("Route not found")]
    RouteNotFound,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id, "Entity not found");
                    (
                        StatusCode::NOT_FOUND,
                        "NOT_FOUND",
                        format!("{entity} no encontrado"),
                    )
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::UploadRejected(msg) => {
                    (StatusCode::BAD_REQUEST, "UPLOAD_REJECTED", msg.clone())
                }
            },

            // --- Backend errors ---
            AppError::Store(StoreError::Database(err)) => classify_sqlx_error(err),
            AppError::Store(err @ StoreError::InvalidTableName(_)) => {
                tracing::error!(error = %err, "Store misconfigured");
                internal()
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::RouteNotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                ROUTE_NOT_FOUND_MESSAGE.to_string(),
            ),
        };

        let body = json!({
            "success": false,
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_ERROR_MESSAGE.to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// Driver errors never reach the client: everything maps to a sanitized
/// 500, with the Postgres SQLSTATE logged when there is one. A lost or
/// exhausted pool reports 503.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::Database(db_err) => {
            let sqlstate = db_err.code();
            tracing::error!(
                error = %db_err,
                sqlstate = sqlstate.as_deref().unwrap_or("unknown"),
                "Database error",
            );
            internal()
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            tracing::error!(error = %err, "Database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "DATABASE_UNAVAILABLE",
                INTERNAL_ERROR_MESSAGE.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

// ---------------------------------------------------------------------------
// Extractor rejections
// ---------------------------------------------------------------------------

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("JSON inválido: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(format!("Parámetro de ruta inválido: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(format!("Parámetros de consulta inválidos: {}", rejection.body_text()))
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(format!("Formulario inválido: {}", rejection.body_text()))
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::Core(CoreError::UploadRejected(
                "La imagen supera el tamaño máximo permitido".to_string(),
            ));
        }
        AppError::BadRequest(format!("Formulario inválido: {}", err.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_uses_spanish_message() {
        let (status, body) = render(AppError::Core(CoreError::NotFound {
            entity: "Libro",
            id: 7,
        }))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Libro no encontrado");
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn validation_is_bad_request() {
        let (status, body) =
            render(CoreError::Validation("Faltan campos requeridos: titulo".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"], "Faltan campos requeridos: titulo");
    }

    #[tokio::test]
    async fn store_errors_are_sanitized() {
        let (status, body) = render(AppError::Store(StoreError::Database(
            sqlx::Error::Protocol("relation libros_dev does not exist".into()),
        )))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
        assert!(!body.to_string().contains("libros_dev"));
    }

    #[tokio::test]
    async fn closed_pool_is_service_unavailable() {
        let (status, body) =
            render(AppError::Store(StoreError::Database(sqlx::Error::PoolClosed))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "DATABASE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn route_not_found_envelope() {
        let (status, body) = render(AppError::RouteNotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], ROUTE_NOT_FOUND_MESSAGE);
    }
}
