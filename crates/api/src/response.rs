//! Shared response envelope types for API handlers.
//!
//! Successful responses carry `"success": true` next to the payload, plus a
//! `message` on mutations and counts on list endpoints. Errors use the
//! envelope built by [`crate::error::AppError`].

use serde::Serialize;

/// `{ "success": true, "message"?: ..., "data": T }` envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse::with_message("Libro agregado exitosamente", book)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message),
            data,
        }
    }
}

/// `{ "success": true, "total": n, "disponibles"?: n, "data": [...] }` envelope.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub success: bool,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disponibles: Option<usize>,
    pub data: Vec<T>,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            total: data.len(),
            disponibles: None,
            data,
        }
    }

    pub fn with_available(data: Vec<T>, disponibles: usize) -> Self {
        Self {
            disponibles: Some(disponibles),
            ..Self::new(data)
        }
    }
}
