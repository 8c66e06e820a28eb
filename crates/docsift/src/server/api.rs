//! JSON read API over the stored documents.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::db::{document_repo, DocumentRow, DocumentSummary};

use super::AppState;

/// Envelope for every JSON response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

type ApiResult<T> = (StatusCode, Json<ApiResponse<T>>);

pub async fn list_documents(State(state): State<AppState>) -> ApiResult<Vec<DocumentSummary>> {
    match document_repo::list_summaries(state.pipeline.database()) {
        Ok(docs) => (StatusCode::OK, Json(ApiResponse::ok(docs))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::err(e.to_string())),
        ),
    }
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DocumentRow> {
    let Ok(id) = id.parse::<i64>() else {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err("Document not found")),
        );
    };

    match document_repo::find_by_id(state.pipeline.database(), id) {
        Ok(Some(doc)) => (StatusCode::OK, Json(ApiResponse::ok(doc))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err("Document not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::err(e.to_string())),
        ),
    }
}

pub async fn health() -> &'static str {
    "OK"
}
