use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::db::document_repo;
use crate::sanitize;

use super::error::UploadError;
use super::views;
use super::AppState;

pub async fn index() -> Html<String> {
    Html(views::index_page())
}

/// `POST /upload`: store the `file` field, run the pipeline, show the result.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Html<String>, UploadError> {
    // A request that is not multipart at all carries no file either.
    let mut multipart = multipart.map_err(|_| UploadError::MissingFile)?;

    let (raw_name, bytes) = loop {
        let Some(field) = multipart.next_field().await? else {
            return Err(UploadError::MissingFile);
        };
        if field.name() != Some("file") {
            continue;
        }
        let raw_name = field.file_name().unwrap_or_default().to_string();
        break (raw_name, field.bytes().await?);
    };

    let filename = sanitize::secure_filename(&raw_name).ok_or(UploadError::InvalidFilename)?;
    let path = state.upload_dir.join(&filename);
    tokio::fs::write(&path, &bytes).await?;

    tracing::info!(file = %filename, bytes = bytes.len(), "Upload stored");

    let pipeline = state.pipeline.clone();
    let outcome = tokio::task::spawn_blocking(move || pipeline.run(&path, &filename)).await??;

    Ok(Html(views::upload_result_page(&outcome)))
}

pub async fn dashboard(State(state): State<AppState>) -> Response {
    match document_repo::list_summaries(state.pipeline.database()) {
        Ok(documents) => Html(views::dashboard_page(&documents)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list documents");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load documents").into_response()
        }
    }
}

/// `GET /view/{id}`. Ids that are not integers are treated as missing.
pub async fn view_document(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<i64>() else {
        return not_found();
    };

    match document_repo::find_by_id(state.pipeline.database(), id) {
        Ok(Some(doc)) => Html(views::document_page(&doc)).into_response(),
        Ok(None) => not_found(),
        Err(e) => {
            tracing::error!(id, error = %e, "Failed to load document");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load document").into_response()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Document not found").into_response()
}
