//! Augmentation endpoint handlers.
//!
//! Each handler normalizes its query into core params, pulls the image out
//! of the body, and runs the pipeline on the blocking pool.

use augment_core::{
    augment, AugmentError, Augmentation, CropParams, Operation, ResizeParams, RotateParams,
};
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    Json,
};

use crate::error::{ApiError, ApiResult};
use crate::types::{HealthResponse, ImagePayload, ImageResponse, QueryParams};
use crate::AppState;

// Rejections are taken as values so they reach the client as JSON errors.
type RawQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;
type RawBody = Result<Bytes, BytesRejection>;

fn query_params(query: RawQuery) -> ApiResult<QueryParams> {
    let Query(pairs) = query?;
    Ok(QueryParams(pairs))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn resize(
    State(state): State<AppState>,
    query: RawQuery,
    body: RawBody,
) -> ApiResult<Json<ImageResponse>> {
    let query = query_params(query)?;
    let params = ResizeParams::from_query(
        query.get("width"),
        query.get("height"),
        query.get("interpolation"),
    );
    run(&state, Operation::Resize, params.map(Augmentation::Resize), &body?).await
}

pub async fn crop(
    State(state): State<AppState>,
    query: RawQuery,
    body: RawBody,
) -> ApiResult<Json<ImageResponse>> {
    let query = query_params(query)?;
    let params = CropParams::from_query(
        query.get("xBegin"),
        query.get("xEnd"),
        query.get("yBegin"),
        query.get("yEnd"),
    );
    run(&state, Operation::Crop, Some(Augmentation::Crop(params)), &body?).await
}

pub async fn rotate(
    State(state): State<AppState>,
    query: RawQuery,
    body: RawBody,
) -> ApiResult<Json<ImageResponse>> {
    let query = query_params(query)?;
    let params = RotateParams::from_query(query.get("angle"), query.get("scale"));
    run(&state, Operation::Rotate, params.map(Augmentation::Rotate), &body?).await
}

pub async fn negative(State(state): State<AppState>, body: RawBody) -> ApiResult<Json<ImageResponse>> {
    run(&state, Operation::Negative, Some(Augmentation::Negative), &body?).await
}

/// Shared request flow. `augmentation` is `None` when a required parameter
/// is missing.
async fn run(
    state: &AppState,
    operation: Operation,
    augmentation: Option<Augmentation>,
    body: &[u8],
) -> ApiResult<Json<ImageResponse>> {
    let image = ImagePayload::image_from_body(body);
    let (Some(image), Some(augmentation)) = (image, augmentation) else {
        return Err(AugmentError::MissingInput(operation).into());
    };

    let options = state.config.encode_options();
    let encoded = tokio::task::spawn_blocking(move || augment(&image, &augmentation, &options))
        .await
        .map_err(|e| ApiError::Internal(format!("{operation} worker failed: {e}")))??;

    tracing::info!(%operation, bytes = encoded.len(), "Augmentation complete");
    Ok(Json(ImageResponse { image: encoded }))
}
