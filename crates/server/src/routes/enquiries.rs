use axum::{
    Json, Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post},
};
use db::models::{
    enquiry::{CreateEnquiry, Enquiry, UpdateEnquiry},
    lead::Lead,
};
use services::services::enquiries::EnquiryService;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn get_enquiries(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Enquiry>>>, ApiError> {
    let enquiries = Enquiry::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(enquiries)))
}

pub async fn get_enquiry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Enquiry>>, ApiError> {
    let enquiry = Enquiry::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("enquiry"))?;
    Ok(ResponseJson(ApiResponse::success(enquiry)))
}

/// Public contact-form submissions land here.
pub async fn create_enquiry(
    State(state): State<AppState>,
    Json(payload): Json<CreateEnquiry>,
) -> Result<ResponseJson<ApiResponse<Enquiry>>, ApiError> {
    let enquiry = Enquiry::create(state.pool(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(enquiry)))
}

pub async fn update_enquiry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEnquiry>,
) -> Result<ResponseJson<ApiResponse<Enquiry>>, ApiError> {
    let enquiry = Enquiry::update(state.pool(), id, &payload)
        .await?
        .ok_or(ApiError::NotFound("enquiry"))?;
    Ok(ResponseJson(ApiResponse::success(enquiry)))
}

/// Promote an enquiry into a pipeline lead.
pub async fn convert_enquiry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Lead>>, ApiError> {
    let lead = EnquiryService::convert_to_lead(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("enquiry"))?;
    Ok(ResponseJson(ApiResponse::success(lead)))
}

pub async fn delete_enquiry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Enquiry::delete(state.pool(), id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("enquiry"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/enquiries", get(get_enquiries).post(create_enquiry))
        .route(
            "/enquiries/{id}",
            get(get_enquiry).put(update_enquiry).delete(delete_enquiry),
        )
        .route("/enquiries/{id}/convert", post(convert_enquiry))
}
