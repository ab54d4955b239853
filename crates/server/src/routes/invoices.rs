use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use db::models::invoice::{CreateInvoice, Invoice, UpdateInvoice};
use serde::Deserialize;
use services::services::invoices::InvoiceService;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct InvoiceFilter {
    pub client_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
}

pub async fn get_invoices(
    State(state): State<AppState>,
    Query(filter): Query<InvoiceFilter>,
) -> Result<ResponseJson<ApiResponse<Vec<Invoice>>>, ApiError> {
    let invoices = match (filter.client_id, filter.project_id) {
        (Some(client_id), _) => Invoice::find_by_client_id(state.pool(), client_id).await?,
        (None, Some(project_id)) => Invoice::find_by_project_id(state.pool(), project_id).await?,
        (None, None) => Invoice::find_all(state.pool()).await?,
    };
    Ok(ResponseJson(ApiResponse::success(invoices)))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<Invoice>>, ApiError> {
    let invoice = Invoice::find_by_id(state.pool(), id)
        .await?
        .ok_or(ApiError::NotFound("invoice"))?;
    Ok(ResponseJson(ApiResponse::success(invoice)))
}

pub async fn create_invoice(
    State(state): State<AppState>,
    Json(payload): Json<CreateInvoice>,
) -> Result<ResponseJson<ApiResponse<Invoice>>, ApiError> {
    let invoice = InvoiceService::create(state.pool(), &state.notifier, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(invoice)))
}

/// Updates run through the service so a transition into `paid` fans out to
/// the admin team as well as the client.
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInvoice>,
) -> Result<ResponseJson<ApiResponse<Invoice>>, ApiError> {
    let invoice = InvoiceService::update(state.pool(), &state.notifier, id, &payload)
        .await?
        .ok_or(ApiError::NotFound("invoice"))?;
    Ok(ResponseJson(ApiResponse::success(invoice)))
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let deleted = Invoice::delete(state.pool(), id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("invoice"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/invoices", get(get_invoices).post(create_invoice))
        .route(
            "/invoices/{id}",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        )
}
