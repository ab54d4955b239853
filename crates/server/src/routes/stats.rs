use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use db::models::{
    enquiry::Enquiry, invoice::Invoice, lead::Lead, project::Project,
    support_request::SupportRequest, transaction::Transaction, user::User,
};
use services::services::stats::{
    DashboardStats, EnquiryStats, FinanceSummary, PipelineStage, dashboard_stats, enquiry_stats,
    finance_summary, lead_pipeline,
};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

pub async fn get_dashboard_stats(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<DashboardStats>>, ApiError> {
    let pool = state.pool();
    let projects = Project::find_all(pool).await?;
    let invoices = Invoice::find_all(pool).await?;
    let support = SupportRequest::find_all(pool).await?;
    let users = User::find_all(pool).await?;
    Ok(ResponseJson(ApiResponse::success(dashboard_stats(
        &projects, &invoices, &support, &users,
    ))))
}

pub async fn get_lead_pipeline(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<PipelineStage>>>, ApiError> {
    let leads = Lead::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(lead_pipeline(&leads))))
}

pub async fn get_enquiry_stats(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<EnquiryStats>>, ApiError> {
    let enquiries = Enquiry::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(enquiry_stats(&enquiries))))
}

pub async fn get_finance_summary(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<FinanceSummary>>, ApiError> {
    let transactions = Transaction::find_all(state.pool()).await?;
    Ok(ResponseJson(ApiResponse::success(finance_summary(
        &transactions,
    ))))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/stats",
        Router::new()
            .route("/dashboard", get(get_dashboard_stats))
            .route("/leads/pipeline", get(get_lead_pipeline))
            .route("/enquiries", get(get_enquiry_stats))
            .route("/finance", get(get_finance_summary)),
    )
}
