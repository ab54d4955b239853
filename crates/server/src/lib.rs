use axum::{Router, routing::get};
use db::DBService;
use services::services::{
    email::EmailService, notification::NotificationService, storage::StorageService,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utils::response::ApiResponse;

pub mod config;
pub mod error;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub db: DBService,
    pub email: EmailService,
    pub notifier: NotificationService,
    pub storage: StorageService,
}

impl AppState {
    pub fn new(db: DBService, email: EmailService, storage: StorageService) -> Self {
        let notifier = NotificationService::new(email.clone());
        Self {
            db,
            email,
            notifier,
            storage,
        }
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.db.pool
    }
}

async fn health() -> axum::Json<ApiResponse<&'static str>> {
    axum::Json(ApiResponse::success("ok"))
}

pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .merge(routes::users::router())
        .merge(routes::projects::router())
        .merge(routes::invoices::router())
        .merge(routes::support::router())
        .merge(routes::meetings::router())
        .merge(routes::leads::router())
        .merge(routes::enquiries::router())
        .merge(routes::quotations::router())
        .merge(routes::transactions::router())
        .merge(routes::planning::router())
        .merge(routes::team::router())
        .merge(routes::notifications::router())
        .merge(routes::settings::router())
        .merge(routes::stats::router())
        .merge(routes::upload::router());

    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use db::test_support::new_pool;

    pub async fn test_state() -> AppState {
        let db = DBService {
            pool: new_pool().await,
        };
        AppState::new(db, EmailService::disabled(), StorageService::disabled())
    }
}
