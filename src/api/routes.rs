use axum::{
    extract::{Form, Json, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::models::{SummarizeRequest, SummarizeResponse};
use crate::api::page::{self, Outcome};
use crate::api::response::{self, ApiResponse};
use crate::error::Result;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new()
        .route("/api/summarize", post(summarize_json))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    Router::new()
        .route("/", get(index_page).post(summarize_form))
        .route("/health", get(health))
        .merge(api)
        .with_state(app_state)
}

async fn index_page() -> Html<String> {
    Html(page::render("", Outcome::Empty))
}

async fn health() -> &'static str {
    "ok"
}

async fn summarize_form(
    State(state): State<AppState>,
    Form(req): Form<SummarizeRequest>,
) -> (StatusCode, Html<String>) {
    let result = state.pipeline.run(&req.api_key, &req.url).await;

    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(err) => err.status_code(),
    };

    (status, Html(page::render(req.url.trim(), Outcome::from(&result))))
}

async fn summarize_json(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SummarizeResponse>>)> {
    let summary = state.pipeline.run(&req.api_key, &req.url).await?;
    Ok(response::success(SummarizeResponse::from(summary)))
}
