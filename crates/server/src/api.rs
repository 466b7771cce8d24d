//! HTTP API routes matching the host's custom-provider contract.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use ranobes_provider_core::error::LookupError;
use ranobes_provider_core::record::MetadataQuery;
use ranobes_provider_core::wire::BookMatch;

use crate::AppState;

/// Query params for GET /search
#[derive(Debug, serde::Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub author: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct SearchResponse {
    pub matches: Vec<BookMatch>,
}

#[derive(Debug, serde::Serialize)]
struct ErrorBody {
    error: String,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/search", get(search))
        .with_state(state)
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = MetadataQuery {
        title: params.query,
        author: params.author,
    };
    let record = state.provider.lookup(&query).await.map_err(ApiError::from)?;
    let matches = record.map(BookMatch::from).into_iter().collect();
    Ok(Json(SearchResponse { matches }))
}

#[derive(Debug)]
enum ApiError {
    Unauthenticated(String),
    Upstream(String),
}

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::Unauthenticated => ApiError::Unauthenticated(e.to_string()),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ApiError::Unauthenticated(s) => (StatusCode::UNAUTHORIZED, s),
            ApiError::Upstream(s) => (StatusCode::BAD_GATEWAY, s),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthenticated(s) => write!(f, "unauthenticated: {}", s),
            ApiError::Upstream(s) => write!(f, "upstream failure: {}", s),
        }
    }
}
