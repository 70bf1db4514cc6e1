// src/presentation/http/routes.rs
use crate::domain::{article::Article, slug::Sluggable};
use crate::presentation::http::controllers::articles;
use crate::presentation::http::middleware::resolve_slug;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json, Router,
    http::{HeaderValue, Method},
    middleware::from_fn,
    routing::{get, put},
};
use serde::Serialize;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub const ARTICLE_BY_SLUG_PATH: &str = "/api/v1/articles/by-slug/{slug}";

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/v1/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            ARTICLE_BY_SLUG_PATH,
            get(articles::get_article_by_slug).route_layer(from_fn(move |req, next| {
                resolve_slug(req, next, Article::COLLECTION, Some(ARTICLE_BY_SLUG_PATH))
            })),
        )
        .route(
            "/api/v1/articles/{id}",
            put(articles::update_article).delete(articles::delete_article),
        )
        .route(
            "/api/v1/articles/{id}/slugs",
            get(articles::article_slug_history),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
    })
}
