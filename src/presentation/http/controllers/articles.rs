// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{CreateArticleCommand, DeleteArticleCommand, UpdateArticleCommand},
    dto::{ArticleDto, SlugHistoryDto},
    queries::articles::{GetArticleByIdQuery, GetSlugHistoryQuery, ListArticlesQuery},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::middleware::ResolvedSlug;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::json;

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
pub struct ArticleListParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}

pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ArticleListParams>,
) -> HttpResult<Json<Vec<ArticleDto>>> {
    state
        .services
        .article_queries
        .list_articles(ListArticlesQuery {
            limit: params.limit,
        })
        .await
        .into_http()
        .map(Json)
}

/// Runs behind the slug-resolving middleware, which has already settled redirects and misses.
pub async fn get_article_by_slug(
    Extension(state): Extension<HttpState>,
    Extension(resolved): Extension<ResolvedSlug>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article_by_id(GetArticleByIdQuery {
            id: resolved.record_id,
        })
        .await
        .into_http()
        .map(Json)
}

pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<CreateArticleRequest>,
) -> HttpResult<(StatusCode, Json<ArticleDto>)> {
    let command = CreateArticleCommand {
        title: payload.title,
        body: payload.body,
    };

    state
        .services
        .article_commands
        .create_article(command)
        .await
        .into_http()
        .map(|article| (StatusCode::CREATED, Json(article)))
}

pub async fn update_article(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = UpdateArticleCommand {
        id,
        title: payload.title,
        body: payload.body,
    };

    state
        .services
        .article_commands
        .update_article(command)
        .await
        .into_http()
        .map(Json)
}

pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .article_commands
        .delete_article(DeleteArticleCommand { id })
        .await
        .into_http()?;

    Ok(Json(json!({ "status": "deleted" })))
}

pub async fn article_slug_history(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<SlugHistoryDto>> {
    state
        .services
        .article_queries
        .slug_history(GetSlugHistoryQuery { article_id: id })
        .await
        .into_http()
        .map(Json)
}
