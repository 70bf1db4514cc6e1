// tests/support/helpers.rs
use super::mocks;
use axum::body::{self, Body};
use axum::http::Response;
use permaslug::application::{
    ports::{time::Clock, util::SlugGenerator},
    services::ApplicationServices,
};
use permaslug::domain::article::{ArticleReadRepository, ArticleWriteRepository};
use permaslug::domain::slug::SlugClaimRepository;
use permaslug::domain::slug::services::{
    SlugHistoryStore, SlugLifecycleManager, SlugPolicy, SlugResolver, UniquenessResolver,
};
use permaslug::infrastructure::{
    database,
    repositories::{
        InMemorySlugClaimRepository, SqliteArticleReadRepository, SqliteArticleWriteRepository,
        SqliteSlugClaimRepository,
    },
    util::DefaultSlugGenerator,
};
use permaslug::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;

/// The four slug services wired over one claim store.
pub struct SlugServices {
    pub repo: Arc<dyn SlugClaimRepository>,
    pub history: Arc<SlugHistoryStore>,
    pub uniqueness: Arc<UniquenessResolver>,
    pub lifecycle: SlugLifecycleManager,
    pub resolver: SlugResolver,
}

pub fn slug_services_with(
    repo: Arc<dyn SlugClaimRepository>,
    generator: Arc<dyn SlugGenerator>,
    policy: SlugPolicy,
) -> SlugServices {
    let clock: Arc<dyn Clock> = Arc::new(mocks::DummyClock);
    let history = Arc::new(SlugHistoryStore::new(Arc::clone(&repo), clock));
    let uniqueness = Arc::new(UniquenessResolver::new(
        Arc::clone(&repo),
        policy.max_suffix,
    ));
    let lifecycle = SlugLifecycleManager::new(
        generator,
        Arc::clone(&uniqueness),
        Arc::clone(&history),
        policy.max_save_attempts,
    );
    let resolver = SlugResolver::new(Arc::clone(&history));
    SlugServices {
        repo,
        history,
        uniqueness,
        lifecycle,
        resolver,
    }
}

/// Slug services over an in-memory store using the real slugifier.
pub fn memory_slug_services() -> SlugServices {
    slug_services_with(
        Arc::new(InMemorySlugClaimRepository::new()),
        Arc::new(DefaultSlugGenerator::default()),
        SlugPolicy::default(),
    )
}

/// Fresh in-memory SQLite database with migrations applied.
pub async fn sqlite_pool() -> Arc<SqlitePool> {
    let pool = database::init_pool("sqlite::memory:", 1)
        .await
        .expect("open in-memory sqlite");
    database::run_migrations(&pool)
        .await
        .expect("run migrations");
    Arc::new(pool)
}

pub async fn build_test_services() -> Arc<ApplicationServices> {
    build_services_with(|writes| writes, Arc::new(DefaultSlugGenerator::default())).await
}

/// Services over in-memory SQLite, with the article writes and slug generator swappable.
pub async fn build_services_with(
    wrap_writes: impl FnOnce(Arc<dyn ArticleWriteRepository>) -> Arc<dyn ArticleWriteRepository>,
    slugger: Arc<dyn SlugGenerator>,
) -> Arc<ApplicationServices> {
    let pool = sqlite_pool().await;
    let article_write = wrap_writes(Arc::new(SqliteArticleWriteRepository::new(Arc::clone(
        &pool,
    ))));
    let article_read: Arc<dyn ArticleReadRepository> =
        Arc::new(SqliteArticleReadRepository::new(Arc::clone(&pool)));
    let slug_claims: Arc<dyn SlugClaimRepository> =
        Arc::new(SqliteSlugClaimRepository::new(Arc::clone(&pool)));
    let clock: Arc<dyn Clock> = Arc::new(mocks::SteppingClock::default());

    Arc::new(ApplicationServices::new(
        article_write,
        article_read,
        slug_claims,
        clock,
        slugger,
        SlugPolicy::default(),
    ))
}

pub async fn build_test_state() -> HttpState {
    HttpState {
        services: build_test_services().await,
    }
}

pub async fn make_test_router() -> axum::Router {
    let state = build_test_state().await;
    build_router(state, &["http://localhost:3000".to_string()])
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
