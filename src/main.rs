use anyhow::Result;
use permaslug::application::{
    ports::{time::Clock, util::SlugGenerator},
    services::ApplicationServices,
};
use permaslug::config::AppConfig;
use permaslug::domain::{
    article::{ArticleReadRepository, ArticleWriteRepository},
    slug::SlugClaimRepository,
};
use permaslug::infrastructure::{
    database,
    repositories::{
        SqliteArticleReadRepository, SqliteArticleWriteRepository, SqliteSlugClaimRepository,
    },
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use permaslug::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env()?;
    let policy = config.slug_policy();

    let pool = database::init_pool(config.database_url(), config.database_max_connections()).await?;
    database::run_migrations(&pool).await?;
    let pool = Arc::new(pool);

    let article_write_repo: Arc<dyn ArticleWriteRepository> =
        Arc::new(SqliteArticleWriteRepository::new(Arc::clone(&pool)));
    let article_read_repo: Arc<dyn ArticleReadRepository> =
        Arc::new(SqliteArticleReadRepository::new(Arc::clone(&pool)));
    let slug_claim_repo: Arc<dyn SlugClaimRepository> =
        Arc::new(SqliteSlugClaimRepository::new(Arc::clone(&pool)));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator::new(policy.max_length));

    let services = Arc::new(ApplicationServices::new(
        article_write_repo,
        article_read_repo,
        slug_claim_repo,
        clock,
        slugger,
        policy,
    ));

    let state = HttpState { services };

    let app = build_router(state, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(
        max_length = policy.max_length,
        max_suffix = policy.max_suffix,
        "listening on {address}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
