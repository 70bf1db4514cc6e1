// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::articles::ArticleCommandService,
        ports::{time::Clock, util::SlugGenerator},
        queries::articles::ArticleQueryService,
    },
    domain::{
        article::{ArticleReadRepository, ArticleWriteRepository},
        slug::{
            SlugClaimRepository,
            services::{
                SlugHistoryStore, SlugLifecycleManager, SlugPolicy, SlugResolver,
                UniquenessResolver,
            },
        },
    },
};

pub struct ApplicationServices {
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    slug_lifecycle: Arc<SlugLifecycleManager>,
    slug_resolver: Arc<SlugResolver>,
    slug_history: Arc<SlugHistoryStore>,
}

impl ApplicationServices {
    pub fn new(
        article_write_repo: Arc<dyn ArticleWriteRepository>,
        article_read_repo: Arc<dyn ArticleReadRepository>,
        slug_claim_repo: Arc<dyn SlugClaimRepository>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
        policy: SlugPolicy,
    ) -> Self {
        let slug_history = Arc::new(SlugHistoryStore::new(
            Arc::clone(&slug_claim_repo),
            Arc::clone(&clock),
        ));
        let uniqueness = Arc::new(UniquenessResolver::new(
            Arc::clone(&slug_claim_repo),
            policy.max_suffix,
        ));
        let slug_lifecycle = Arc::new(SlugLifecycleManager::new(
            Arc::clone(&slugger),
            uniqueness,
            Arc::clone(&slug_history),
            policy.max_save_attempts,
        ));
        let slug_resolver = Arc::new(SlugResolver::new(Arc::clone(&slug_history)));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_write_repo),
            Arc::clone(&article_read_repo),
            Arc::clone(&slug_lifecycle),
            Arc::clone(&clock),
        ));

        let article_queries = Arc::new(ArticleQueryService::new(
            Arc::clone(&article_read_repo),
            Arc::clone(&slug_history),
        ));

        Self {
            article_commands,
            article_queries,
            slug_lifecycle,
            slug_resolver,
            slug_history,
        }
    }

    /// Lifecycle manager for record types other than articles that share this store.
    pub fn slug_lifecycle(&self) -> Arc<SlugLifecycleManager> {
        Arc::clone(&self.slug_lifecycle)
    }

    pub fn slug_resolver(&self) -> Arc<SlugResolver> {
        Arc::clone(&self.slug_resolver)
    }

    pub fn slug_history(&self) -> Arc<SlugHistoryStore> {
        Arc::clone(&self.slug_history)
    }
}
