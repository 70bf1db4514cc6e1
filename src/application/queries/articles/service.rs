use std::sync::Arc;

use crate::domain::{article::ArticleReadRepository, slug::services::SlugHistoryStore};

pub struct ArticleQueryService {
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) history: Arc<SlugHistoryStore>,
}

impl ArticleQueryService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        history: Arc<SlugHistoryStore>,
    ) -> Self {
        Self { read_repo, history }
    }
}
