use super::ArticleQueryService;
use crate::application::{dto::ArticleDto, error::ApplicationResult};

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

pub struct ListArticlesQuery {
    pub limit: u32,
}

impl ArticleQueryService {
    pub async fn list_articles(&self, query: ListArticlesQuery) -> ApplicationResult<Vec<ArticleDto>> {
        let limit = if query.limit == 0 {
            DEFAULT_LIMIT
        } else {
            query.limit.min(MAX_LIMIT)
        };

        let records = self.read_repo.list().await?;
        Ok(records
            .into_iter()
            .take(limit as usize)
            .map(Into::into)
            .collect())
    }
}
