use super::ArticleQueryService;
use crate::{
    application::{
        dto::SlugHistoryDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{Article, ArticleId},
        slug::{CollectionName, Sluggable},
    },
};

pub struct GetSlugHistoryQuery {
    pub article_id: i64,
}

impl ArticleQueryService {
    pub async fn slug_history(&self, query: GetSlugHistoryQuery) -> ApplicationResult<SlugHistoryDto> {
        let id = ArticleId::new(query.article_id)?;
        let article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let collection = CollectionName::new(Article::COLLECTION)?;
        let info = self
            .history
            .slug_info(&collection, article.record_id())
            .await?;
        Ok(SlugHistoryDto::new(article.id.into(), info))
    }
}
