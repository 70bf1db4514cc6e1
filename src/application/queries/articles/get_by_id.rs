use super::ArticleQueryService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleId,
};

pub struct GetArticleByIdQuery {
    pub id: i64,
}

impl ArticleQueryService {
    /// Load one article with its current and former slugs.
    pub async fn get_article_by_id(
        &self,
        query: GetArticleByIdQuery,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(query.id)?;
        match self.read_repo.find_by_id(id).await? {
            Some(article) => Ok(ArticleDto::from(article)),
            None => Err(ApplicationError::not_found(format!("article {id} not found"))),
        }
    }
}
