// src/application/commands/articles/delete.rs
use super::ArticleCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::article::ArticleId,
};

pub struct DeleteArticleCommand {
    pub id: i64,
}

impl ArticleCommandService {
    /// Deleting an article also frees every slug it ever held.
    pub async fn delete_article(&self, command: DeleteArticleCommand) -> ApplicationResult<()> {
        let id = ArticleId::new(command.id)?;
        let article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        self.write_repo.delete(article.id).await?;
        tracing::info!(article = %article.id, "article deleted with its slugs");
        Ok(())
    }
}
