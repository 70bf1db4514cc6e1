// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::{
    application::{dto::ArticleDto, error::ApplicationResult},
    domain::article::{ArticleBody, ArticleTitle, NewArticle},
};

pub struct CreateArticleCommand {
    pub title: String,
    pub body: String,
}

impl ArticleCommandService {
    /// Insert the article, then give it a slug. A slug failure removes the row again so the
    /// save is all-or-nothing from the caller's point of view.
    pub async fn create_article(&self, command: CreateArticleCommand) -> ApplicationResult<ArticleDto> {
        let title = ArticleTitle::new(command.title)?;
        let body = ArticleBody::new(command.body)?;
        let now = self.clock.now();

        let mut article = self
            .write_repo
            .insert(NewArticle {
                title,
                body,
                created_at: now,
                updated_at: now,
            })
            .await?;

        if let Err(err) = self.lifecycle.on_save(&mut article).await {
            tracing::warn!(article = %article.id, error = %err, "slug assignment failed, rolling back insert");
            if let Err(cleanup) = self.write_repo.delete(article.id).await {
                tracing::error!(article = %article.id, error = %cleanup, "could not remove article after slug failure");
            }
            return Err(err.into());
        }

        Ok(article.into())
    }
}
