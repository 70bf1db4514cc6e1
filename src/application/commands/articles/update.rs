use super::ArticleCommandService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{Article, ArticleBody, ArticleId, ArticleTitle, ArticleUpdate},
};
use chrono::{DateTime, Utc};

pub struct UpdateArticleCommand {
    pub id: i64,
    pub title: Option<String>,
    pub body: Option<String>,
}

impl ArticleCommandService {
    /// Write the new content, then bring the slug in step with the title. A slug failure
    /// puts the previous title and body back before the error surfaces.
    pub async fn update_article(&self, command: UpdateArticleCommand) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let mut article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;

        let UpdateArticleCommand { id: _, title, body } = command;
        let title_opt = title.map(ArticleTitle::new).transpose()?;
        let body_opt = body.map(ArticleBody::new).transpose()?;

        if title_opt.is_none() && body_opt.is_none() {
            return Ok(article.into());
        }

        let previous = article.clone();
        let now = self.clock.now();
        let new_title = title_opt.unwrap_or_else(|| article.title.clone());
        let new_body = body_opt.unwrap_or_else(|| article.body.clone());
        article.set_content(new_title.clone(), new_body.clone(), now);

        let mut update = ArticleUpdate::new(id, previous.updated_at)
            .with_title(new_title)
            .with_body(new_body);
        update.set_updated_at(article.updated_at);

        // The row goes first: a rejected write must leave the slug claims untouched.
        let mut updated = self.write_repo.update(update).await?;

        if let Err(err) = self.lifecycle.on_save(&mut updated).await {
            tracing::warn!(article = %id, error = %err, "slug update failed, restoring previous content");
            self.restore(&previous, updated.updated_at).await;
            return Err(err.into());
        }

        Ok(updated.into())
    }

    async fn restore(&self, previous: &Article, written_at: DateTime<Utc>) {
        let mut undo = ArticleUpdate::new(previous.id, written_at)
            .with_title(previous.title.clone())
            .with_body(previous.body.clone());
        undo.set_updated_at(previous.updated_at);
        if let Err(err) = self.write_repo.update(undo).await {
            tracing::error!(article = %previous.id, error = %err, "could not restore article after slug failure");
        }
    }
}
