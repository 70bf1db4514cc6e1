// tests/sqlite_slug_claims.rs
use permaslug::application::ports::util::SlugGenerator;
use permaslug::domain::article::{
    ArticleBody, ArticleId, ArticleTitle, ArticleWriteRepository, NewArticle,
};
use permaslug::domain::errors::DomainError;
use permaslug::domain::slug::services::{Resolution, SlugPolicy};
use permaslug::domain::slug::{
    ClaimState, CollectionName, NewSlugClaim, RecordId, Slug, SlugClaimRepository, SlugKey,
};
use permaslug::infrastructure::repositories::{
    SqliteArticleWriteRepository, SqliteSlugClaimRepository,
};
use permaslug::infrastructure::util::DefaultSlugGenerator;
use std::sync::Arc;

mod support;
use support::{Person, fixed_now, slug_services_with, sqlite_pool};

fn people() -> CollectionName {
    CollectionName::new("people").unwrap()
}

fn new_claim(record: i64, slug: &str) -> NewSlugClaim {
    NewSlugClaim {
        collection: people(),
        slug: Slug::new(slug).unwrap(),
        record_id: RecordId::new(record).unwrap(),
        source_text: Some(slug.to_string()),
        assigned_at: fixed_now(),
    }
}

async fn repo() -> SqliteSlugClaimRepository {
    SqliteSlugClaimRepository::new(sqlite_pool().await)
}

#[tokio::test]
async fn assign_current_retires_the_previous_claim() {
    let repo = repo().await;
    let record = RecordId::new(1).unwrap();

    repo.assign_current(new_claim(1, "First")).await.unwrap();
    repo.assign_current(new_claim(1, "Second")).await.unwrap();
    repo.assign_current(new_claim(1, "Third")).await.unwrap();

    let current = repo.find_current(&people(), record).await.unwrap().unwrap();
    assert_eq!(current.slug.as_str(), "Third");
    assert_eq!(current.state, ClaimState::Current);
    assert_eq!(current.source_text.as_deref(), Some("Third"));

    let history: Vec<String> = repo
        .list_history(&people(), record)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.slug.into_inner())
        .collect();
    assert_eq!(history, vec!["First", "Second"]);

    let first = repo
        .find_by_slug(&people(), &Slug::new("First").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(first.is_historical());
    assert!(first.source_text.is_none());
}

#[tokio::test]
async fn unique_constraint_surfaces_as_uniqueness_violation() {
    let repo = repo().await;
    repo.assign_current(new_claim(1, "Shared")).await.unwrap();

    let err = repo.assign_current(new_claim(2, "Shared")).await.unwrap_err();
    assert!(err.is_uniqueness_violation(), "unexpected error: {err:?}");

    // The failed transaction must not have retired anything.
    let still = repo
        .find_current(&people(), RecordId::new(1).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(still.slug.as_str(), "Shared");
}

#[tokio::test]
async fn failed_assignment_keeps_the_records_own_current_slug() {
    let repo = repo().await;
    repo.assign_current(new_claim(1, "Taken")).await.unwrap();
    repo.assign_current(new_claim(2, "Mine")).await.unwrap();

    let err = repo.assign_current(new_claim(2, "Taken")).await.unwrap_err();
    assert!(err.is_uniqueness_violation());

    let current = repo
        .find_current(&people(), RecordId::new(2).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.slug.as_str(), "Mine");
    assert!(
        repo.list_history(&people(), RecordId::new(2).unwrap())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn own_historical_claim_is_reactivated() {
    let repo = repo().await;
    let record = RecordId::new(1).unwrap();
    repo.assign_current(new_claim(1, "Alpha")).await.unwrap();
    repo.assign_current(new_claim(1, "Beta")).await.unwrap();
    repo.assign_current(new_claim(1, "Alpha")).await.unwrap();

    let current = repo.find_current(&people(), record).await.unwrap().unwrap();
    assert_eq!(current.slug.as_str(), "Alpha");
    let history: Vec<String> = repo
        .list_history(&people(), record)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.slug.into_inner())
        .collect();
    assert_eq!(history, vec!["Beta"]);
}

#[tokio::test]
async fn find_by_key_matches_any_case() {
    let repo = repo().await;
    repo.assign_current(new_claim(1, "Ram-Gupta")).await.unwrap();
    repo.insert_historical(new_claim(2, "RAM-GUPTA")).await.unwrap();
    repo.assign_current(new_claim(3, "Someone-Else")).await.unwrap();

    let matches = repo
        .find_by_key(&people(), &SlugKey::from_requested("ram-GUPTA"))
        .await
        .unwrap();

    assert_eq!(matches.len(), 2);
    assert!(matches[0].is_current());
    assert_eq!(matches[0].slug.as_str(), "Ram-Gupta");
    assert!(matches[1].is_historical());
}

#[tokio::test]
async fn insert_historical_refuses_claimed_slug() {
    let repo = repo().await;
    repo.assign_current(new_claim(1, "Held")).await.unwrap();

    let err = repo.insert_historical(new_claim(2, "Held")).await.unwrap_err();
    assert!(err.is_uniqueness_violation());
}

#[tokio::test]
async fn release_record_deletes_all_claims() {
    let repo = repo().await;
    repo.assign_current(new_claim(1, "One")).await.unwrap();
    repo.assign_current(new_claim(1, "Two")).await.unwrap();
    repo.assign_current(new_claim(2, "Other")).await.unwrap();

    let released = repo
        .release_record(&people(), RecordId::new(1).unwrap())
        .await
        .unwrap();

    assert_eq!(released, 2);
    assert!(
        repo.find_by_slug(&people(), &Slug::new("One").unwrap())
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        repo.find_by_slug(&people(), &Slug::new("Other").unwrap())
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn slug_services_behave_the_same_over_sqlite() {
    let generator: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator::default());
    let svc = slug_services_with(
        Arc::new(repo().await),
        generator,
        SlugPolicy::default(),
    );
    let people = CollectionName::new("people").unwrap();

    let mut first = Person::new(1, "Ram Gupta");
    let mut second = Person::new(2, "Ram Gupta");
    svc.lifecycle.on_save(&mut first).await.unwrap();
    svc.lifecycle.on_save(&mut second).await.unwrap();
    assert_eq!(first.current_slug(), Some("Ram-Gupta"));
    assert_eq!(second.current_slug(), Some("Ram-Gupta-2"));

    first.name = "Ram Prakash Gupta".into();
    svc.lifecycle.on_save(&mut first).await.unwrap();
    assert_eq!(first.history(), vec!["Ram-Gupta"]);

    let resolution = svc.resolver.resolve(&people, "ram-gupta").await.unwrap();
    assert_eq!(
        resolution,
        Resolution::Redirect {
            record_id: first.id,
            canonical: Slug::new("Ram-Prakash-Gupta").unwrap(),
        }
    );
    let resolution = svc.resolver.resolve(&people, "ram-gupta-2").await.unwrap();
    assert_eq!(
        resolution,
        Resolution::Redirect {
            record_id: second.id,
            canonical: Slug::new("Ram-Gupta-2").unwrap(),
        }
    );
}

#[tokio::test]
async fn deleting_an_article_row_releases_its_claims_together() {
    let pool = sqlite_pool().await;
    let writes = SqliteArticleWriteRepository::new(Arc::clone(&pool));
    let claims = SqliteSlugClaimRepository::new(pool);
    let articles = CollectionName::new("articles").unwrap();

    let article = writes
        .insert(NewArticle {
            title: ArticleTitle::new("Gone Soon").unwrap(),
            body: ArticleBody::new("body").unwrap(),
            created_at: fixed_now(),
            updated_at: fixed_now(),
        })
        .await
        .unwrap();
    let record = RecordId::from(article.id);
    for slug in ["Gone-Soon", "Gone-Now"] {
        claims
            .assign_current(NewSlugClaim {
                collection: articles.clone(),
                slug: Slug::new(slug).unwrap(),
                record_id: record,
                source_text: None,
                assigned_at: fixed_now(),
            })
            .await
            .unwrap();
    }
    // Same id in another collection is not touched.
    claims
        .assign_current(NewSlugClaim {
            collection: people(),
            slug: Slug::new("Gone-Soon").unwrap(),
            record_id: record,
            source_text: None,
            assigned_at: fixed_now(),
        })
        .await
        .unwrap();

    writes.delete(article.id).await.unwrap();

    assert!(claims.find_current(&articles, record).await.unwrap().is_none());
    assert!(claims.list_history(&articles, record).await.unwrap().is_empty());
    assert!(claims.find_current(&people(), record).await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_a_missing_article_keeps_existing_claims() {
    let pool = sqlite_pool().await;
    let writes = SqliteArticleWriteRepository::new(Arc::clone(&pool));
    let claims = SqliteSlugClaimRepository::new(pool);
    let articles = CollectionName::new("articles").unwrap();
    let record = RecordId::new(42).unwrap();
    claims
        .assign_current(NewSlugClaim {
            collection: articles.clone(),
            slug: Slug::new("Orphan").unwrap(),
            record_id: record,
            source_text: None,
            assigned_at: fixed_now(),
        })
        .await
        .unwrap();

    let err = writes
        .delete(ArticleId::new(42).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound(_)));
    assert!(claims.find_current(&articles, record).await.unwrap().is_some());
}
