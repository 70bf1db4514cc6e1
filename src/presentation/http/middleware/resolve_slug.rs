// src/presentation/http/middleware/resolve_slug.rs
use crate::application::error::ApplicationError;
use crate::domain::slug::{CollectionName, services::Resolution};
use crate::presentation::http::error::HttpError;
use crate::presentation::http::state::HttpState;
use axum::{
    body::Body,
    extract::{FromRequestParts, Path},
    http::{Request, StatusCode, header::LOCATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Placeholder substituted with the canonical slug when building a redirect target.
pub const SLUG_PLACEHOLDER: &str = "{slug}";

/// The record a slug path parameter resolved to, inserted as a request extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSlug {
    pub record_id: i64,
    pub slug: String,
}

/// Resolves the `{slug}` path parameter before the wrapped handler runs.
///
/// Usage: `axum::middleware::from_fn(move |req, next| resolve_slug(req, next, "articles", Some("/api/v1/articles/by-slug/{slug}")))`
///
/// With a url template, alternate spellings and former slugs answer with a redirect to the
/// canonical url. Without one, the handler runs directly for the record they point to.
///
/// Must be installed with `route_layer` so the path parameters are already matched.
pub async fn resolve_slug(
    req: Request<Body>,
    next: Next,
    collection: &'static str,
    url_template: Option<&'static str>,
) -> Response {
    let Some(state) = req.extensions().get::<HttpState>().cloned() else {
        return HttpError::from_error(ApplicationError::infrastructure(
            "application state missing",
        ))
        .into_response();
    };

    let collection = match CollectionName::new(collection) {
        Ok(collection) => collection,
        Err(err) => return HttpError::from_error(err.into()).into_response(),
    };

    let (mut parts, body) = req.into_parts();
    let requested = match Path::<String>::from_request_parts(&mut parts, &()).await {
        Ok(Path(slug)) => slug,
        Err(_) => return HttpError::not_found("slug not found").into_response(),
    };

    let resolver = state.services.slug_resolver();
    let resolved = match resolver.resolve(&collection, &requested).await {
        Ok(Resolution::Found(claim)) => ResolvedSlug {
            record_id: claim.record_id.into(),
            slug: claim.slug.into_inner(),
        },
        Ok(Resolution::Redirect {
            record_id,
            canonical,
        }) => match url_template {
            Some(template) => {
                let location = template.replace(SLUG_PLACEHOLDER, canonical.as_str());
                return (StatusCode::MOVED_PERMANENTLY, [(LOCATION, location)]).into_response();
            }
            None => ResolvedSlug {
                record_id: record_id.into(),
                slug: canonical.into_inner(),
            },
        },
        Ok(Resolution::NotFound) => return HttpError::not_found("slug not found").into_response(),
        Err(err) => return HttpError::from_error(err.into()).into_response(),
    };

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(resolved);
    next.run(req).await
}
