//! Article request handlers.
//!
//! # Routes
//! ```text
//! POST   /api/articles        → create
//! GET    /api/articles        → get_all
//! GET    /api/articles/{id}   → get_one
//! PUT    /api/articles/{id}   → update
//! DELETE /api/articles/{id}   → delete
//! ```
//!
//! `/api/articles/` with no id reaches the same item handlers, which answer
//! "id is null". Bodies and path ids are decoded by hand so that malformed
//! input lands in the same `{"error": ...}` envelope as every other failure,
//! and the router fallbacks do the same for unknown routes and methods.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        FromRequestParts, Path, State,
    },
    http::request::Parts,
    routing::get,
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::response::{ErrorResponse, StatusBody};
use crate::http::server::AppState;
use crate::model::{Article, ArticleDraft};

/// Body of a successful delete.
pub const ARTICLE_DELETED: &str = "article deleted";

type HandlerResult<T> = Result<Json<T>, ErrorResponse>;

/// Article routes, to be given state by the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/articles", get(get_all).post(create))
        .route("/api/articles/", get(get_one).put(update).delete(delete))
        .route(
            "/api/articles/{id}",
            get(get_one).put(update).delete(delete),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
}

/// The `{id}` path segment; empty on routes that carry none.
#[derive(Debug)]
pub struct ArticleId(pub String);

impl FromRequestParts<AppState> for ArticleId {
    type Rejection = ErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id: Result<Option<Path<String>>, PathRejection> =
            <Option<Path<String>> as FromRequestParts<AppState>>::from_request_parts(parts, state)
                .await;
        match id {
            Ok(Some(Path(id))) => Ok(Self(id)),
            Ok(None) => Ok(Self(String::new())),
            Err(rejection) => Err(state.fail(rejection)),
        }
    }
}

fn decode_draft(body: Result<Bytes, BytesRejection>) -> Result<ArticleDraft, ApiError> {
    let bytes = body?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn require_id(id: &str) -> Result<&str, ApiError> {
    if id.is_empty() {
        Err(ApiError::MissingId)
    } else {
        Ok(id)
    }
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> HandlerResult<Article> {
    let draft = decode_draft(body).map_err(|e| state.fail(e))?;

    // Client-supplied ids are never honored.
    let draft = draft.with_generated_id();

    let article = state
        .articles
        .create(draft)
        .await
        .map_err(|e| state.fail(e))?;

    tracing::debug!(id = %article.id, "Article created");
    Ok(Json(article))
}

pub async fn get_all(State(state): State<AppState>) -> HandlerResult<Vec<Article>> {
    let articles = state.articles.get_all().await.map_err(|e| state.fail(e))?;
    Ok(Json(articles))
}

pub async fn get_one(
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
) -> HandlerResult<Article> {
    let id = require_id(&id).map_err(|e| state.fail(e))?;

    let article = state.articles.get_one(id).await.map_err(|e| state.fail(e))?;
    Ok(Json(article))
}

pub async fn update(
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
    body: Result<Bytes, BytesRejection>,
) -> HandlerResult<Article> {
    let id = require_id(&id).map_err(|e| state.fail(e))?;
    let draft = decode_draft(body).map_err(|e| state.fail(e))?;

    let article = state
        .articles
        .update(id, draft)
        .await
        .map_err(|e| state.fail(e))?;

    tracing::debug!(id = %article.id, "Article updated");
    Ok(Json(article))
}

pub async fn delete(
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
) -> HandlerResult<StatusBody> {
    let id = require_id(&id).map_err(|e| state.fail(e))?;

    state.articles.delete(id).await.map_err(|e| state.fail(e))?;

    tracing::debug!(id = %id, "Article deleted");
    Ok(Json(StatusBody::new(ARTICLE_DELETED)))
}

pub async fn route_not_found(State(state): State<AppState>) -> ErrorResponse {
    state.fail(ApiError::RouteNotFound)
}

pub async fn method_not_allowed(State(state): State<AppState>) -> ErrorResponse {
    state.fail(ApiError::MethodNotAllowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatusMapping;
    use crate::http::error::ErrorPolicy;
    use crate::service::Articles;
    use crate::store::InMemoryArticleStore;
    use axum::http::StatusCode;
    use std::sync::Arc;

    fn state(policy: ErrorPolicy) -> AppState {
        let store = Arc::new(InMemoryArticleStore::new());
        AppState::new(Arc::new(Articles::new(store)), policy)
    }

    fn body(json: &str) -> Result<Bytes, BytesRejection> {
        Ok(Bytes::from(json.to_string()))
    }

    #[tokio::test]
    async fn create_generates_fresh_id() {
        let state = state(ErrorPolicy::default());

        let Json(article) = create(
            State(state.clone()),
            body(r#"{"id":"mine","title":"T","text":"X","authors":"A"}"#),
        )
        .await
        .unwrap();

        assert_ne!(article.id, "mine");
        assert!(uuid::Uuid::parse_str(&article.id).is_ok());
        assert_eq!(article.title, "T");
    }

    #[tokio::test]
    async fn create_rejects_malformed_json() {
        let state = state(ErrorPolicy::default());

        let err = create(State(state), body("{not json")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_id_is_reported_as_null() {
        let state = state(ErrorPolicy::default());

        let err = get_one(State(state.clone()), ArticleId(String::new()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "id is null");

        let err = update(State(state.clone()), ArticleId(String::new()), body("{}"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "id is null");

        let err = delete(State(state), ArticleId(String::new()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn empty_id_is_bad_request_when_strict() {
        let state = state(ErrorPolicy::new(StatusMapping::Strict, true));

        let err = delete(State(state), ArticleId(String::new()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_checks_id_before_body() {
        let state = state(ErrorPolicy::default());

        let err = update(State(state), ArticleId(String::new()), body("{not json"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "id is null");
    }

    #[tokio::test]
    async fn update_rejects_malformed_json_for_known_id() {
        let state = state(ErrorPolicy::default());
        let Json(article) = create(State(state.clone()), body(r#"{"title":"T"}"#))
            .await
            .unwrap();

        let err = update(State(state), ArticleId(article.id), body("{not json"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_reports_status_envelope() {
        let state = state(ErrorPolicy::default());

        let Json(status) = delete(State(state), ArticleId("missing".to_string()))
            .await
            .unwrap();
        assert_eq!(status, StatusBody::new(ARTICLE_DELETED));
    }
}
