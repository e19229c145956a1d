//! Article entity and its inbound draft shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted article row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    /// UUID in textual form. Omitted from JSON when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub text: String,
    pub authors: String,
    /// Assigned by the database at insert time.
    pub created_at: DateTime<Utc>,
}

/// Client-settable article fields, as decoded from a request body.
///
/// Missing string fields decode as empty strings. Fields that are not part
/// of the draft (such as `created_at`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleDraft {
    pub id: Option<String>,
    pub title: String,
    pub text: String,
    pub authors: String,
}

impl ArticleDraft {
    /// Create a draft without an id.
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        authors: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            text: text.into(),
            authors: authors.into(),
        }
    }

    /// Replace whatever id the client sent with a fresh UUID v4.
    pub fn with_generated_id(mut self) -> Self {
        self.id = Some(Uuid::new_v4().to_string());
        self
    }

    /// The caller-assigned id, or a fresh UUID v4 when none (or an empty one) is set.
    pub fn id_or_generate(&self) -> String {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_missing_fields_default_to_empty() {
        let draft: ArticleDraft = serde_json::from_str(r#"{"title":"T"}"#).unwrap();
        assert_eq!(draft.title, "T");
        assert_eq!(draft.text, "");
        assert_eq!(draft.authors, "");
        assert!(draft.id.is_none());
    }

    #[test]
    fn draft_ignores_server_fields() {
        let draft: ArticleDraft = serde_json::from_str(
            r#"{"title":"T","text":"X","authors":"A","created_at":"2020-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(draft, ArticleDraft::new("T", "X", "A"));
    }

    #[test]
    fn draft_rejects_wrong_types() {
        let result = serde_json::from_str::<ArticleDraft>(r#"{"title":42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn generated_id_overrides_client_id() {
        let mut draft = ArticleDraft::new("T", "X", "A");
        draft.id = Some("client-chosen".to_string());

        let draft = draft.with_generated_id();
        let id = draft.id.unwrap();
        assert_ne!(id, "client-chosen");
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn id_or_generate_keeps_caller_id() {
        let mut draft = ArticleDraft::new("T", "X", "A");
        draft.id = Some("fixed".to_string());
        assert_eq!(draft.id_or_generate(), "fixed");

        draft.id = Some(String::new());
        assert!(Uuid::parse_str(&draft.id_or_generate()).is_ok());
    }

    #[test]
    fn article_omits_empty_id() {
        let article = Article {
            id: String::new(),
            title: "T".into(),
            text: "X".into(),
            authors: "A".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&article).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("created_at").is_some());
    }
}
