//! Bookmark and user records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the bookmarks table on the provider
pub const BOOKMARKS_TABLE: &str = "bookmarks";

/// A user-owned record pairing a display title with a URL
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// The authenticated user as reported by the identity provider
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Insert payload for a new bookmark row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub user_id: String,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,
    #[error("url is required")]
    EmptyUrl,
}

/// Trimmed form input that passed validation. Only a draft can be submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookmarkDraft {
    title: String,
    url: String,
}

impl BookmarkDraft {
    /// Validate raw form fields. Both must be non-empty after trimming.
    pub fn parse(title: &str, url: &str) -> Result<Self, ValidationError> {
        let title = title.trim();
        let url = url.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }
        Ok(Self {
            title: title.to_string(),
            url: url.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Attach the owner read at submission time
    pub fn into_new_bookmark(self, user_id: impl Into<String>) -> NewBookmark {
        NewBookmark {
            title: self.title,
            url: self.url,
            user_id: user_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_trims_both_fields() {
        let draft = BookmarkDraft::parse("  Example ", "\thttps://example.com\n").unwrap();
        assert_eq!(draft.title(), "Example");
        assert_eq!(draft.url(), "https://example.com");
    }

    #[test]
    fn draft_rejects_blank_title() {
        assert_eq!(
            BookmarkDraft::parse("   ", "https://example.com"),
            Err(ValidationError::EmptyTitle)
        );
    }

    #[test]
    fn draft_rejects_blank_url() {
        assert_eq!(
            BookmarkDraft::parse("Example", ""),
            Err(ValidationError::EmptyUrl)
        );
    }

    #[test]
    fn new_bookmark_serializes_as_insert_row() {
        let row = BookmarkDraft::parse("Example", "https://example.com")
            .unwrap()
            .into_new_bookmark("user-1");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Example",
                "url": "https://example.com",
                "user_id": "user-1",
            })
        );
    }

    #[test]
    fn user_email_is_optional() {
        let user: User = serde_json::from_str(r#"{"id":"u1"}"#).unwrap();
        assert_eq!(user.email, None);
    }
}
