//! Request and response bodies of the link store HTTP API
//!
//! Required fields are `Option`s so a missing field becomes a 400 with a
//! descriptive message instead of a deserializer rejection.

use serde::{Deserialize, Serialize};

use super::ids::LinkId;

/// Query of `GET /links`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListLinksQuery {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Body of `POST /links`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLinkRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub encrypted_title: Option<String>,
    #[serde(default)]
    pub encrypted_url: Option<String>,
}

/// Response of `POST /links`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLinkResponse {
    pub id: LinkId,
    pub message: String,
}

/// Query of `DELETE /links`
///
/// `id` stays a string so a non-numeric value is reported as a 400.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteLinkQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Generic success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Generic failure body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_uses_camel_case() {
        let body: AddLinkRequest = serde_json::from_str(
            r#"{"userId": "u1", "encryptedTitle": "t", "encryptedUrl": "u"}"#,
        )
        .unwrap();
        assert_eq!(body.user_id.as_deref(), Some("u1"));
        assert_eq!(body.encrypted_title.as_deref(), Some("t"));
        assert_eq!(body.encrypted_url.as_deref(), Some("u"));
    }

    #[test]
    fn test_add_request_tolerates_missing_fields() {
        let body: AddLinkRequest = serde_json::from_str(r#"{"userId": "u1"}"#).unwrap();
        assert!(body.encrypted_title.is_none());
        assert!(body.encrypted_url.is_none());
    }
}
