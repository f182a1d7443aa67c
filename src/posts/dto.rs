use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repo::Post;

// Fields stay optional; presence is checked in the handlers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostBody {
    pub content: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostBody {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_hex(),
            user_id: post.user_id,
            content: post.content,
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn create_body_reads_camel_case_fields() {
        let body: CreatePostBody =
            serde_json::from_str(r#"{"content":"Hello world","userId":"u1"}"#).expect("parse");
        assert_eq!(body.content.as_deref(), Some("Hello world"));
        assert_eq!(body.user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn update_body_tolerates_missing_content() {
        let body: UpdatePostBody = serde_json::from_str("{}").expect("parse");
        assert!(body.content.is_none());
    }

    #[test]
    fn list_query_filter_is_optional() {
        let query: ListQuery = serde_json::from_str("{}").expect("parse");
        assert!(query.user_id.is_none());
        let query: ListQuery = serde_json::from_str(r#"{"userId":"u1"}"#).expect("parse");
        assert_eq!(query.user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn response_uses_wire_field_names_and_hex_id() {
        let post = Post {
            id: ObjectId::new(),
            user_id: "u1".into(),
            content: "Hello world".into(),
            created_at: Utc::now(),
        };
        let hex = post.id.to_hex();
        let json = serde_json::to_value(PostResponse::from(post)).expect("serialize");
        assert_eq!(json["id"], serde_json::Value::String(hex));
        assert_eq!(json["userId"], "u1");
        assert!(json["createdAt"].is_string());
    }
}
