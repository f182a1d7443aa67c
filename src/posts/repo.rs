use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime},
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub const COLLECTION: &str = "posts";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: String,
    pub content: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

fn collection(db: &Database) -> Collection<Post> {
    db.collection(COLLECTION)
}

pub async fn insert(
    db: &Database,
    user_id: String,
    content: String,
) -> mongodb::error::Result<Post> {
    let post = Post {
        id: ObjectId::new(),
        user_id,
        content,
        created_at: Utc::now(),
    };
    collection(db).insert_one(&post, None).await?;
    Ok(post)
}

/// All posts, or one user's posts when a filter is given. Newest first.
pub async fn list(db: &Database, user_id: Option<&str>) -> mongodb::error::Result<Vec<Post>> {
    let filter = match user_id {
        Some(user_id) => doc! { "userId": user_id },
        None => doc! {},
    };
    let options = FindOptions::builder()
        .sort(doc! { "createdAt": -1 })
        .build();
    collection(db).find(filter, options).await?.try_collect().await
}

/// Replaces `content` on the identified post, returning the post-update
/// record. `userId` and `createdAt` are never touched.
pub async fn update_content(
    db: &Database,
    id: ObjectId,
    content: &str,
) -> mongodb::error::Result<Option<Post>> {
    let options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();
    collection(db)
        .find_one_and_update(
            doc! { "_id": id },
            doc! { "$set": { "content": content } },
            options,
        )
        .await
}

pub async fn delete(db: &Database, id: ObjectId) -> mongodb::error::Result<Option<Post>> {
    collection(db).find_one_and_delete(doc! { "_id": id }, None).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, Bson};

    #[test]
    fn post_serializes_to_the_stored_document_shape() {
        let post = Post {
            id: ObjectId::new(),
            user_id: "u1".into(),
            content: "Hello world".into(),
            created_at: Utc::now(),
        };
        let doc = bson::to_document(&post).expect("serialize");
        assert_eq!(doc.get_object_id("_id").expect("_id"), post.id);
        assert_eq!(doc.get_str("userId").expect("userId"), "u1");
        assert_eq!(doc.get_str("content").expect("content"), "Hello world");
        assert!(matches!(doc.get("createdAt"), Some(Bson::DateTime(_))));
    }

    #[test]
    fn stored_document_deserializes_back() {
        let post = Post {
            id: ObjectId::new(),
            user_id: "u2".into(),
            content: "second".into(),
            created_at: Utc::now(),
        };
        let doc = bson::to_document(&post).expect("serialize");
        let back: Post = bson::from_document(doc).expect("deserialize");
        assert_eq!(back.id, post.id);
        assert_eq!(back.user_id, post.user_id);
        // BSON datetimes carry millisecond precision.
        assert_eq!(
            back.created_at.timestamp_millis(),
            post.created_at.timestamp_millis()
        );
    }
}
