//! 个人资料、帖子与评论

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ColumnValue, Entity, Resolve, User, UserView};
use crate::error::Result;
use crate::store::Session;

/// 个人资料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfilePayload {
    pub name: String,
    pub image: String,
    pub content: String,
}

impl Entity for Profile {
    const NAME: &'static str = "profile";
    const TABLE: &'static str = "profiles";
    const PATH: &'static str = "profiles";

    type Payload = ProfilePayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_payload(payload: ProfilePayload, _now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            name: payload.name,
            image: payload.image,
            content: payload.content,
        }
    }

    fn apply(&mut self, payload: ProfilePayload, _now: DateTime<Utc>) {
        self.name = payload.name;
        self.image = payload.image;
        self.content = payload.content;
    }

    fn columns(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("image", self.image.clone().into()),
            ("content", self.content.clone().into()),
        ]
    }
}

/// 帖子
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    /// 发帖用户（软引用）
    pub user_id: i64,
    pub kids: i64,
    pub content: String,
    pub image_url: String,
    pub like: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostPayload {
    pub user_id: i64,
    pub kids: i64,
    pub content: String,
    pub image_url: String,
    pub like: i64,
}

/// 帖子响应，内嵌发帖用户（用户视图自带家庭）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub user: Option<UserView>,
}

impl Entity for Post {
    const NAME: &'static str = "post";
    const TABLE: &'static str = "posts";
    const PATH: &'static str = "posts";

    type Payload = PostPayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_payload(payload: PostPayload, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            user_id: payload.user_id,
            kids: payload.kids,
            content: payload.content,
            image_url: payload.image_url,
            like: payload.like,
            created_at: now,
            updated_at: now,
            published_at: now,
        }
    }

    fn apply(&mut self, payload: PostPayload, now: DateTime<Utc>) {
        self.user_id = payload.user_id;
        self.kids = payload.kids;
        self.content = payload.content;
        self.image_url = payload.image_url;
        self.like = payload.like;
        self.updated_at = now;
    }

    fn columns(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("user_id", self.user_id.into()),
            ("kids", self.kids.into()),
            ("content", self.content.clone().into()),
            ("image_url", self.image_url.clone().into()),
            ("like", self.like.into()),
            ("created_at", self.created_at.into()),
            ("updated_at", self.updated_at.into()),
            ("published_at", self.published_at.into()),
        ]
    }
}

#[async_trait]
impl Resolve for Post {
    type View = PostView;

    async fn resolve<S: Session>(self, session: &mut S) -> Result<PostView> {
        let user = match session.find::<User>(self.user_id).await? {
            Some(user) => Some(user.resolve(session).await?),
            None => None,
        };
        Ok(PostView { post: self, user })
    }
}

/// 评论
///
/// `parent_id` 指向同表的父评论，与 `post_id`、`user_id` 一样只存 ID，不做解析。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub parent_id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentPayload {
    pub parent_id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
}

impl Entity for Comment {
    const NAME: &'static str = "comment";
    const TABLE: &'static str = "comments";
    const PATH: &'static str = "comments";

    type Payload = CommentPayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_payload(payload: CommentPayload, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            parent_id: payload.parent_id,
            post_id: payload.post_id,
            user_id: payload.user_id,
            content: payload.content,
            created_at: now,
        }
    }

    fn apply(&mut self, payload: CommentPayload, _now: DateTime<Utc>) {
        self.parent_id = payload.parent_id;
        self.post_id = payload.post_id;
        self.user_id = payload.user_id;
        self.content = payload.content;
    }

    fn columns(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("parent_id", self.parent_id.into()),
            ("post_id", self.post_id.into()),
            ("user_id", self.user_id.into()),
            ("content", self.content.clone().into()),
            ("created_at", self.created_at.into()),
        ]
    }
}

flat_view!(Profile, Comment);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_post_apply_keeps_creation_stamps() {
        let created = Utc::now();
        let mut post = Post::from_payload(
            PostPayload {
                user_id: 1,
                kids: 0,
                content: "first".to_string(),
                image_url: "https://img/1.png".to_string(),
                like: 0,
            },
            created,
        );

        let later = created + Duration::minutes(5);
        post.apply(
            PostPayload {
                user_id: 2,
                kids: 1,
                content: "edited".to_string(),
                image_url: String::new(),
                like: 10,
            },
            later,
        );

        assert_eq!(post.user_id, 2);
        assert_eq!(post.like, 10);
        assert_eq!(post.content, "edited");
        assert_eq!(post.created_at, created);
        assert_eq!(post.published_at, created);
        assert_eq!(post.updated_at, later);
    }

    #[test]
    fn test_comment_update_does_not_touch_created_at() {
        let created = Utc::now();
        let mut comment = Comment::from_payload(
            CommentPayload {
                parent_id: 0,
                post_id: 1,
                user_id: 1,
                content: "hi".to_string(),
            },
            created,
        );
        comment.apply(
            CommentPayload {
                parent_id: 3,
                post_id: 1,
                user_id: 1,
                content: "hello".to_string(),
            },
            created + Duration::hours(1),
        );

        assert_eq!(comment.parent_id, 3);
        assert_eq!(comment.created_at, created);
    }

    #[test]
    fn test_post_like_column_name() {
        let post = Post::from_payload(
            PostPayload {
                user_id: 1,
                kids: 0,
                content: String::new(),
                image_url: String::new(),
                like: 4,
            },
            Utc::now(),
        );
        assert!(post.columns().contains(&("like", ColumnValue::Int(4))));
    }
}
