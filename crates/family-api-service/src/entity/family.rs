//! 家庭与用户

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ColumnValue, Entity, Resolve};
use crate::error::Result;
use crate::store::Session;

/// 家庭
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Family {
    pub id: i64,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// 家庭请求体
#[derive(Debug, Clone, Deserialize)]
pub struct FamilyPayload {
    pub name: String,
}

impl Entity for Family {
    const NAME: &'static str = "family";
    const TABLE: &'static str = "families";
    const PATH: &'static str = "families";

    type Payload = FamilyPayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_payload(payload: FamilyPayload, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            name: payload.name,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, payload: FamilyPayload, now: DateTime<Utc>) {
        self.name = payload.name;
        self.updated_at = now;
    }

    fn columns(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("created_at", self.created_at.into()),
            ("updated_at", self.updated_at.into()),
        ]
    }
}

flat_view!(Family);

/// 应用用户
///
/// `family_id` 为软引用，`quest_role` 标记该用户能否发布任务。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub birth: i64,
    pub age: i64,
    pub gender: String,
    pub quest_role: bool,
    pub family_id: i64,
    pub last_login: DateTime<Utc>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
}

/// 用户请求体
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub birth: i64,
    pub age: i64,
    pub gender: String,
    pub quest_role: bool,
    pub family_id: i64,
}

/// 用户响应，内嵌所属家庭
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    #[serde(flatten)]
    pub user: User,
    pub family: Option<Family>,
}

impl Entity for User {
    const NAME: &'static str = "user";
    const TABLE: &'static str = "app_users";
    const PATH: &'static str = "app-users";

    type Payload = UserPayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_payload(payload: UserPayload, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            name: payload.name,
            email: payload.email,
            password: payload.password,
            birth: payload.birth,
            age: payload.age,
            gender: payload.gender,
            quest_role: payload.quest_role,
            family_id: payload.family_id,
            last_login: now,
            created_at: now,
            updated_at: now,
            published_at: now,
        }
    }

    fn apply(&mut self, payload: UserPayload, now: DateTime<Utc>) {
        self.name = payload.name;
        self.email = payload.email;
        self.password = payload.password;
        self.birth = payload.birth;
        self.age = payload.age;
        self.gender = payload.gender;
        self.quest_role = payload.quest_role;
        self.family_id = payload.family_id;
        self.updated_at = now;
    }

    fn columns(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("email", self.email.clone().into()),
            ("password", self.password.clone().into()),
            ("birth", self.birth.into()),
            ("age", self.age.into()),
            ("gender", self.gender.clone().into()),
            ("quest_role", self.quest_role.into()),
            ("family_id", self.family_id.into()),
            ("last_login", self.last_login.into()),
            ("created_at", self.created_at.into()),
            ("updated_at", self.updated_at.into()),
            ("published_at", self.published_at.into()),
        ]
    }
}

#[async_trait]
impl Resolve for User {
    type View = UserView;

    async fn resolve<S: Session>(self, session: &mut S) -> Result<UserView> {
        let family = session.find::<Family>(self.family_id).await?;
        Ok(UserView { user: self, family })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user_payload(family_id: i64) -> UserPayload {
        UserPayload {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            password: "secret".to_string(),
            birth: 19900101,
            age: 34,
            gender: "female".to_string(),
            quest_role: true,
            family_id,
        }
    }

    #[test]
    fn test_user_from_payload_stamps_all_timestamps() {
        let now = Utc::now();
        let user = User::from_payload(user_payload(1), now);

        assert_eq!(user.id, 0);
        assert_eq!(user.family_id, 1);
        assert_eq!(user.last_login, now);
        assert_eq!(user.created_at, now);
        assert_eq!(user.updated_at, now);
        assert_eq!(user.published_at, now);
    }

    #[test]
    fn test_user_apply_refreshes_updated_at_only() {
        let created = Utc::now();
        let mut user = User::from_payload(user_payload(1), created);
        user.set_id(7);

        let later = created + Duration::seconds(30);
        let mut payload = user_payload(2);
        payload.name = "Bea".to_string();
        user.apply(payload, later);

        assert_eq!(user.id, 7);
        assert_eq!(user.name, "Bea");
        assert_eq!(user.family_id, 2);
        assert_eq!(user.created_at, created);
        assert_eq!(user.published_at, created);
        assert_eq!(user.last_login, created);
        assert_eq!(user.updated_at, later);
    }

    #[test]
    fn test_user_columns_exclude_id() {
        let user = User::from_payload(user_payload(1), Utc::now());
        let columns = user.columns();

        assert_eq!(columns.len(), 12);
        assert!(columns.iter().all(|(name, _)| *name != "id"));
        assert!(columns.contains(&("family_id", ColumnValue::Int(1))));
        assert!(columns.contains(&("quest_role", ColumnValue::Bool(true))));
    }

    #[test]
    fn test_user_json_field_names() {
        let now = Utc::now();
        let mut user = User::from_payload(user_payload(3), now);
        user.set_id(1);
        let view = UserView { user, family: None };

        let json = serde_json::to_value(&view).unwrap();
        for key in ["id", "family_id", "quest_role", "last_login", "createdAt", "updatedAt", "publishedAt"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert!(json.get("created_at").is_none());
        assert!(json["family"].is_null());
    }

    #[test]
    fn test_family_payload_ignores_unknown_members() {
        let payload: FamilyPayload =
            serde_json::from_value(serde_json::json!({ "name": "Smith", "users": 3 })).unwrap();
        assert_eq!(payload.name, "Smith");
    }

    #[test]
    fn test_user_payload_rejects_wrong_primitive_type() {
        let result = serde_json::from_value::<UserPayload>(serde_json::json!({
            "name": "Ann", "email": "a@b.c", "password": "x", "birth": 1,
            "age": "thirty", "gender": "f", "quest_role": true, "family_id": 1
        }));
        assert!(result.is_err());
    }
}
