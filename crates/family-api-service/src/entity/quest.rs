//! 任务类型、奖励与任务

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ColumnValue, Entity, Resolve};
use crate::error::Result;
use crate::store::Session;

/// 任务类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuestType {
    pub id: i64,
    pub kinds: String,
    /// 是否为线上任务
    pub online: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestTypePayload {
    pub kinds: String,
    pub online: bool,
}

impl Entity for QuestType {
    const NAME: &'static str = "quest_type";
    const TABLE: &'static str = "quest_types";
    const PATH: &'static str = "quest_types";

    type Payload = QuestTypePayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_payload(payload: QuestTypePayload, _now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            kinds: payload.kinds,
            online: payload.online,
        }
    }

    fn apply(&mut self, payload: QuestTypePayload, _now: DateTime<Utc>) {
        self.kinds = payload.kinds;
        self.online = payload.online;
    }

    fn columns(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("kinds", self.kinds.clone().into()),
            ("online", self.online.into()),
        ]
    }
}

/// 奖励
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reward {
    pub id: i64,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewardPayload {
    pub content: String,
}

impl Entity for Reward {
    const NAME: &'static str = "reward";
    const TABLE: &'static str = "rewards";
    const PATH: &'static str = "rewards";

    type Payload = RewardPayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_payload(payload: RewardPayload, _now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            content: payload.content,
        }
    }

    fn apply(&mut self, payload: RewardPayload, _now: DateTime<Utc>) {
        self.content = payload.content;
    }

    fn columns(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![("content", self.content.clone().into())]
    }
}

/// 任务
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Quest {
    pub id: i64,
    pub content: i64,
    /// 任务类型（软引用）
    pub quest_kinds: i64,
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestPayload {
    pub content: i64,
    pub quest_kinds: i64,
    pub completed: bool,
}

/// 任务响应，内嵌任务类型（字段名 `quests`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestView {
    #[serde(flatten)]
    pub quest: Quest,
    pub quests: Option<QuestType>,
}

impl Entity for Quest {
    const NAME: &'static str = "quest";
    const TABLE: &'static str = "quests";
    const PATH: &'static str = "quests";

    type Payload = QuestPayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_payload(payload: QuestPayload, _now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            content: payload.content,
            quest_kinds: payload.quest_kinds,
            completed: payload.completed,
        }
    }

    fn apply(&mut self, payload: QuestPayload, _now: DateTime<Utc>) {
        self.content = payload.content;
        self.quest_kinds = payload.quest_kinds;
        self.completed = payload.completed;
    }

    fn columns(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("content", self.content.into()),
            ("quest_kinds", self.quest_kinds.into()),
            ("completed", self.completed.into()),
        ]
    }
}

#[async_trait]
impl Resolve for Quest {
    type View = QuestView;

    async fn resolve<S: Session>(self, session: &mut S) -> Result<QuestView> {
        let quests = session.find::<QuestType>(self.quest_kinds).await?;
        Ok(QuestView { quest: self, quests })
    }
}

flat_view!(QuestType, Reward);
