//! 实体定义
//!
//! 每种实体由三部分组成：
//!
//! - 记录结构体：与数据表一一对应，主键 `id` 由存储层分配
//! - 创建/更新载荷：实体的可编辑字段，更新时整体覆盖
//! - 响应视图：需要内嵌关联对象的实体（用户、帖子、任务）在响应前做一次单跳解析
//!
//! 外键列是软引用：只保存对方主键，不校验存在性，被引用记录删除后解析结果为 `null`。

/// 为没有关联对象的实体实现 [`Resolve`]，视图即记录本身
macro_rules! flat_view {
    ($($entity:ty),+ $(,)?) => {
        $(
            #[async_trait::async_trait]
            impl $crate::entity::Resolve for $entity {
                type View = $entity;

                async fn resolve<S: $crate::store::Session>(
                    self,
                    _session: &mut S,
                ) -> $crate::error::Result<Self::View> {
                    Ok(self)
                }
            }
        )+
    };
}

mod family;
mod quest;
mod social;
mod tree;

pub use family::{Family, FamilyPayload, User, UserPayload, UserView};
pub use quest::{Quest, QuestPayload, QuestType, QuestTypePayload, QuestView, Reward, RewardPayload};
pub use social::{Comment, CommentPayload, Post, PostPayload, PostView, Profile, ProfilePayload};
pub use tree::{Closeness, ClosenessPayload, Tree, TreePayload};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use sqlx::postgres::PgRow;

use crate::error::Result;
use crate::store::Session;

/// 持久化列值
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Int(i64),
    Text(String),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl From<i64> for ColumnValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<String> for ColumnValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for ColumnValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<bool> for ColumnValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<DateTime<Utc>> for ColumnValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

/// 可持久化实体
///
/// 存储层只依赖这里的元数据和列映射，新增实体不需要改动存储与路由代码。
pub trait Entity:
    Clone + std::fmt::Debug + Send + Sync + Unpin + for<'r> sqlx::FromRow<'r, PgRow> + 'static
{
    /// 实体名，用于错误消息和日志（如 `family item with id 7 not found`）
    const NAME: &'static str;
    /// 数据表名
    const TABLE: &'static str;
    /// 路由路径段
    const PATH: &'static str;

    /// 创建/更新请求体
    type Payload: DeserializeOwned + Send + 'static;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    /// 由请求体构造新记录（id 由存储层分配），创建时间类字段取 `now`
    fn from_payload(payload: Self::Payload, now: DateTime<Utc>) -> Self;

    /// 用请求体整体覆盖可编辑字段
    ///
    /// id 与创建时间不变；带 updatedAt 的实体刷新为 `now`。
    fn apply(&mut self, payload: Self::Payload, now: DateTime<Utc>);

    /// 除主键外的全部持久化列
    fn columns(&self) -> Vec<(&'static str, ColumnValue)>;
}

/// 响应视图解析
///
/// 对需要内嵌关联对象的实体，按软引用做一次查找；引用悬空时内嵌字段为 `None`。
#[async_trait]
pub trait Resolve: Entity {
    type View: Serialize + Send + 'static;

    async fn resolve<S: Session>(self, session: &mut S) -> Result<Self::View>;
}
