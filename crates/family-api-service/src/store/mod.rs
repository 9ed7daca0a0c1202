//! 存储层
//!
//! 对外只暴露两层抽象：
//!
//! - [`Store`]：进程级共享，克隆开销低，负责为每个请求签出会话
//! - [`Session`]：请求级独占的存储句柄，提供单表的增删改查原语
//!
//! 会话在 drop 时归还底层资源（PostgreSQL 下为连接池中的连接），
//! 因此无论请求以成功、校验失败、NotFound 还是存储错误结束，资源都会释放。
//! 每个写操作是一条自动提交的语句，不存在跨记录事务。

mod memory;
mod postgres;

pub use memory::{MemorySession, MemoryStore};
pub use postgres::{PgSession, PgStore};

use async_trait::async_trait;

use crate::entity::Entity;
use crate::error::Result;

/// 存储后端
#[async_trait]
pub trait Store: Clone + Send + Sync + 'static {
    type Session: Session;

    /// 签出一个请求级会话
    async fn session(&self) -> Result<Self::Session>;

    /// 存储可用性检查（就绪探针使用）
    async fn health_check(&self) -> Result<()>;
}

/// 请求级存储会话
#[async_trait]
pub trait Session: Send + 'static {
    /// 全表记录，按主键升序（即插入顺序）
    async fn list<E: Entity>(&mut self) -> Result<Vec<E>>;

    async fn find<E: Entity>(&mut self, id: i64) -> Result<Option<E>>;

    /// 写入新记录并返回带主键的持久化结果
    async fn insert<E: Entity>(&mut self, record: E) -> Result<E>;

    /// 按主键覆盖记录，记录不存在时返回 `None`
    async fn update<E: Entity>(&mut self, record: E) -> Result<Option<E>>;

    /// 按主键硬删除，返回是否删除了记录
    async fn delete<E: Entity>(&mut self, id: i64) -> Result<bool>;
}
