//! 内存存储
//!
//! 使用 DashMap 实现的进程内存储，适用于本地开发和 HTTP 测试。
//! 每张表独立维护递增主键，删除后的主键不会复用。

use async_trait::async_trait;
use dashmap::DashMap;
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Session, Store};
use crate::entity::Entity;
use crate::error::Result;

type Row = Box<dyn Any + Send + Sync>;

#[derive(Default)]
struct MemoryTable {
    last_id: i64,
    rows: BTreeMap<i64, Row>,
}

/// 内存存储
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<DashMap<&'static str, MemoryTable>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定表的记录数
    pub fn count(&self, table: &str) -> usize {
        self.tables.get(table).map(|t| t.rows.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Store for MemoryStore {
    type Session = MemorySession;

    async fn session(&self) -> Result<MemorySession> {
        Ok(MemorySession {
            tables: Arc::clone(&self.tables),
        })
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// 内存存储会话
pub struct MemorySession {
    tables: Arc<DashMap<&'static str, MemoryTable>>,
}

fn downcast<E: Entity>(row: &Row) -> Option<E> {
    row.downcast_ref::<E>().cloned()
}

#[async_trait]
impl Session for MemorySession {
    async fn list<E: Entity>(&mut self) -> Result<Vec<E>> {
        let records = self
            .tables
            .get(E::TABLE)
            .map(|table| table.rows.values().filter_map(downcast::<E>).collect())
            .unwrap_or_default();
        Ok(records)
    }

    async fn find<E: Entity>(&mut self, id: i64) -> Result<Option<E>> {
        let record = self
            .tables
            .get(E::TABLE)
            .and_then(|table| table.rows.get(&id).and_then(downcast::<E>));
        Ok(record)
    }

    async fn insert<E: Entity>(&mut self, mut record: E) -> Result<E> {
        let mut table = self.tables.entry(E::TABLE).or_default();
        table.last_id += 1;
        let id = table.last_id;
        record.set_id(id);
        table.rows.insert(id, Box::new(record.clone()));
        Ok(record)
    }

    async fn update<E: Entity>(&mut self, record: E) -> Result<Option<E>> {
        let Some(mut table) = self.tables.get_mut(E::TABLE) else {
            return Ok(None);
        };
        match table.rows.get_mut(&record.id()) {
            Some(slot) => {
                let row: Row = Box::new(record.clone());
                *slot = row;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn delete<E: Entity>(&mut self, id: i64) -> Result<bool> {
        let removed = self
            .tables
            .get_mut(E::TABLE)
            .map(|mut table| table.rows.remove(&id).is_some())
            .unwrap_or(false);
        Ok(removed)
    }
}
