//! PostgreSQL 存储
//!
//! 会话持有连接池中的一条连接，drop 时自动归还。SQL 由实体元数据生成：
//! 表名取 [`Entity::TABLE`]，列名与绑定值取 [`Entity::columns`]。

use async_trait::async_trait;
use family_shared::database::Database;
use sqlx::pool::PoolConnection;
use sqlx::{Postgres, QueryBuilder};
use tracing::info;

use super::{Session, Store};
use crate::entity::{ColumnValue, Entity};
use crate::error::Result;

/// 建表脚本
pub const SCHEMA: &str = include_str!("../../schema.sql");

/// PostgreSQL 存储
#[derive(Clone)]
pub struct PgStore {
    db: Database,
}

impl PgStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 创建缺失的数据表
    pub async fn ensure_schema(&self) -> Result<()> {
        self.db.apply_schema(SCHEMA).await?;
        info!("Database schema ready");
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    type Session = PgSession;

    async fn session(&self) -> Result<PgSession> {
        let conn = self.db.pool().acquire().await?;
        Ok(PgSession { conn })
    }

    async fn health_check(&self) -> Result<()> {
        self.db.health_check().await?;
        Ok(())
    }
}

/// PostgreSQL 会话
pub struct PgSession {
    conn: PoolConnection<Postgres>,
}

/// 标识符加双引号，兼容 `like` 等保留字列名
fn quoted(ident: &str) -> String {
    format!("\"{}\"", ident)
}

fn push_value(builder: &mut QueryBuilder<'_, Postgres>, value: ColumnValue) {
    match value {
        ColumnValue::Int(v) => builder.push_bind(v),
        ColumnValue::Text(v) => builder.push_bind(v),
        ColumnValue::Bool(v) => builder.push_bind(v),
        ColumnValue::Timestamp(v) => builder.push_bind(v),
    };
}

/// INSERT INTO "t" ("a", "b") VALUES ($1, $2) RETURNING *
fn insert_query<'a, E: Entity>(record: &E) -> QueryBuilder<'a, Postgres> {
    let columns = record.columns();
    let names: Vec<String> = columns.iter().map(|(name, _)| quoted(name)).collect();

    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) VALUES (",
        quoted(E::TABLE),
        names.join(", ")
    ));
    for (i, (_, value)) in columns.into_iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        push_value(&mut builder, value);
    }
    builder.push(") RETURNING *");
    builder
}

/// UPDATE "t" SET "a" = $1, "b" = $2 WHERE "id" = $3 RETURNING *
fn update_query<'a, E: Entity>(record: &E) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", quoted(E::TABLE)));
    for (i, (name, value)) in record.columns().into_iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        builder.push(quoted(name)).push(" = ");
        push_value(&mut builder, value);
    }
    builder.push(" WHERE \"id\" = ");
    builder.push_bind(record.id());
    builder.push(" RETURNING *");
    builder
}

#[async_trait]
impl Session for PgSession {
    async fn list<E: Entity>(&mut self) -> Result<Vec<E>> {
        let sql = format!("SELECT * FROM {} ORDER BY \"id\" ASC", quoted(E::TABLE));
        let rows = sqlx::query_as::<_, E>(&sql)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    async fn find<E: Entity>(&mut self, id: i64) -> Result<Option<E>> {
        let sql = format!("SELECT * FROM {} WHERE \"id\" = $1", quoted(E::TABLE));
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row)
    }

    async fn insert<E: Entity>(&mut self, record: E) -> Result<E> {
        let mut builder = insert_query(&record);
        let row = builder
            .build_query_as::<E>()
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(row)
    }

    async fn update<E: Entity>(&mut self, record: E) -> Result<Option<E>> {
        let mut builder = update_query(&record);
        let row = builder
            .build_query_as::<E>()
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row)
    }

    async fn delete<E: Entity>(&mut self, id: i64) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE \"id\" = $1", quoted(E::TABLE));
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
