//! 通用资源服务
//!
//! 对所有实体提供统一的 List / Get / Create / Update / Delete 语义，
//! 与传输层无关，只依赖 [`Session`]。

use chrono::Utc;
use family_shared::observability::metrics::record_resource_operation;
use tracing::info;

use crate::entity::Resolve;
use crate::error::{ApiError, Result};
use crate::store::Session;

fn observe<T>(resource: &'static str, operation: &'static str, result: &Result<T>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(ApiError::NotFound { .. }) => "not_found",
        Err(_) => "error",
    };
    record_resource_operation(resource, operation, outcome);
}

/// 列出全部记录（存储层默认顺序，即插入顺序）
pub async fn list<E: Resolve, S: Session>(session: &mut S) -> Result<Vec<E::View>> {
    let result = async {
        let records = session.list::<E>().await?;
        let mut views = Vec::with_capacity(records.len());
        for record in records {
            views.push(record.resolve(session).await?);
        }
        Ok(views)
    }
    .await;

    observe(E::NAME, "list", &result);
    result
}

/// 按主键查询
pub async fn get<E: Resolve, S: Session>(session: &mut S, id: i64) -> Result<E::View> {
    let result = async {
        let record = session
            .find::<E>(id)
            .await?
            .ok_or_else(|| ApiError::not_found::<E>(id))?;
        record.resolve(session).await
    }
    .await;

    observe(E::NAME, "get", &result);
    result
}

/// 创建记录
///
/// 主键由存储层分配，创建时间类字段统一取当前时间。
pub async fn create<E: Resolve, S: Session>(session: &mut S, payload: E::Payload) -> Result<E::View> {
    let result = async {
        let record = E::from_payload(payload, Utc::now());
        let stored = session.insert(record).await?;
        info!(entity = E::NAME, id = stored.id(), "Record created");
        stored.resolve(session).await
    }
    .await;

    observe(E::NAME, "create", &result);
    result
}

/// 整体覆盖可编辑字段
///
/// 不做乐观锁，并发更新以最后一次写入为准。
pub async fn update<E: Resolve, S: Session>(
    session: &mut S,
    id: i64,
    payload: E::Payload,
) -> Result<E::View> {
    let result = async {
        let mut record = session
            .find::<E>(id)
            .await?
            .ok_or_else(|| ApiError::not_found::<E>(id))?;

        record.apply(payload, Utc::now());

        // 读取与写入之间记录可能已被删除
        let stored = session
            .update(record)
            .await?
            .ok_or_else(|| ApiError::not_found::<E>(id))?;

        info!(entity = E::NAME, id, "Record updated");
        stored.resolve(session).await
    }
    .await;

    observe(E::NAME, "update", &result);
    result
}

/// 硬删除，不级联，不检查引用方
pub async fn delete<E: Resolve, S: Session>(session: &mut S, id: i64) -> Result<()> {
    let result = async {
        if !session.delete::<E>(id).await? {
            return Err(ApiError::not_found::<E>(id));
        }
        info!(entity = E::NAME, id, "Record deleted");
        Ok(())
    }
    .await;

    observe(E::NAME, "delete", &result);
    result
}
