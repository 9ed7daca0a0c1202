//! 通用资源 API 处理器
//!
//! 所有实体共用同一组处理器，按实体类型单态化后挂到各自的路由上。
//! 存储会话在路径与请求体提取成功之后才签出，处理器返回时随之释放。

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::entity::Resolve;
use crate::error::Result;
use crate::extract::{IdPath, Payload};
use crate::service;
use crate::state::AppState;
use crate::store::Store;

/// 服务名（探针响应使用）
pub const SERVICE_NAME: &str = "family-api-service";

/// 列表
///
/// GET /{resource}
pub async fn list<E: Resolve, S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<E::View>>> {
    let mut session = state.store.session().await?;
    let views = service::list::<E, _>(&mut session).await?;
    Ok(Json(views))
}

/// 详情
///
/// GET /{resource}/{id}
pub async fn get<E: Resolve, S: Store>(
    State(state): State<AppState<S>>,
    IdPath(id): IdPath,
) -> Result<Json<E::View>> {
    let mut session = state.store.session().await?;
    let view = service::get::<E, _>(&mut session, id).await?;
    Ok(Json(view))
}

/// 创建
///
/// POST /{resource}
pub async fn create<E: Resolve, S: Store>(
    State(state): State<AppState<S>>,
    Payload(payload): Payload<E::Payload>,
) -> Result<(StatusCode, Json<E::View>)> {
    let mut session = state.store.session().await?;
    let view = service::create::<E, _>(&mut session, payload).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// 更新（整体覆盖）
///
/// PUT /{resource}/{id}
pub async fn update<E: Resolve, S: Store>(
    State(state): State<AppState<S>>,
    IdPath(id): IdPath,
    Payload(payload): Payload<E::Payload>,
) -> Result<Json<E::View>> {
    let mut session = state.store.session().await?;
    let view = service::update::<E, _>(&mut session, id, payload).await?;
    Ok(Json(view))
}

/// 删除
///
/// DELETE /{resource}/{id}
pub async fn delete<E: Resolve, S: Store>(
    State(state): State<AppState<S>>,
    IdPath(id): IdPath,
) -> Result<StatusCode> {
    let mut session = state.store.session().await?;
    service::delete::<E, _>(&mut session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 存活探针：服务进程正常即返回 ok
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}

/// 就绪探针：检查存储后端是否可用
pub async fn readiness_check<S: Store>(State(state): State<AppState<S>>) -> Json<Value> {
    let store_ok = state.store.health_check().await.is_ok();

    Json(json!({
        "status": if store_ok { "ok" } else { "degraded" },
        "service": SERVICE_NAME,
        "checks": {
            "database": if store_ok { "ok" } else { "fail" }
        }
    }))
}
