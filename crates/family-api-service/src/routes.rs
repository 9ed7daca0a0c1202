//! 路由配置模块
//!
//! 每种实体挂载一组相同形状的 CRUD 路由，路径段取自实体元数据。

use axum::{Router, middleware, routing::get};
use family_shared::observability::middleware as obs_middleware;

use crate::entity::{
    Closeness, Comment, Family, Post, Profile, Quest, QuestType, Resolve, Reward, Tree, User,
};
use crate::{handlers, state::AppState, store::Store};

/// 单个实体的 CRUD 路由
///
/// - `GET    /{path}`       列表
/// - `POST   /{path}`       创建
/// - `GET    /{path}/{id}`  详情
/// - `PUT    /{path}/{id}`  更新
/// - `DELETE /{path}/{id}`  删除
pub fn resource_routes<E: Resolve, S: Store>() -> Router<AppState<S>> {
    let collection = format!("/{}", E::PATH);
    let item = format!("/{}/{{id}}", E::PATH);

    Router::new()
        .route(
            &collection,
            get(handlers::list::<E, S>).post(handlers::create::<E, S>),
        )
        .route(
            &item,
            get(handlers::get::<E, S>)
                .put(handlers::update::<E, S>)
                .delete(handlers::delete::<E, S>),
        )
}

/// 全部资源路由
pub fn api_routes<S: Store>() -> Router<AppState<S>> {
    Router::new()
        .merge(resource_routes::<User, S>())
        .merge(resource_routes::<Profile, S>())
        .merge(resource_routes::<Family, S>())
        .merge(resource_routes::<Post, S>())
        .merge(resource_routes::<Comment, S>())
        .merge(resource_routes::<Tree, S>())
        .merge(resource_routes::<QuestType, S>())
        .merge(resource_routes::<Reward, S>())
        .merge(resource_routes::<Quest, S>())
        .merge(resource_routes::<Closeness, S>())
}

/// 构建完整应用路由（含探针与可观测性中间件，CORS 由调用方按环境追加）
pub fn build_router<S: Store>(state: AppState<S>) -> Router {
    Router::new()
        .merge(api_routes::<S>())
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check::<S>))
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}
