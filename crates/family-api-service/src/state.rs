//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use crate::store::Store;

/// Axum 应用共享状态
///
/// 只持有存储后端，请求级会话由处理器在提取完请求参数后签出
#[derive(Clone)]
pub struct AppState<S: Store> {
    pub store: S,
}

impl<S: Store> AppState<S> {
    /// 创建新的应用状态
    pub fn new(store: S) -> Self {
        Self { store }
    }
}
