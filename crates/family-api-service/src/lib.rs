//! 家庭任务后端服务
//!
//! 为用户、家庭、帖子、评论、树、任务等实体提供统一的 REST CRUD 接口。
//!
//! ## 模块结构
//!
//! - `entity`: 实体、请求载荷与响应视图
//! - `store`: 存储抽象（PostgreSQL / 内存）
//! - `service`: 与传输层无关的通用资源服务
//! - `handlers` / `routes`: HTTP 处理器与路由
//! - `extract`: 存储会话与 JSON 请求体提取器
//! - `error`: 错误类型及 HTTP 映射

pub mod entity;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use error::{ApiError, Result};
pub use routes::build_router;
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Session, Store};
