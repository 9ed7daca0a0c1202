//! 请求提取器
//!
//! 路径参数与 JSON 请求体的拒绝统一转换为 [`ApiError`]，响应体与其他错误一致。

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// 资源主键路径参数
///
/// 非整数或超出 i64 范围的 id 映射为 422 校验错误。
pub struct IdPath(pub i64);

impl<St> FromRequestParts<St> for IdPath
where
    St: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &St) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}

/// JSON 请求体
///
/// 与 [`axum::Json`] 相同，但语法错误、字段缺失、类型不符、Content-Type 错误
/// 一律映射为 422 校验错误；请求体超出大小限制保留 413。
pub struct Payload<T>(pub T);

impl<T, St> FromRequest<St> for Payload<T>
where
    T: DeserializeOwned + Send,
    St: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &St) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(payload_error(rejection)),
        }
    }
}

fn payload_error(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::BytesRejection(inner) if inner.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            ApiError::PayloadTooLarge(inner.body_text())
        }
        other => ApiError::Validation(other.body_text()),
    }
}
