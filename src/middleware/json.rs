//! JSON 요청 본문 추출자
//!
//! `axum::Json`과 같지만 파싱 실패를 `AppError`로 변환하여,
//! 본문 오류도 `{ "error": { "code", "message" } }` 형식으로 응답합니다.

use axum::extract::FromRequest;

use crate::error::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
