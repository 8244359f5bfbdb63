//! # 요청 전처리 모듈
//!
//! 핸들러가 요청을 받기 전에 동작하는 추출자(Extractor)들입니다.
//! - `json`: 에러 형식을 통일한 JSON 본문 추출자

pub mod json;

pub use json::ApiJson;
