//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `session`: 글쓰기 세션 엔티티, 상태(Outcome), 요청 본문 구조체
//!
//! `pub use session::*;`로 재공개하여 `crate::models::Session`처럼 바로 접근할 수 있습니다.

pub mod session;

pub use session::*;
