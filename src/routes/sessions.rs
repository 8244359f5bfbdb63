//! # 글쓰기 세션 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /sessions | `create_session` | 새 세션 생성 (201) |
//! | GET | /sessions | `list_sessions` | draft/active/completed 세션 목록 (최신순) |
//! | GET | /sessions/{id} | `get_session` | 단일 세션 조회 |
//! | PATCH | /sessions/{id} | `patch_session` | 자동 저장 (부분 수정) |
//! | POST | /sessions/{id}/end | `end_session` | 세션 종료 |
//! | DELETE | /sessions/{id} | `delete_session` | 세션 영구 삭제 (204) |
//!
//! ## 세션 사용 흐름
//! ```text
//! 1. 설정 화면 → POST /sessions (draft 또는 active로 시작)
//! 2. 글쓰기 중 → PATCH /sessions/{id} (내용/단어 수/경과 시간 주기적 저장)
//! 3. 타이머 종료, 비활동, WPM 미달 → POST /sessions/{id}/end
//! 4. 기록 확인 → GET /sessions
//! ```
//!
//! 상태 규칙:
//! - 생성 시 outcome은 `draft`/`active`만 허용 (400)
//! - PATCH/end는 없는 ID(404) → 이미 종료된 세션 수정(409) → 잘못된 outcome(400) 순서로 검사
//! - PATCH로 종료 상태를 지정할 수 없고, end의 outcome은 반드시 종료 상태

use crate::{
    db,                  // 데이터베이스 쿼리 모듈
    error::AppError,     // 에러 타입 (자동으로 HTTP 에러 응답으로 변환됨)
    middleware::ApiJson, // 파싱 실패도 AppError로 응답하는 JSON 추출자
    models::*,           // Session, CreateSessionRequest, SessionPatch, EndSessionRequest
    routes::AppState,    // 공유 상태 (DB 풀)
};
use axum::{
    extract::{Path, State}, // URL 경로 파라미터, 앱 상태 추출
    http::StatusCode,       // 201 Created, 204 No Content 등
    Json,                   // JSON 응답 래퍼
};

/// `POST /sessions` — 새 세션을 생성합니다.
///
/// 누락된 설정값은 기본값(20분, 10 WPM 등)으로 채워지고, 범위 검사는 하지 않습니다.
pub async fn create_session(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateSessionRequest>,
) -> Result<(StatusCode, Json<Session>), AppError> {
    // 종료 상태로 시작하는 세션은 없습니다
    if req.outcome.is_terminal() {
        return Err(AppError::BadRequest(format!(
            "A session cannot start as '{}'",
            req.outcome
        )));
    }

    let session = db::create_session(&state.pool, req).await?;
    tracing::info!("Session {} created ({})", session.id, session.outcome);

    // (상태코드, 본문) 튜플은 Axum이 HTTP 응답으로 변환합니다
    Ok((StatusCode::CREATED, Json(session)))
}

/// `GET /sessions` — 목록 대상 세션을 최신순 배열로 반환합니다. 페이지네이션 없음.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Session>>, AppError> {
    let sessions = db::list_sessions(&state.pool).await?;
    Ok(Json(sessions))
}

/// `GET /sessions/{id}` — 세션 하나를 조회합니다.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Session>, AppError> {
    let session = db::get_session(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?; // None이면 404
    Ok(Json(session))
}

/// `PATCH /sessions/{id}` — 요청에 포함된 필드만 갱신합니다 (자동 저장).
///
/// 예: `{ "content": "...", "word_count": 120, "elapsed_sec": 480 }`
pub async fn patch_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<SessionPatch>,
) -> Result<Json<Session>, AppError> {
    // 상태 검사(409, 400)는 트랜잭션 안에서 행을 읽은 뒤 db 계층이 수행합니다.
    let session = db::patch_session(&state.pool, &id, &patch)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(session))
}

/// `POST /sessions/{id}/end` — 세션을 종료 상태로 전환합니다.
///
/// `completed_at`은 서버 시각으로 기록되며, 다시 호출하면 새 시각으로 덮어씁니다.
pub async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<EndSessionRequest>,
) -> Result<Json<Session>, AppError> {
    // 존재하지 않는 ID는 outcome 값과 관계없이 404
    let session = db::end_session(&state.pool, &id, &req)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(
        "Session {} ended as {} ({} words, {:.1} wpm)",
        session.id,
        session.outcome,
        session.word_count,
        session.wpm_at_end
    );

    Ok(Json(session))
}

/// `DELETE /sessions/{id}` — 세션 행을 영구 삭제합니다. 성공 시 204 No Content.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !db::delete_session(&state.pool, &id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!("Session {} deleted", id);

    Ok(StatusCode::NO_CONTENT)
}
