//! # 글쓰기 세션 데이터베이스 쿼리 모듈
//!
//! 세션의 생성, 자동 저장(부분 수정), 종료, 조회, 삭제를 담당하는 SQL 함수들입니다.
//!
//! ## 작업 단위(Unit of Work)
//! 읽고-고치고-쓰는 작업(`patch_session`, `end_session`)은 트랜잭션 하나 안에서 수행됩니다.
//! ```text
//! BEGIN IMMEDIATE → 행 조회 → 상태 검사 → 메모리에서 변경 적용 → UPDATE → commit()
//! ```
//! `BEGIN IMMEDIATE`는 읽기 전에 쓰기 잠금을 잡으므로, 같은 세션에 PATCH와 end가
//! 동시에 들어와도 순서대로 처리되고 마지막에 커밋된 쓰기가 남습니다.
//! 중간에 `return`이나 `?`로 빠져나가면 `Transaction`이 drop되면서 자동 롤백되고
//! 연결은 풀로 돌아갑니다.

use crate::error::AppError; // DB 에러는 `?`로 AppError::Database로 변환됩니다
use crate::models::{
    now_timestamp, CreateSessionRequest, EndSessionRequest, Outcome, Session, SessionPatch,
};
// SqlitePool: 연결 풀, SqliteConnection: 풀이나 트랜잭션에서 빌린 연결 하나
use sqlx::{SqliteConnection, SqlitePool};

/// 새 세션을 저장하고, 저장된 행을 다시 읽어 반환합니다.
///
/// ID는 UUIDv7, `created_at`은 현재 UTC 시각으로 채워집니다.
/// `duration_min`/`min_wpm`의 범위는 검사하지 않습니다 (0이나 음수도 그대로 저장).
pub async fn create_session(
    pool: &SqlitePool,
    req: CreateSessionRequest,
) -> Result<Session, AppError> {
    // UUIDv7: 시간 기반이라 생성 순서대로 정렬됩니다
    let id = uuid::Uuid::now_v7().to_string();
    let session = Session::new(id, now_timestamp(), req);

    // 모든 컬럼을 명시적으로 저장합니다 (DB DEFAULT에 의존하지 않음)

    sqlx::query(
        r#"
        INSERT INTO sessions (
            id, created_at, completed_at, duration_min, min_wpm, reminder_interval_min,
            organizer_text, content, word_count, wpm_at_end, elapsed_sec, outcome, title
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&session.id)
    .bind(&session.created_at)
    .bind(&session.completed_at)
    .bind(session.duration_min)
    .bind(session.min_wpm)
    .bind(session.reminder_interval_min)
    .bind(&session.organizer_text)
    .bind(&session.content)
    .bind(session.word_count)
    .bind(session.wpm_at_end)
    .bind(session.elapsed_sec)
    .bind(session.outcome)
    .bind(&session.title)
    .execute(pool)
    .await?;

    // 저장된 행을 다시 읽어, 응답이 DB에 실제로 들어간 값과 같도록 합니다
    get_session(pool, &session.id)
        .await?
        .ok_or(AppError::Internal(
            "Failed to retrieve created session".to_string(),
        ))
}

/// ID로 세션 하나를 조회합니다. 없으면 `None`.
pub async fn get_session(pool: &SqlitePool, id: &str) -> Result<Option<Session>, AppError> {
    // 풀에서 연결 하나를 빌립니다. `conn`이 drop되면 자동으로 풀에 반환됩니다.
    let mut conn = pool.acquire().await?;
    fetch_session(&mut conn, id).await
}

/// 목록에 노출되는 상태(draft, active, completed)의 세션을 최신순으로 조회합니다.
///
/// 삭제 계열(deleted_*)과 abandoned 세션은 제외됩니다.
/// `created_at`이 같으면 시간 순서로 생성되는 UUIDv7 `id`로 정렬합니다.
pub async fn list_sessions(pool: &SqlitePool) -> Result<Vec<Session>, AppError> {
    // 배열 구조 분해: 목록 대상 상태 3개를 각각 꺼내 IN (?, ?, ?)에 바인딩합니다
    let [first, second, third] = Outcome::LISTED;

    let sessions = sqlx::query_as::<_, Session>(
        r#"
        SELECT id, created_at, completed_at, duration_min, min_wpm, reminder_interval_min,
               organizer_text, content, word_count, wpm_at_end, elapsed_sec, outcome, title
        FROM sessions
        WHERE outcome IN (?, ?, ?)
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(first)
    .bind(second)
    .bind(third)
    .fetch_all(pool) // 0개여도 빈 Vec
    .await?;

    Ok(sessions)
}

/// 진행 중인 세션에 부분 수정(자동 저장)을 적용합니다.
///
/// 검사 순서는 존재 여부(404) → 종료 여부(409) → 요청 값(400)입니다.
///
/// ## 반환값
/// - `Ok(Some(Session))`: 수정 성공
/// - `Ok(None)`: 해당 ID의 세션이 없음
/// - `Err(AppError::Conflict)`: 세션이 이미 종료 상태
/// - `Err(AppError::BadRequest)`: PATCH로 종료 상태를 지정하려 함
pub async fn patch_session(
    pool: &SqlitePool,
    id: &str,
    patch: &SessionPatch,
) -> Result<Option<Session>, AppError> {
    // 쓰기 잠금을 먼저 잡고 읽습니다. 동시에 들어온 요청은 busy_timeout 동안 대기합니다.
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    // let-else: 세션이 없으면 트랜잭션을 버리고(롤백) None 반환 → 라우트에서 404
    let Some(mut session) = fetch_session(&mut tx, id).await? else {
        return Ok(None);
    };

    if session.outcome.is_terminal() {
        tracing::warn!("Rejected patch on ended session {} ({})", id, session.outcome);
        return Err(AppError::Conflict("Session already ended".to_string()));
    }

    // 종료 상태로의 전환은 end 요청으로만 가능합니다.
    if let Some(outcome) = patch.outcome.filter(|o| o.is_terminal()) {
        return Err(AppError::BadRequest(format!(
            "Outcome '{}' can only be set by ending the session",
            outcome
        )));
    }

    // 요청에 포함된 필드만 메모리의 세션에 반영한 뒤, 행 전체를 다시 씁니다.
    patch.apply_to(&mut session);
    write_session(&mut tx, &session).await?;
    tx.commit().await?;

    Ok(Some(session))
}

/// 세션을 종료 상태로 전환하고 최종 스냅샷을 저장합니다.
///
/// 이미 종료된 세션도 다시 종료할 수 있으며, 이때 `completed_at`이 새로 기록됩니다.
///
/// ## 반환값
/// - `Ok(Some(Session))`: 종료 성공
/// - `Ok(None)`: 해당 ID의 세션이 없음
/// - `Err(AppError::BadRequest)`: outcome이 종료 상태가 아님
pub async fn end_session(
    pool: &SqlitePool,
    id: &str,
    req: &EndSessionRequest,
) -> Result<Option<Session>, AppError> {
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let Some(mut session) = fetch_session(&mut tx, id).await? else {
        return Ok(None);
    };

    if !req.outcome.is_terminal() {
        return Err(AppError::BadRequest(format!(
            "'{}' is not a terminal outcome",
            req.outcome
        )));
    }

    // 종료 시각은 서버 시각으로 기록합니다.
    req.apply_to(&mut session, now_timestamp());
    write_session(&mut tx, &session).await?;
    tx.commit().await?;

    Ok(Some(session))
}

/// 세션 행을 영구 삭제합니다. 삭제된 행이 있으면 `true`.
pub async fn delete_session(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    // 삭제된 행이 없으면 존재하지 않는 ID → 라우트에서 404
    Ok(result.rows_affected() > 0)
}

async fn fetch_session(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Session>, AppError> {
    let session = sqlx::query_as::<_, Session>(
        r#"
        SELECT id, created_at, completed_at, duration_min, min_wpm, reminder_interval_min,
               organizer_text, content, word_count, wpm_at_end, elapsed_sec, outcome, title
        FROM sessions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(conn) // 0행이면 None, 1행이면 Some
    .await?;

    Ok(session)
}

// id와 created_at을 제외한 모든 컬럼을 덮어씁니다.
async fn write_session(conn: &mut SqliteConnection, session: &Session) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE sessions
        SET completed_at = ?, duration_min = ?, min_wpm = ?, reminder_interval_min = ?,
            organizer_text = ?, content = ?, word_count = ?, wpm_at_end = ?,
            elapsed_sec = ?, outcome = ?, title = ?
        WHERE id = ?
        "#,
    )
    .bind(&session.completed_at)
    .bind(session.duration_min)
    .bind(session.min_wpm)
    .bind(session.reminder_interval_min)
    .bind(&session.organizer_text)
    .bind(&session.content)
    .bind(session.word_count)
    .bind(session.wpm_at_end)
    .bind(session.elapsed_sec)
    .bind(session.outcome)
    .bind(&session.title)
    .bind(&session.id)
    .execute(conn)
    .await?;

    Ok(())
}
