//! # 글쓰기 세션 모델 정의
//!
//! 타이머가 걸린 글쓰기 세션 한 번을 나타내는 데이터 구조체들입니다.
//! 세션은 설정값(시간, 최소 WPM)을 가지고 시작되어, 자동 저장(PATCH)으로
//! 내용이 갱신되다가, 종료 요청(end)으로 하나의 최종 결과(outcome)를 갖게 됩니다.
//!
//! ## 세션 상태 흐름
//! ```text
//! [생성] draft / active ──(PATCH: 자동 저장)──▶ draft / active
//!             │
//!             └──(POST /end)──▶ completed | deleted_inactivity | deleted_wpm | abandoned
//! ```
//! 종료 상태(terminal)에서는 삭제 외에 다른 전이가 없습니다.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 세션의 현재 상태 — DB의 `outcome` 컬럼과 JSON에 snake_case 문자열로 저장됩니다.
///
/// 열거형 밖의 문자열은 역직렬화 단계에서 거부됩니다 (API 경계에서 422).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Outcome {
    /// 시작 전 임시 저장 상태
    Draft,
    /// 진행 중인 세션
    Active,
    /// 목표 시간을 채우고 정상 종료
    Completed,
    /// 입력이 없어 삭제됨
    DeletedInactivity,
    /// 최소 WPM 미달로 삭제됨
    DeletedWpm,
    /// 사용자가 중도 포기
    Abandoned,
}

impl Outcome {
    /// `GET /sessions` 목록에 노출되는 상태들
    pub const LISTED: [Outcome; 3] = [Outcome::Draft, Outcome::Active, Outcome::Completed];

    /// 종료 상태 여부. 종료 상태에서는 PATCH가 거부됩니다.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Draft | Outcome::Active)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Draft => "draft",
            Outcome::Active => "active",
            Outcome::Completed => "completed",
            Outcome::DeletedInactivity => "deleted_inactivity",
            Outcome::DeletedWpm => "deleted_wpm",
            Outcome::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 현재 UTC 시각을 `2026-02-16T12:00:00.000Z` 형식으로 반환합니다.
///
/// SQLite의 `strftime('%Y-%m-%dT%H:%M:%fZ', 'now')`와 같은 형식이라
/// 문자열 비교 순서가 곧 시간 순서입니다.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 글쓰기 세션 엔티티 — DB의 `sessions` 테이블 한 행에 대응합니다.
///
/// 필드 순서가 곧 JSON 응답의 필드 순서입니다.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Session {
    /// 세션 고유 식별자 (UUIDv7)
    pub id: String,
    /// 세션 생성 시각
    pub created_at: String,
    /// 종료 시각 — 종료 상태가 되기 전까지는 None
    pub completed_at: Option<String>,
    /// 목표 글쓰기 시간(분)
    pub duration_min: i64,
    /// 유지해야 하는 최소 분당 단어 수
    pub min_wpm: i64,
    /// 리마인더 간격(분), 0이면 사용 안 함
    pub reminder_interval_min: i64,
    /// 세션 목표 메모
    pub organizer_text: String,
    /// 자동 저장되는 본문
    pub content: String,
    pub word_count: i64,
    /// 종료 시점에 측정된 WPM
    pub wpm_at_end: f64,
    pub elapsed_sec: i64,
    pub outcome: Outcome,
    pub title: String,
}

impl Session {
    /// 생성 요청으로부터 새 세션을 만듭니다. ID와 생성 시각은 호출자가 정합니다.
    pub fn new(id: String, created_at: String, req: CreateSessionRequest) -> Self {
        Self {
            id,
            created_at,
            completed_at: None,
            duration_min: req.duration_min,
            min_wpm: req.min_wpm,
            reminder_interval_min: req.reminder_interval_min,
            organizer_text: req.organizer_text,
            content: req.content,
            word_count: 0,
            wpm_at_end: 0.0,
            elapsed_sec: 0,
            outcome: req.outcome,
            title: req.title,
        }
    }
}

/// 세션 생성 요청 — `POST /sessions`의 요청 본문
///
/// 누락된 필드는 `Default` 구현의 값으로 채워집니다.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CreateSessionRequest {
    pub duration_min: i64,
    pub min_wpm: i64,
    pub reminder_interval_min: i64,
    pub organizer_text: String,
    pub title: String,
    pub content: String,
    /// 초기 상태 — `draft` 또는 `active`만 허용
    pub outcome: Outcome,
}

impl Default for CreateSessionRequest {
    fn default() -> Self {
        Self {
            duration_min: 20,
            min_wpm: 10,
            reminder_interval_min: 0,
            organizer_text: String::new(),
            title: String::new(),
            content: String::new(),
            outcome: Outcome::Active,
        }
    }
}

/// 부분 수정 요청 — `PATCH /sessions/:id`의 요청 본문
///
/// 각 필드는 `None` = 전달되지 않음(변경 안 함), `Some(v)` = v로 변경입니다.
/// JSON의 `null`도 "전달되지 않음"으로 취급됩니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionPatch {
    pub content: Option<String>,
    pub organizer_text: Option<String>,
    pub word_count: Option<i64>,
    pub wpm_at_end: Option<f64>,
    pub elapsed_sec: Option<i64>,
    pub title: Option<String>,
    pub outcome: Option<Outcome>,
    pub duration_min: Option<i64>,
    pub min_wpm: Option<i64>,
}

impl SessionPatch {
    /// 전달된 필드만 세션에 반영합니다.
    pub fn apply_to(&self, session: &mut Session) {
        if let Some(content) = &self.content {
            session.content = content.clone();
        }
        if let Some(organizer_text) = &self.organizer_text {
            session.organizer_text = organizer_text.clone();
        }
        if let Some(word_count) = self.word_count {
            session.word_count = word_count;
        }
        if let Some(wpm_at_end) = self.wpm_at_end {
            session.wpm_at_end = wpm_at_end;
        }
        if let Some(elapsed_sec) = self.elapsed_sec {
            session.elapsed_sec = elapsed_sec;
        }
        if let Some(title) = &self.title {
            session.title = title.clone();
        }
        if let Some(outcome) = self.outcome {
            session.outcome = outcome;
        }
        if let Some(duration_min) = self.duration_min {
            session.duration_min = duration_min;
        }
        if let Some(min_wpm) = self.min_wpm {
            session.min_wpm = min_wpm;
        }
    }
}

/// 세션 종료 요청 — `POST /sessions/:id/end`의 요청 본문
///
/// `outcome`은 필수이며, 나머지 스냅샷 필드는 누락 시 빈 값/0으로 덮어씁니다.
#[derive(Debug, Clone, Deserialize)]
pub struct EndSessionRequest {
    pub outcome: Outcome,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub organizer_text: String,
    #[serde(default)]
    pub word_count: i64,
    #[serde(default)]
    pub wpm_at_end: f64,
    #[serde(default)]
    pub elapsed_sec: i64,
}

impl EndSessionRequest {
    /// 최종 스냅샷과 결과를 세션에 덮어쓰고 종료 시각을 기록합니다.
    pub fn apply_to(&self, session: &mut Session, completed_at: String) {
        session.outcome = self.outcome;
        session.content = self.content.clone();
        session.organizer_text = self.organizer_text.clone();
        session.word_count = self.word_count;
        session.wpm_at_end = self.wpm_at_end;
        session.elapsed_sec = self.elapsed_sec;
        session.completed_at = Some(completed_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Session {
        Session::new(
            "s-1".to_string(),
            "2026-02-16T12:00:00.000Z".to_string(),
            CreateSessionRequest {
                title: "morning pages".to_string(),
                content: "first line".to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn create_request_fills_defaults() {
        let req: CreateSessionRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.duration_min, 20);
        assert_eq!(req.min_wpm, 10);
        assert_eq!(req.reminder_interval_min, 0);
        assert_eq!(req.outcome, Outcome::Active);
        assert!(req.title.is_empty());
    }

    #[test]
    fn outcome_uses_snake_case() {
        let outcome: Outcome = serde_json::from_value(json!("deleted_inactivity")).unwrap();
        assert_eq!(outcome, Outcome::DeletedInactivity);
        assert_eq!(json!(Outcome::DeletedWpm), json!("deleted_wpm"));
        assert_eq!(Outcome::Abandoned.to_string(), "abandoned");
    }

    #[test]
    fn unknown_outcome_is_rejected() {
        let result = serde_json::from_value::<Outcome>(json!("paused"));
        assert!(result.is_err());
    }

    #[test]
    fn terminal_outcomes() {
        assert!(!Outcome::Draft.is_terminal());
        assert!(!Outcome::Active.is_terminal());
        assert!(Outcome::Completed.is_terminal());
        assert!(Outcome::DeletedInactivity.is_terminal());
        assert!(Outcome::DeletedWpm.is_terminal());
        assert!(Outcome::Abandoned.is_terminal());
    }

    #[test]
    fn patch_applies_only_supplied_fields() {
        let mut session = sample();
        let before = session.clone();
        let patch: SessionPatch =
            serde_json::from_value(json!({ "word_count": 42, "elapsed_sec": 300 })).unwrap();

        patch.apply_to(&mut session);

        assert_eq!(session.word_count, 42);
        assert_eq!(session.elapsed_sec, 300);
        assert_eq!(session.content, before.content);
        assert_eq!(session.title, before.title);
        assert_eq!(session.outcome, before.outcome);
        assert_eq!(session.duration_min, before.duration_min);
    }

    #[test]
    fn patch_null_means_not_supplied() {
        let mut session = sample();
        let patch: SessionPatch =
            serde_json::from_value(json!({ "content": null, "title": "renamed" })).unwrap();

        patch.apply_to(&mut session);

        assert_eq!(session.content, "first line");
        assert_eq!(session.title, "renamed");
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut session = sample();
        let before = session.clone();
        SessionPatch::default().apply_to(&mut session);
        assert_eq!(session, before);
    }

    #[test]
    fn end_overwrites_snapshot_and_stamps_completion() {
        let mut session = sample();
        let req: EndSessionRequest =
            serde_json::from_value(json!({ "outcome": "deleted_wpm" })).unwrap();

        req.apply_to(&mut session, "2026-02-16T12:20:00.000Z".to_string());

        assert_eq!(session.outcome, Outcome::DeletedWpm);
        assert_eq!(session.content, "");
        assert_eq!(session.word_count, 0);
        assert_eq!(session.completed_at.as_deref(), Some("2026-02-16T12:20:00.000Z"));
        assert_eq!(session.title, "morning pages");
    }

    #[test]
    fn end_request_requires_outcome() {
        let result = serde_json::from_value::<EndSessionRequest>(json!({ "word_count": 10 }));
        assert!(result.is_err());
    }

    #[test]
    fn timestamps_sort_chronologically() {
        let first = now_timestamp();
        let second = now_timestamp();
        assert!(first.ends_with('Z'));
        assert_eq!(first.len(), "2026-02-16T12:00:00.000Z".len());
        assert!(second >= first);
    }
}
