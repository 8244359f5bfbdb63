//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `sessions`: 글쓰기 세션 생성/자동 저장/종료/조회/삭제

pub mod health;
pub mod sessions;

pub use health::*;
pub use sessions::*;

use axum::{routing::get, routing::post, Router}; // get(), post(): HTTP 메서드별 핸들러 등록
use sqlx::SqlitePool;
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},           // 브라우저의 교차 출처 요청 허용
    services::{ServeDir, ServeFile},  // 정적 파일 서빙
    trace::TraceLayer,                // 요청/응답 자동 로깅 (tower_http=debug)
};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 요청 사이에 공유되는 것은 연결 풀뿐입니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
}

/// API 라우트만 담은 라우터
///
/// axum 0.8부터 경로 파라미터는 `{id}` 문법을 사용합니다.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        // GET /health → 서버 상태 확인
        .route("/health", get(health_check))
        // 같은 경로에 메서드별 핸들러를 체이닝으로 등록합니다
        .route("/sessions", get(list_sessions).post(create_session))
        // {id}는 핸들러에서 Path(id): Path<String>으로 추출됩니다
        .route(
            "/sessions/{id}",
            get(get_session).patch(patch_session).delete(delete_session),
        )
        .route("/sessions/{id}/end", post(end_session))
        // 모든 핸들러에 AppState를 주입합니다 (요청마다 Clone, 풀은 Arc라 저렴)
        .with_state(state)
}

/// CORS와 요청 로깅이 적용된 전체 애플리케이션 라우터
///
/// `frontend_dist`가 주어지면, API에 매칭되지 않는 요청은 프론트엔드 정적 파일로
/// 넘기고 찾을 수 없는 경로는 index.html을 돌려줍니다 (SPA 라우팅).
pub fn app(state: AppState, frontend_dist: Option<&Path>) -> Router {
    // 모든 출처/메서드/헤더 허용
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = api_router(state);
    // fallback_service: 어떤 라우트에도 매칭되지 않은 요청을 처리할 서비스
    let router = match frontend_dist {
        Some(dist) => {
            let serve_dir =
                ServeDir::new(dist).not_found_service(ServeFile::new(dist.join("index.html")));
            router.fallback_service(serve_dir)
        }
        None => router,
    };

    // layer는 나중에 추가한 것이 바깥쪽: 요청은 Trace → CORS → 라우터 순으로 통과합니다
    router.layer(cors).layer(TraceLayer::new_for_http())
}
