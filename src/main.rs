//! # Redline 글쓰기 세션 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. API 라우터 설정
//! 6. HTTP 서버 시작

mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;

use anyhow::Result;
use config::Config;
use routes::AppState;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 redline, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redline=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting Redline server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 ──
    let pool = db::connect(&config.database_url, config.max_connections).await?;

    // ── 5단계: 마이그레이션 실행 ──
    // 스키마 변경은 컬럼 추가만 하며, 이미 적용된 마이그레이션은 건너뜁니다.
    tracing::info!("Running database migrations...");
    db::migrate(&pool).await?;

    // ── 6단계: 라우터 구성 ──
    // 빌드된 프론트엔드가 있으면 같은 서버에서 서빙합니다.
    let frontend_dist = Path::new(&config.frontend_dist);
    let app = if frontend_dist.exists() {
        tracing::info!("Serving frontend static files from {}", config.frontend_dist);
        routes::app(AppState { pool }, Some(frontend_dist))
    } else {
        tracing::warn!("Frontend dist directory not found, serving API only");
        routes::app(AppState { pool }, None)
    };

    // ── 7단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Ctrl+C로 종료할 때까지 요청을 처리합니다.
    axum::serve(listener, app).await?;

    Ok(())
}
