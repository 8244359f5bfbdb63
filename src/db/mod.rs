//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 하위 모듈:
//! - `sessions`: 글쓰기 세션 CRUD와 상태 전이 쿼리

pub mod sessions;

pub use sessions::*;

use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::{str::FromStr, time::Duration};

/// SQLite 연결 풀을 생성합니다.
///
/// DB 파일이 없으면 새로 만듭니다 (`create_if_missing`).
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        // 다른 연결이 쓰기 잠금을 잡고 있으면 실패하지 않고 최대 5초까지 기다립니다
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// `./migrations` 폴더의 SQL 파일 중 아직 적용되지 않은 것을 순서대로 실행합니다.
///
/// sqlx::migrate!는 컴파일 타임에 SQL 파일들을 바이너리에 포함시킵니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// 테스트용 인메모리 DB. 연결이 닫히면 DB도 사라지므로 연결 하나를 계속 유지합니다.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    migrate(&pool).await.unwrap();
    pool
}
