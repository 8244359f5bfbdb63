//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `DB_MAX_CONNECTIONS`: 연결 풀 최대 연결 수
//! - `FRONTEND_DIST`: 빌드된 프론트엔드 디렉토리

use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/redline.db")
    pub database_url: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 8000)
    pub port: u16,
    /// 연결 풀 최대 연결 수 (기본값: 5)
    pub max_connections: u32,
    /// 프론트엔드 빌드 결과물 경로 (기본값: "../frontend/dist")
    pub frontend_dist: String,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`이 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있으며, 숫자 파싱에 실패해도 기본값을 사용합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or(env::var("PORT").ok(), 8000),
            max_connections: parse_or(env::var("DB_MAX_CONNECTIONS").ok(), 5),
            frontend_dist: env::var("FRONTEND_DIST")
                .unwrap_or_else(|_| "../frontend/dist".to_string()),
        })
    }
}

// 값이 없거나 파싱에 실패하면 기본값
fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_uses_value_when_valid() {
        assert_eq!(parse_or::<u16>(Some("9000".to_string()), 8000), 9000);
        assert_eq!(parse_or::<u32>(Some(" 12 ".to_string()), 5), 12);
    }

    #[test]
    fn parse_or_falls_back_on_missing_or_invalid() {
        assert_eq!(parse_or::<u16>(None, 8000), 8000);
        assert_eq!(parse_or::<u16>(Some("not-a-port".to_string()), 8000), 8000);
        assert_eq!(parse_or::<u16>(Some("70000".to_string()), 8000), 8000);
    }
}
