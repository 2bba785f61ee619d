//! # Configuration Module
//!
//! 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 저장소, 서버, 레이트 리밋, CORS, 환경 관련 설정
//! - [`auth_config`] - 내부 호출자(게이트웨이) 인증 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 환경 / 프로파일
//! export ENVIRONMENT="production"   # development, test, staging, production
//! export PROFILE="prod"             # .env.prod / .env.dev / .env
//!
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export WORKERS="4"
//!
//! # 저장소 설정
//! export STORE_BACKEND="mongodb"    # mongodb, memory
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="player_accounts"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # 내부 게이트웨이 키 (프로덕션 필수)
//! export INTERNAL_API_KEY="long-random-secret"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
