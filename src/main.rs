use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use player_account_service::caching::redis::RedisClient;
use player_account_service::config::{
    CorsConfig, InternalApiConfig, RateLimitConfig, ServerConfig, StoreBackend, StoreConfig,
    INTERNAL_API_KEY_HEADER,
};
use player_account_service::db::Database;
use player_account_service::repositories::Stores;
use player_account_service::routes::configure_all_routes;
use player_account_service::services::Services;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 플레이어 계정 서비스 시작중...");

    let internal_api_key = InternalApiConfig::api_key().map_err(startup_error)?;
    let stores = initialize_stores().await?;
    let services = Services::new(stores);

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(services, internal_api_key).await
}

async fn start_http_server(services: Services, internal_api_key: String) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| startup_error("레이트 리밋 설정이 올바르지 않습니다 (0은 허용되지 않음)"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let allowed_origins = CorsConfig::allowed_origins();

    HttpServer::new(move || {
        let cors = configure_cors(&allowed_origins);

        App::new()
            .wrap(Governor::new(&governor_conf))

            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            .configure(|cfg| services.configure(cfg))
            .configure(|cfg| configure_all_routes(cfg, &internal_api_key))
    })
        .bind(&bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

async fn initialize_stores() -> std::io::Result<Stores> {
    match StoreConfig::backend().map_err(startup_error)? {
        StoreBackend::Memory => {
            info!("🧪 메모리 저장소 사용 (재시작 시 데이터가 사라집니다)");
            Ok(Stores::in_memory())
        }
        StoreBackend::MongoDb => {
            let (database, redis_client) = initialize_data_stores().await?;
            Stores::mongodb(database, redis_client)
                .await
                .map_err(startup_error)
        }
    }
}

async fn initialize_data_stores() -> std::io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Arc::new(
        Database::new()
            .await
            .map_err(|e| startup_error(format!("데이터베이스 연결 실패: {}", e)))?
    );

    info!("✅ MongoDB 연결 성공");

    let redis_client = Arc::new(
        RedisClient::new()
            .await
            .map_err(|e| startup_error(format!("Redis 연결 실패: {}", e)))?
    );

    info!("✅ Redis 연결 성공");

    Ok((database, redis_client))
}

fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))

        .allowed_methods(vec!["GET", "POST", "OPTIONS"])

        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .allowed_header(INTERNAL_API_KEY_HEADER)

        .max_age(3600)
}

fn startup_error(err: impl std::fmt::Display) -> std::io::Error {
    error!("❌ 시작 실패: {}", err);
    std::io::Error::other(err.to_string())
}
