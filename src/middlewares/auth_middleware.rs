//! 내부 호출자 인증 미들웨어
//!
//! OAuth 핸드셰이크를 끝낸 게이트웨이만 프로바이더 로그인 엔드포인트를 호출하도록
//! `X-Internal-Api-Key` 헤더를 설정된 공유 키와 비교합니다.
//!
//! ```rust,ignore
//! web::scope("/internal")
//!     .wrap(InternalApiKeyMiddleware::new(api_key))
//!     .service(auth::google_provider_login)
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::InternalApiKeyMiddlewareService;

#[derive(Clone)]
pub struct InternalApiKeyMiddleware {
    api_key: Arc<str>,
}

impl InternalApiKeyMiddleware {
    pub fn new(api_key: impl Into<Arc<str>>) -> Self {
        Self { api_key: api_key.into() }
    }
}

impl<S, B> Transform<S, ServiceRequest> for InternalApiKeyMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = InternalApiKeyMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(InternalApiKeyMiddlewareService {
            service: Rc::new(service),
            api_key: self.api_key.clone(),
        }))
    }
}
