use std::rc::Rc;
use std::sync::Arc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, ResponseError};
use constant_time_eq::constant_time_eq;
use futures_util::future::LocalBoxFuture;
use crate::config::INTERNAL_API_KEY_HEADER;
use crate::core::errors::AppError;

pub struct InternalApiKeyMiddlewareService<S> {
    pub service: Rc<S>,
    pub api_key: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for InternalApiKeyMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let api_key = self.api_key.clone();

        Box::pin(async move {
            if let Err(err) = verify_api_key(&req, &api_key) {
                log::warn!("내부 호출 인증 실패: {} {} ({})", req.method(), req.path(), err);
                let response = err.error_response();
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn verify_api_key(req: &ServiceRequest, expected: &str) -> Result<(), AppError> {
    let provided = req.headers()
        .get(INTERNAL_API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError(format!("{} 헤더가 없습니다", INTERNAL_API_KEY_HEADER)))?;

    if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
        return Err(AppError::AuthenticationError("내부 API 키가 올바르지 않습니다".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn check(header: Option<&str>) -> Result<(), AppError> {
        let req = match header {
            Some(key) => TestRequest::default().insert_header((INTERNAL_API_KEY_HEADER, key)),
            None => TestRequest::default(),
        };
        verify_api_key(&req.to_srv_request(), "secret")
    }

    #[test]
    fn test_verify_api_key() {
        assert!(check(Some("secret")).is_ok());
        assert!(matches!(check(Some("secreT")), Err(AppError::AuthenticationError(_))));
        assert!(matches!(check(Some("secret2")), Err(AppError::AuthenticationError(_))));
        assert!(matches!(check(Some("")), Err(AppError::AuthenticationError(_))));
        assert!(matches!(check(None), Err(AppError::AuthenticationError(_))));
    }
}
