use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorInternalServerError, ErrorUnauthorized},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use crate::utils::jwt::{verify_token, TOKEN_TYPE_ACCESS};
use std::env;

/// Bearer-token guard for the protected scope. On success the caller's user
/// id is stored in request extensions for handlers to pick up.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

fn unauthorized(message: &str) -> Error {
    ErrorUnauthorized(json!({
        "status": "error",
        "message": message
    }))
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let header = match req.headers().get("Authorization") {
            Some(h) => h,
            None => {
                return Box::pin(async { Err(unauthorized("Missing Authorization header")) });
            }
        };

        let token = match header.to_str().ok().and_then(|h| h.strip_prefix("Bearer ")) {
            Some(t) => t.to_string(),
            None => {
                return Box::pin(async { Err(unauthorized("Invalid token format")) });
            }
        };

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                return Box::pin(async {
                    Err(ErrorInternalServerError(json!({
                        "status": "error",
                        "message": "JWT secret not configured"
                    })))
                });
            }
        };

        let user_id = match verify_token(&token, &jwt_secret, TOKEN_TYPE_ACCESS) {
            Ok(id) => id,
            Err(_) => {
                return Box::pin(async { Err(unauthorized("Invalid or expired token")) });
            }
        };

        req.extensions_mut().insert(user_id);

        let service = self.service.clone();
        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::{create_access_token, create_refresh_token};
    use actix_web::{get, test, App, HttpResponse, Responder};

    // Same value as the service-level tests: JWT_SECRET is process-global and
    // tests run in parallel.
    const SECRET: &str = "unit-test-secret";

    #[get("/guarded")]
    async fn guarded() -> impl Responder {
        HttpResponse::Ok().body("ok")
    }

    fn set_secret() {
        std::env::set_var("JWT_SECRET", SECRET);
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorized() {
        set_secret();
        let app = test::init_service(App::new().wrap(AuthMiddleware).service(guarded)).await;

        let req = test::TestRequest::get().uri("/guarded").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 401);
    }

    #[actix_web::test]
    async fn malformed_header_is_unauthorized() {
        set_secret();
        let app = test::init_service(App::new().wrap(AuthMiddleware).service(guarded)).await;

        let req = test::TestRequest::get()
            .uri("/guarded")
            .insert_header(("Authorization", "Token abc"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 401);
    }

    #[actix_web::test]
    async fn refresh_token_is_rejected_on_protected_routes() {
        set_secret();
        let token = create_refresh_token(1, SECRET).unwrap();
        let app = test::init_service(App::new().wrap(AuthMiddleware).service(guarded)).await;

        let req = test::TestRequest::get()
            .uri("/guarded")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 401);
    }

    #[actix_web::test]
    async fn valid_access_token_passes() {
        set_secret();
        let token = create_access_token(1, SECRET).unwrap();
        let app = test::init_service(App::new().wrap(AuthMiddleware).service(guarded)).await;

        let req = test::TestRequest::get()
            .uri("/guarded")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);
    }
}
