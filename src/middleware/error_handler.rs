use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    Error, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Logs failed requests; handlers already render `AppError` bodies
pub struct ErrorHandler;

impl<S, B> Transform<S, ServiceRequest> for ErrorHandler
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorHandlerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorHandlerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ErrorHandlerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ErrorHandlerMiddleware<S>
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
        let service = self.service.clone();
        let path = req.path().to_string();

        Box::pin(async move {
            let result = service.call(req).await;

            match &result {
                Ok(res) => log_status(&path, res.status()),
                Err(err) => tracing::error!(path = %path, "Request error: {:?}", err),
            }

            result
        })
    }
}

fn log_status(path: &str, status: StatusCode) {
    if status.is_server_error() {
        tracing::error!(path = %path, status = %status, "Request failed");
    } else if status.is_client_error() {
        tracing::warn!(path = %path, status = %status, "Request rejected");
    }
}

/// Standard error body, matching `AppError` responses
pub fn error_response(status: StatusCode, message: String) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "error": {
            "code": status.as_u16(),
            "message": message,
            "details": serde_json::Value::Null,
        }
    }))
}

/// Render malformed request bodies in the standard error shape
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let response = error_response(StatusCode::BAD_REQUEST, format!("Invalid request body: {}", err));
    InternalError::from_response(err, response).into()
}
