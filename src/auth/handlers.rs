use actix_web::{web, HttpResponse, ResponseError};
use tracing::{info, error};

use crate::AppState;
use crate::auth::models::{LoginRequest, SignupRequest};
use crate::error::AppError;

pub async fn signup(
    req: web::Json<SignupRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received signup request for email: {}", req.email);

    let payload = req.into_inner().validated()?;

    match state.auth_service.signup(payload).await {
        Ok(response) => {
            info!("Signup successful for email: {}", response.user.email);
            Ok(HttpResponse::Created().json(response))
        }
        Err(e) => {
            log_failure("Signup", &e);
            Err(e)
        }
    }
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for email: {}", req.email);

    let payload = req.into_inner().validated()?;

    match state.auth_service.login(payload).await {
        Ok(response) => {
            info!("Login successful for email: {}", response.user.email);
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            log_failure("Login", &e);
            Err(e)
        }
    }
}

// Client mistakes are not server faults; only dependency failures reach the
// error log.
fn log_failure(operation: &str, err: &AppError) {
    if err.status_code().is_server_error() {
        error!("{} failed: {}", operation, err);
    } else {
        info!("{} rejected: {}", operation, err);
    }
}
