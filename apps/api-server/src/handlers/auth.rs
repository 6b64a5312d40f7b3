//! Authentication handlers.

use actix_web::{HttpResponse, web};

use agora_shared::ApiResponse;
use agora_shared::dto::{AuthResponse, LoginRequest, MemberResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Find member by email
    let member = state
        .members
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Verify password
    let valid = state
        .password_service
        .verify(&req.password, &member.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let member_id = member.id.ok_or_else(|| {
        AppError::Internal("stored member has no id".to_string())
    })?;

    // Generate token
    let token = state
        .token_service
        .generate_token(member_id, &member.email, vec![member.role.clone()])
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.token_service.expiration_seconds() as u64,
    })))
}

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::ok(MemberResponse {
        id: identity.member_id,
        email: identity.email,
        roles: identity.roles,
    })))
}
