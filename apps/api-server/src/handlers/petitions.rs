//! Petition handlers - the resource endpoints behind the response envelope.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use agora_core::domain::{Category, PageRequest};
use agora_core::service::PetitionInput;
use agora_shared::ApiResponse;
use agora_shared::dto::{
    IncreasedPetitionResponse, PetitionDetailResponse, PetitionRequest, PetitionSummaryResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<u64>,
    size: Option<u64>,
}

impl PageQuery {
    fn to_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LikeQuery {
    member_id: i64,
}

/// Create/update/delete require the admin role.
fn require_admin(identity: &Identity) -> Result<(), AppError> {
    if identity.has_role("admin") {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

fn parse_category(raw: &str) -> Result<Category, AppError> {
    Ok(raw.parse::<Category>()?)
}

/// POST /api/petitions (admin)
pub async fn create_petition(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PetitionRequest>,
) -> AppResult<HttpResponse> {
    require_admin(&identity)?;

    let input: PetitionInput = body.into_inner().into();
    let created = state.petitions.create_petition(input).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PetitionDetailResponse::from(created))))
}

/// GET /api/petitions/{id}
pub async fn get_petition_by_id(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let petition = state.petitions.get_petition_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(PetitionDetailResponse::from(petition))))
}

/// GET /api/petitions?page&size
pub async fn get_ongoing_petitions(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .petitions
        .get_ongoing_petitions(query.to_request())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page.map(PetitionSummaryResponse::from))))
}

/// GET /api/petitions/category/{category}?page&size
pub async fn petitions_by_category(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let category = parse_category(&path.into_inner())?;
    let page = state
        .petitions
        .get_petitions_by_category(query.to_request(), category)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page.map(PetitionSummaryResponse::from))))
}

/// GET /api/petitions/view/end-date
pub async fn end_date_petitions(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let petitions = state.petitions.end_date_petitions().await?;
    let views: Vec<PetitionSummaryResponse> =
        petitions.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views)))
}

/// GET /api/petitions/view/likes-count
pub async fn likes_count_petitions(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let petitions = state.petitions.likes_count_petitions().await?;
    let views: Vec<PetitionSummaryResponse> =
        petitions.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views)))
}

/// GET /api/petitions/view/increased
pub async fn increased_petitions(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let petitions = state.petitions.increased_agree_count_petitions().await?;
    let views: Vec<IncreasedPetitionResponse> =
        petitions.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views)))
}

/// GET /api/petitions/view/category/{category}
pub async fn random_category_petitions(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let category = parse_category(&path.into_inner())?;
    let petitions = state
        .petitions
        .get_random_category_petitions(category)
        .await?;
    let views: Vec<PetitionSummaryResponse> =
        petitions.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views)))
}

/// GET /api/petitions/search?query=
pub async fn search_petitions(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let needle = query.query.clone().unwrap_or_default();
    let petitions = state.petitions.search_petitions_by_title(&needle).await?;
    let views: Vec<PetitionDetailResponse> =
        petitions.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views)))
}

/// POST /api/petitions/{id}/like?member_id= - only for the member themselves.
pub async fn toggle_like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    query: web::Query<LikeQuery>,
) -> AppResult<HttpResponse> {
    if identity.member_id != query.member_id {
        return Err(AppError::Forbidden);
    }

    let status = state
        .petitions
        .toggle_like_on_petition(path.into_inner(), query.member_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(status.to_string())))
}

/// PUT /api/petitions/{id} (admin)
pub async fn update_petition(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<PetitionRequest>,
) -> AppResult<HttpResponse> {
    require_admin(&identity)?;

    let input: PetitionInput = body.into_inner().into();
    let updated = state
        .petitions
        .update_petition(path.into_inner(), input)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PetitionDetailResponse::from(updated))))
}

/// DELETE /api/petitions/{id} (admin) - 204 on success.
pub async fn delete_petition(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    require_admin(&identity)?;

    state
        .petitions
        .delete_petition_by_id(path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
