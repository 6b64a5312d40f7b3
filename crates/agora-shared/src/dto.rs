//! Data Transfer Objects - request/response types for the API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use agora_core::domain::{Category, Petition};
use agora_core::service::PetitionInput;

/// Request body for creating or updating a petition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetitionRequest {
    pub member_id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category: Category,
    pub original_url: String,
    #[serde(default)]
    pub related_news: Option<String>,
}

impl From<PetitionRequest> for PetitionInput {
    fn from(req: PetitionRequest) -> Self {
        Self {
            member_id: req.member_id,
            title: req.title,
            content: req.content,
            summary: req.summary,
            start_date: req.start_date,
            end_date: req.end_date,
            category: req.category,
            original_url: req.original_url,
            related_news: req.related_news,
        }
    }
}

/// Compact petition view used in list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetitionSummaryResponse {
    pub petition_id: i64,
    pub title: String,
    pub category: Category,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub likes_count: i32,
    pub agree_count: Option<i32>,
}

impl From<Petition> for PetitionSummaryResponse {
    fn from(p: Petition) -> Self {
        Self {
            petition_id: p.id.unwrap_or_default(),
            title: p.title,
            category: p.category,
            start_date: p.start_date,
            end_date: p.end_date,
            likes_count: p.likes_count,
            agree_count: p.agree_count,
        }
    }
}

/// Full petition view for single fetch, create, update, and search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetitionDetailResponse {
    pub petition_id: i64,
    pub member_id: i64,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category: Category,
    pub original_url: String,
    pub related_news: Option<String>,
    pub likes_count: i32,
    pub interest_count: i32,
    pub agree_count: Option<i32>,
    pub previous_agree_count: i32,
    pub liked_member_ids: Vec<i64>,
}

impl From<Petition> for PetitionDetailResponse {
    fn from(p: Petition) -> Self {
        Self {
            petition_id: p.id.unwrap_or_default(),
            member_id: p.member_id,
            title: p.title,
            content: p.content,
            summary: p.summary,
            start_date: p.start_date,
            end_date: p.end_date,
            category: p.category,
            original_url: p.original_url,
            related_news: p.related_news,
            likes_count: p.likes_count,
            interest_count: p.interest_count,
            agree_count: p.agree_count,
            previous_agree_count: p.previous_agree_count,
            liked_member_ids: p.liked_member_ids.into_iter().collect(),
        }
    }
}

/// View for the rising-agreement listing, with the computed delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncreasedPetitionResponse {
    pub petition_id: i64,
    pub title: String,
    pub category: Category,
    pub end_date: NaiveDate,
    pub agree_count: Option<i32>,
    pub previous_agree_count: i32,
    pub agree_delta: Option<i32>,
}

impl From<Petition> for IncreasedPetitionResponse {
    fn from(p: Petition) -> Self {
        Self {
            petition_id: p.id.unwrap_or_default(),
            agree_delta: p.agree_delta(),
            title: p.title,
            category: p.category,
            end_date: p.end_date,
            agree_count: p.agree_count,
            previous_agree_count: p.previous_agree_count,
        }
    }
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a member's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberResponse {
    pub id: i64,
    pub email: String,
    pub roles: Vec<String>,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}
