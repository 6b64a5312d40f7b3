//! # Agora Shared
//!
//! Wire-level types shared between the API server and its clients:
//! request/response DTOs and the uniform response envelope.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
