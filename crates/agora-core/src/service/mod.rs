//! Domain services - use-case orchestration over the ports.

mod petitions;

pub use petitions::{LikeStatus, PetitionInput, PetitionService};
