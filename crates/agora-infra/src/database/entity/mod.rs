//! SeaORM entities mirroring the domain model.

pub mod member;
pub mod news;
pub mod petition;
