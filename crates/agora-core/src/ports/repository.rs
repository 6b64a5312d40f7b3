use async_trait::async_trait;

use crate::domain::{Category, Member, Page, PageRequest, Petition};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (insert when the ID is unset, update otherwise).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. `RepoError::NotFound` when no row matched.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Petition repository - one method per parameterized read the service needs.
///
/// "Ongoing" always means `end_date >= today` at date granularity; every
/// filtered method below applies it.
#[async_trait]
pub trait PetitionRepository: BaseRepository<Petition, i64> {
    /// Page of ongoing petitions in store-default order.
    async fn find_ongoing(&self, page: PageRequest) -> Result<Page<Petition>, RepoError>;

    /// Page of ongoing petitions in one category.
    async fn find_ongoing_by_category(
        &self,
        page: PageRequest,
        category: Category,
    ) -> Result<Page<Petition>, RepoError>;

    /// How many petitions carry this source URL. Used as a dedup check
    /// before ingestion.
    async fn count_by_url(&self, url: &str) -> Result<u64, RepoError>;

    /// Ongoing petitions with the soonest end date, ascending.
    async fn find_soonest_ending(&self, limit: u64) -> Result<Vec<Petition>, RepoError>;

    /// Ongoing petitions with the most likes, descending; ties broken by id
    /// ascending so the order is deterministic.
    async fn find_most_liked(&self, limit: u64) -> Result<Vec<Petition>, RepoError>;

    /// Ongoing petitions in one category, randomly ordered per call.
    async fn find_random_in_category(
        &self,
        category: Category,
        limit: u64,
    ) -> Result<Vec<Petition>, RepoError>;

    /// Case-insensitive substring match on title, unpaginated.
    async fn find_by_title_containing(&self, needle: &str) -> Result<Vec<Petition>, RepoError>;

    /// Ongoing petitions whose agreement count grew since the last sync
    /// (`previous_agree_count > 0` and a positive delta), largest delta first.
    async fn find_with_increased_agree_count(
        &self,
        limit: u64,
    ) -> Result<Vec<Petition>, RepoError>;
}

/// Member repository with domain-specific methods.
#[async_trait]
pub trait MemberRepository: BaseRepository<Member, i64> {
    /// Find a member by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, RepoError>;
}
