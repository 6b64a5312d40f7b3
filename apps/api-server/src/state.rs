//! Application state - shared across all handlers.

use std::sync::Arc;

use agora_core::domain::{Category, Member, Page, PageRequest, Petition};
use agora_core::error::RepoError;
use agora_core::ports::{
    BaseRepository, Cache, MemberRepository, PasswordService, PetitionRepository, TokenService,
};
use agora_core::service::PetitionService;
use agora_infra::{
    Argon2PasswordService, InMemoryCache, JwtTokenService, PostgresMemberRepository,
    PostgresPetitionRepository, RedisCache,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub petitions: Arc<PetitionService>,
    pub members: Arc<dyn MemberRepository>,
    pub token_service: Arc<dyn TokenService>,
    pub password_service: Arc<dyn PasswordService>,
}

/// Fallback petition repository for when the database is not configured.
/// Every read comes back empty and every targeted write is a miss.
struct FallbackPetitionRepository;

#[async_trait::async_trait]
impl BaseRepository<Petition, i64> for FallbackPetitionRepository {
    async fn find_by_id(&self, _id: i64) -> Result<Option<Petition>, RepoError> {
        tracing::warn!("Database not configured - using fallback repository");
        Ok(None)
    }

    async fn save(&self, petition: Petition) -> Result<Petition, RepoError> {
        Ok(petition)
    }

    async fn delete(&self, _id: i64) -> Result<(), RepoError> {
        Err(RepoError::NotFound)
    }
}

#[async_trait::async_trait]
impl PetitionRepository for FallbackPetitionRepository {
    async fn find_ongoing(&self, page: PageRequest) -> Result<Page<Petition>, RepoError> {
        Ok(Page::new(Vec::new(), page, 0))
    }

    async fn find_ongoing_by_category(
        &self,
        page: PageRequest,
        _category: Category,
    ) -> Result<Page<Petition>, RepoError> {
        Ok(Page::new(Vec::new(), page, 0))
    }

    async fn count_by_url(&self, _url: &str) -> Result<u64, RepoError> {
        Ok(0)
    }

    async fn find_soonest_ending(&self, _limit: u64) -> Result<Vec<Petition>, RepoError> {
        Ok(Vec::new())
    }

    async fn find_most_liked(&self, _limit: u64) -> Result<Vec<Petition>, RepoError> {
        Ok(Vec::new())
    }

    async fn find_random_in_category(
        &self,
        _category: Category,
        _limit: u64,
    ) -> Result<Vec<Petition>, RepoError> {
        Ok(Vec::new())
    }

    async fn find_by_title_containing(&self, _needle: &str) -> Result<Vec<Petition>, RepoError> {
        Ok(Vec::new())
    }

    async fn find_with_increased_agree_count(
        &self,
        _limit: u64,
    ) -> Result<Vec<Petition>, RepoError> {
        Ok(Vec::new())
    }
}

/// Fallback member repository for when the database is not configured.
struct FallbackMemberRepository;

#[async_trait::async_trait]
impl BaseRepository<Member, i64> for FallbackMemberRepository {
    async fn find_by_id(&self, _id: i64) -> Result<Option<Member>, RepoError> {
        Ok(None)
    }

    async fn save(&self, member: Member) -> Result<Member, RepoError> {
        Ok(member)
    }

    async fn delete(&self, _id: i64) -> Result<(), RepoError> {
        Err(RepoError::NotFound)
    }
}

#[async_trait::async_trait]
impl MemberRepository for FallbackMemberRepository {
    async fn find_by_email(&self, _email: &str) -> Result<Option<Member>, RepoError> {
        Ok(None)
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let cache: Arc<dyn Cache> = match &config.redis {
            Some(redis_config) => match RedisCache::new(redis_config.clone()).await {
                Ok(cache) => Arc::new(cache),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to Redis: {}. Using in-memory cache.",
                        e
                    );
                    Arc::new(InMemoryCache::new())
                }
            },
            None => {
                tracing::info!("REDIS_URL not set. Using in-memory cache.");
                Arc::new(InMemoryCache::new())
            }
        };

        let (petition_repo, member_repo): (
            Arc<dyn PetitionRepository>,
            Arc<dyn MemberRepository>,
        ) = match &config.database {
            Some(db_config) => match agora_infra::connect(db_config).await {
                Ok(conn) => (
                    Arc::new(PostgresPetitionRepository::new(conn.clone())),
                    Arc::new(PostgresMemberRepository::new(conn)),
                ),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using fallback repositories.",
                        e
                    );
                    (
                        Arc::new(FallbackPetitionRepository),
                        Arc::new(FallbackMemberRepository),
                    )
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database.");
                (
                    Arc::new(FallbackPetitionRepository),
                    Arc::new(FallbackMemberRepository),
                )
            }
        };

        let petitions = Arc::new(PetitionService::new(
            petition_repo,
            member_repo.clone(),
            cache,
            config.cache_ttl,
        ));

        tracing::info!("Application state initialized");

        Self {
            petitions,
            members: member_repo,
            token_service: Arc::new(JwtTokenService::from_env()),
            password_service: Arc::new(Argon2PasswordService::new()),
        }
    }
}
