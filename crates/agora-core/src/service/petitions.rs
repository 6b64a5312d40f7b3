//! Petition service - the single entry point for all petition use cases.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{Category, Page, PageRequest, Petition};
use crate::error::{DomainError, RepoError};
use crate::ports::{Cache, MemberRepository, PetitionRepository};

/// Keys for cached petition reads all share this prefix; any write
/// invalidates the whole prefix rather than tracking individual keys.
const CACHE_PREFIX: &str = "petitions:";

/// Fixed size of the curated "view" endpoints (soonest-ending, most-liked,
/// random sample, rising agreement).
const VIEW_LIMIT: u64 = 5;

/// Outcome of a like toggle, rendered as "liked"/"unliked" in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeStatus {
    Liked,
    Unliked,
}

impl LikeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LikeStatus::Liked => "liked",
            LikeStatus::Unliked => "unliked",
        }
    }
}

impl fmt::Display for LikeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable petition fields, shared by create and update.
#[derive(Debug, Clone)]
pub struct PetitionInput {
    pub member_id: i64,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category: Category,
    pub original_url: String,
    pub related_news: Option<String>,
}

impl PetitionInput {
    const MAX_TITLE: usize = 1000;
    const MAX_CONTENT: usize = 8000;
    const MAX_SUMMARY: usize = 4000;

    fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("title is required".to_string()));
        }
        if self.title.chars().count() > Self::MAX_TITLE {
            return Err(DomainError::Validation(format!(
                "title exceeds {} characters",
                Self::MAX_TITLE
            )));
        }
        if self.content.trim().is_empty() {
            return Err(DomainError::Validation("content is required".to_string()));
        }
        if self.content.chars().count() > Self::MAX_CONTENT {
            return Err(DomainError::Validation(format!(
                "content exceeds {} characters",
                Self::MAX_CONTENT
            )));
        }
        if let Some(summary) = &self.summary {
            if summary.chars().count() > Self::MAX_SUMMARY {
                return Err(DomainError::Validation(format!(
                    "summary exceeds {} characters",
                    Self::MAX_SUMMARY
                )));
            }
        }
        if self.original_url.trim().is_empty() {
            return Err(DomainError::Validation(
                "original_url is required".to_string(),
            ));
        }
        if self.end_date < self.start_date {
            return Err(DomainError::Validation(
                "end_date must not be before start_date".to_string(),
            ));
        }
        Ok(())
    }
}

/// Orchestrates petition use cases over the repository and cache ports.
///
/// Reads go cache-aside with a JSON payload per derived key; the random
/// category sample is deliberately never cached so every call draws fresh.
pub struct PetitionService {
    petitions: Arc<dyn PetitionRepository>,
    members: Arc<dyn MemberRepository>,
    cache: Arc<dyn Cache>,
    cache_ttl: Duration,
}

impl PetitionService {
    pub fn new(
        petitions: Arc<dyn PetitionRepository>,
        members: Arc<dyn MemberRepository>,
        cache: Arc<dyn Cache>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            petitions,
            members,
            cache,
            cache_ttl,
        }
    }

    pub async fn create_petition(&self, input: PetitionInput) -> Result<Petition, DomainError> {
        input.validate()?;

        if self.members.find_by_id(input.member_id).await?.is_none() {
            return Err(DomainError::member_not_found(input.member_id));
        }
        if self.petitions.count_by_url(&input.original_url).await? > 0 {
            return Err(DomainError::Duplicate(format!(
                "petition with url {} already exists",
                input.original_url
            )));
        }

        let petition = Petition {
            id: None,
            member_id: input.member_id,
            title: input.title,
            content: input.content,
            summary: input.summary,
            start_date: input.start_date,
            end_date: input.end_date,
            category: input.category,
            original_url: input.original_url,
            related_news: input.related_news,
            likes_count: 0,
            interest_count: 0,
            agree_count: None,
            previous_agree_count: 0,
            liked_member_ids: Default::default(),
            created_at: Utc::now(),
        };

        let saved = self.petitions.save(petition).await?;
        self.invalidate().await;
        tracing::info!(petition_id = ?saved.id, "Petition created");
        Ok(saved)
    }

    pub async fn get_petition_by_id(&self, id: i64) -> Result<Petition, DomainError> {
        let key = format!("{CACHE_PREFIX}detail:{id}");
        if let Some(hit) = self.cache_get::<Petition>(&key).await {
            return Ok(hit);
        }

        let petition = self
            .petitions
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::petition_not_found(id))?;
        self.cache_put(&key, &petition).await;
        Ok(petition)
    }

    pub async fn get_ongoing_petitions(
        &self,
        page: PageRequest,
    ) -> Result<Page<Petition>, DomainError> {
        let key = format!("{CACHE_PREFIX}ongoing:p{}:s{}", page.page, page.size);
        if let Some(hit) = self.cache_get::<Page<Petition>>(&key).await {
            return Ok(hit);
        }

        let result = self.petitions.find_ongoing(page).await?;
        self.cache_put(&key, &result).await;
        Ok(result)
    }

    pub async fn get_petitions_by_category(
        &self,
        page: PageRequest,
        category: Category,
    ) -> Result<Page<Petition>, DomainError> {
        let key = format!(
            "{CACHE_PREFIX}category:{category}:p{}:s{}",
            page.page, page.size
        );
        if let Some(hit) = self.cache_get::<Page<Petition>>(&key).await {
            return Ok(hit);
        }

        let result = self
            .petitions
            .find_ongoing_by_category(page, category)
            .await?;
        self.cache_put(&key, &result).await;
        Ok(result)
    }

    /// The 5 ongoing petitions closest to expiry.
    pub async fn end_date_petitions(&self) -> Result<Vec<Petition>, DomainError> {
        let key = format!("{CACHE_PREFIX}view:end_date");
        if let Some(hit) = self.cache_get::<Vec<Petition>>(&key).await {
            return Ok(hit);
        }

        let result = self.petitions.find_soonest_ending(VIEW_LIMIT).await?;
        self.cache_put(&key, &result).await;
        Ok(result)
    }

    /// The 5 ongoing petitions with the most likes.
    pub async fn likes_count_petitions(&self) -> Result<Vec<Petition>, DomainError> {
        let key = format!("{CACHE_PREFIX}view:likes_count");
        if let Some(hit) = self.cache_get::<Vec<Petition>>(&key).await {
            return Ok(hit);
        }

        let result = self.petitions.find_most_liked(VIEW_LIMIT).await?;
        self.cache_put(&key, &result).await;
        Ok(result)
    }

    /// 5 ongoing petitions from one category in random order. Never cached:
    /// each call must draw independently.
    pub async fn get_random_category_petitions(
        &self,
        category: Category,
    ) -> Result<Vec<Petition>, DomainError> {
        Ok(self
            .petitions
            .find_random_in_category(category, VIEW_LIMIT)
            .await?)
    }

    /// The 5 ongoing petitions whose agreement count grew most since the
    /// last external sync.
    pub async fn increased_agree_count_petitions(&self) -> Result<Vec<Petition>, DomainError> {
        let key = format!("{CACHE_PREFIX}view:increased");
        if let Some(hit) = self.cache_get::<Vec<Petition>>(&key).await {
            return Ok(hit);
        }

        let result = self
            .petitions
            .find_with_increased_agree_count(VIEW_LIMIT)
            .await?;
        self.cache_put(&key, &result).await;
        Ok(result)
    }

    pub async fn search_petitions_by_title(
        &self,
        query: &str,
    ) -> Result<Vec<Petition>, DomainError> {
        let needle = query.trim();
        if needle.is_empty() {
            return Err(DomainError::Validation(
                "search query must not be empty".to_string(),
            ));
        }
        Ok(self.petitions.find_by_title_containing(needle).await?)
    }

    /// Add or remove `member_id`'s like on a petition.
    ///
    /// Read-modify-write without explicit locking: the persisted write is a
    /// single row, and same-member races resolve last-write-wins.
    pub async fn toggle_like_on_petition(
        &self,
        petition_id: i64,
        member_id: i64,
    ) -> Result<LikeStatus, DomainError> {
        let mut petition = self
            .petitions
            .find_by_id(petition_id)
            .await?
            .ok_or_else(|| DomainError::petition_not_found(petition_id))?;

        let liked = petition.toggle_like(member_id);
        self.petitions.save(petition).await?;
        self.invalidate().await;

        tracing::debug!(petition_id, member_id, liked, "Like toggled");
        Ok(if liked {
            LikeStatus::Liked
        } else {
            LikeStatus::Unliked
        })
    }

    /// Replace the mutable fields of an existing petition. Identity, the
    /// liked set, and the counters are left untouched.
    pub async fn update_petition(
        &self,
        id: i64,
        input: PetitionInput,
    ) -> Result<Petition, DomainError> {
        input.validate()?;

        let mut petition = self
            .petitions
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::petition_not_found(id))?;

        petition.title = input.title;
        petition.content = input.content;
        petition.summary = input.summary;
        petition.start_date = input.start_date;
        petition.end_date = input.end_date;
        petition.category = input.category;
        petition.original_url = input.original_url;
        petition.related_news = input.related_news;

        let saved = self.petitions.save(petition).await?;
        self.invalidate().await;
        Ok(saved)
    }

    pub async fn delete_petition_by_id(&self, id: i64) -> Result<(), DomainError> {
        match self.petitions.delete(id).await {
            Ok(()) => {
                self.invalidate().await;
                tracing::info!(petition_id = id, "Petition deleted");
                Ok(())
            }
            Err(RepoError::NotFound) => Err(DomainError::petition_not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn cache_get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.cache.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Dropping undecodable cache entry");
                let _ = self.cache.delete(key).await;
                None
            }
        }
    }

    async fn cache_put<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => {
                if let Err(e) = self.cache.set(key, &raw, Some(self.cache_ttl)).await {
                    tracing::warn!(key, error = %e, "Cache write failed");
                }
            }
            Err(e) => tracing::warn!(key, error = %e, "Cache serialization failed"),
        }
    }

    async fn invalidate(&self) {
        if let Err(e) = self.cache.delete_prefix(CACHE_PREFIX).await {
            tracing::warn!(error = %e, "Cache invalidation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Duration as ChronoDuration;

    use super::*;
    use crate::domain::Member;
    use crate::ports::{BaseRepository, CacheError};

    struct FakePetitionRepo {
        rows: Mutex<HashMap<i64, Petition>>,
        next_id: AtomicI64,
    }

    impl FakePetitionRepo {
        fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
                next_id: AtomicI64::new(1),
            }
        }

        fn ongoing(&self) -> Vec<Petition> {
            let today = Utc::now().date_naive();
            let mut rows: Vec<Petition> = self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|p| p.is_ongoing(today))
                .cloned()
                .collect();
            rows.sort_by_key(|p| p.id);
            rows
        }
    }

    #[async_trait]
    impl BaseRepository<Petition, i64> for FakePetitionRepo {
        async fn find_by_id(&self, id: i64) -> Result<Option<Petition>, RepoError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, mut entity: Petition) -> Result<Petition, RepoError> {
            let id = entity
                .id
                .unwrap_or_else(|| self.next_id.fetch_add(1, Ordering::SeqCst));
            entity.id = Some(id);
            self.rows.lock().unwrap().insert(id, entity.clone());
            Ok(entity)
        }

        async fn delete(&self, id: i64) -> Result<(), RepoError> {
            self.rows
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl PetitionRepository for FakePetitionRepo {
        async fn find_ongoing(&self, page: PageRequest) -> Result<Page<Petition>, RepoError> {
            let rows = self.ongoing();
            let total = rows.len() as u64;
            let items = rows
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.size as usize)
                .collect();
            Ok(Page::new(items, page, total))
        }

        async fn find_ongoing_by_category(
            &self,
            page: PageRequest,
            category: Category,
        ) -> Result<Page<Petition>, RepoError> {
            let rows: Vec<Petition> = self
                .ongoing()
                .into_iter()
                .filter(|p| p.category == category)
                .collect();
            let total = rows.len() as u64;
            let items = rows
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.size as usize)
                .collect();
            Ok(Page::new(items, page, total))
        }

        async fn count_by_url(&self, url: &str) -> Result<u64, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|p| p.original_url == url)
                .count() as u64)
        }

        async fn find_soonest_ending(&self, limit: u64) -> Result<Vec<Petition>, RepoError> {
            let mut rows = self.ongoing();
            rows.sort_by_key(|p| p.end_date);
            rows.truncate(limit as usize);
            Ok(rows)
        }

        async fn find_most_liked(&self, limit: u64) -> Result<Vec<Petition>, RepoError> {
            let mut rows = self.ongoing();
            rows.sort_by(|a, b| b.likes_count.cmp(&a.likes_count).then(a.id.cmp(&b.id)));
            rows.truncate(limit as usize);
            Ok(rows)
        }

        async fn find_random_in_category(
            &self,
            category: Category,
            limit: u64,
        ) -> Result<Vec<Petition>, RepoError> {
            let mut rows: Vec<Petition> = self
                .ongoing()
                .into_iter()
                .filter(|p| p.category == category)
                .collect();
            rows.truncate(limit as usize);
            Ok(rows)
        }

        async fn find_by_title_containing(
            &self,
            needle: &str,
        ) -> Result<Vec<Petition>, RepoError> {
            let needle = needle.to_lowercase();
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|p| p.title.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        }

        async fn find_with_increased_agree_count(
            &self,
            limit: u64,
        ) -> Result<Vec<Petition>, RepoError> {
            let mut rows: Vec<Petition> = self
                .ongoing()
                .into_iter()
                .filter(|p| p.agree_delta().is_some_and(|d| d > 0))
                .collect();
            rows.sort_by(|a, b| b.agree_delta().cmp(&a.agree_delta()));
            rows.truncate(limit as usize);
            Ok(rows)
        }
    }

    struct FakeMemberRepo {
        rows: Mutex<HashMap<i64, Member>>,
    }

    impl FakeMemberRepo {
        fn with_member(id: i64) -> Self {
            let mut member = Member::new(
                format!("member{id}@example.com"),
                "hash".to_string(),
                Member::ROLE_USER.to_string(),
            );
            member.id = Some(id);
            Self {
                rows: Mutex::new(HashMap::from([(id, member)])),
            }
        }
    }

    #[async_trait]
    impl BaseRepository<Member, i64> for FakeMemberRepo {
        async fn find_by_id(&self, id: i64) -> Result<Option<Member>, RepoError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, entity: Member) -> Result<Member, RepoError> {
            Ok(entity)
        }

        async fn delete(&self, _id: i64) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl MemberRepository for FakeMemberRepo {
        async fn find_by_email(&self, email: &str) -> Result<Option<Member>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|m| m.email == email)
                .cloned())
        }
    }

    struct NullCache;

    #[async_trait]
    impl Cache for NullCache {
        async fn get(&self, _key: &str) -> Option<String> {
            None
        }

        async fn set(
            &self,
            _key: &str,
            _value: &str,
            _ttl: Option<Duration>,
        ) -> Result<(), CacheError> {
            Ok(())
        }

        async fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Ok(())
        }

        async fn delete_prefix(&self, _prefix: &str) -> Result<(), CacheError> {
            Ok(())
        }

        async fn exists(&self, _key: &str) -> bool {
            false
        }
    }

    /// Backing map plus a read counter, for asserting cache traffic.
    struct RecordingCache {
        store: Mutex<HashMap<String, String>>,
        reads: AtomicUsize,
    }

    impl RecordingCache {
        fn new() -> Self {
            Self {
                store: Mutex::new(HashMap::new()),
                reads: AtomicUsize::new(0),
            }
        }

        fn keys(&self) -> Vec<String> {
            self.store.lock().unwrap().keys().cloned().collect()
        }

        fn read_count(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Cache for RecordingCache {
        async fn get(&self, key: &str) -> Option<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.store.lock().unwrap().get(key).cloned()
        }

        async fn set(
            &self,
            key: &str,
            value: &str,
            _ttl: Option<Duration>,
        ) -> Result<(), CacheError> {
            self.store
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<(), CacheError> {
            self.store.lock().unwrap().remove(key);
            Ok(())
        }

        async fn delete_prefix(&self, prefix: &str) -> Result<(), CacheError> {
            self.store
                .lock()
                .unwrap()
                .retain(|key, _| !key.starts_with(prefix));
            Ok(())
        }

        async fn exists(&self, key: &str) -> bool {
            self.store.lock().unwrap().contains_key(key)
        }
    }

    const MEMBER_ID: i64 = 7;

    fn service() -> PetitionService {
        service_with_cache(Arc::new(NullCache))
    }

    fn service_with_cache(cache: Arc<dyn Cache>) -> PetitionService {
        PetitionService::new(
            Arc::new(FakePetitionRepo::new()),
            Arc::new(FakeMemberRepo::with_member(MEMBER_ID)),
            cache,
            Duration::from_secs(60),
        )
    }

    fn input(title: &str, url: &str) -> PetitionInput {
        let today = Utc::now().date_naive();
        PetitionInput {
            member_id: MEMBER_ID,
            title: title.to_string(),
            content: "Some content".to_string(),
            summary: None,
            start_date: today,
            end_date: today + ChronoDuration::days(30),
            category: Category::Education,
            original_url: url.to_string(),
            related_news: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_zeroed_counters() {
        let svc = service();
        let created = svc.create_petition(input("T1", "https://p/1")).await.unwrap();

        assert!(created.id.is_some());
        assert_eq!(created.likes_count, 0);
        assert_eq!(created.interest_count, 0);
        assert_eq!(created.agree_count, None);
        assert!(created.liked_member_ids.is_empty());

        let fetched = svc.get_petition_by_id(created.id.unwrap()).await.unwrap();
        assert_eq!(fetched.title, "T1");
        assert_eq!(fetched.category, Category::Education);
    }

    #[tokio::test]
    async fn create_rejects_unknown_member() {
        let svc = service();
        let mut req = input("T", "https://p/1");
        req.member_id = 999;

        let err = svc.create_petition(req).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 999, .. }));
    }

    #[tokio::test]
    async fn create_rejects_inverted_dates() {
        let svc = service();
        let mut req = input("T", "https://p/1");
        req.end_date = req.start_date - ChronoDuration::days(1);

        let err = svc.create_petition(req).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let svc = service();
        let mut req = input("  ", "https://p/1");
        req.title = "   ".to_string();

        let err = svc.create_petition(req).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_url() {
        let svc = service();
        svc.create_petition(input("T1", "https://p/1")).await.unwrap();

        let err = svc
            .create_petition(input("T2", "https://p/1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[tokio::test]
    async fn toggle_like_pair_is_idempotent() {
        let svc = service();
        let id = svc
            .create_petition(input("T1", "https://p/1"))
            .await
            .unwrap()
            .id
            .unwrap();

        let first = svc.toggle_like_on_petition(id, 42).await.unwrap();
        assert_eq!(first, LikeStatus::Liked);
        assert_eq!(first.to_string(), "liked");

        let after_first = svc.get_petition_by_id(id).await.unwrap();
        assert_eq!(after_first.likes_count, 1);
        assert!(after_first.liked_member_ids.contains(&42));

        let second = svc.toggle_like_on_petition(id, 42).await.unwrap();
        assert_eq!(second, LikeStatus::Unliked);
        assert_eq!(second.to_string(), "unliked");

        let after_second = svc.get_petition_by_id(id).await.unwrap();
        assert_eq!(after_second.likes_count, 0);
        assert!(after_second.liked_member_ids.is_empty());
    }

    #[tokio::test]
    async fn toggle_like_on_missing_petition_is_not_found() {
        let svc = service();
        let err = svc.toggle_like_on_petition(12345, 42).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let svc = service();
        svc.create_petition(input("Please vote on this", "https://p/1"))
            .await
            .unwrap();

        let hits = svc.search_petitions_by_title("VOTE").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Please vote on this");
    }

    #[tokio::test]
    async fn search_rejects_blank_query() {
        let svc = service();
        let err = svc.search_petitions_by_title("   ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn ongoing_list_excludes_expired() {
        let svc = service();
        svc.create_petition(input("Fresh", "https://p/1")).await.unwrap();

        let today = Utc::now().date_naive();
        let mut stale = input("Stale", "https://p/2");
        stale.start_date = today - ChronoDuration::days(40);
        stale.end_date = today - ChronoDuration::days(10);
        svc.create_petition(stale).await.unwrap();

        let page = svc
            .get_ongoing_petitions(PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_items, 1);
        assert!(page.items.iter().all(|p| p.end_date >= today));
    }

    #[tokio::test]
    async fn end_date_view_is_sorted_and_capped() {
        let svc = service();
        let today = Utc::now().date_naive();
        for i in 0..7 {
            let mut req = input(&format!("P{i}"), &format!("https://p/{i}"));
            req.end_date = today + ChronoDuration::days(30 - i);
            svc.create_petition(req).await.unwrap();
        }

        let view = svc.end_date_petitions().await.unwrap();
        assert_eq!(view.len(), 5);
        assert!(view.windows(2).all(|w| w[0].end_date <= w[1].end_date));
    }

    #[tokio::test]
    async fn likes_view_is_sorted_descending() {
        let svc = service();
        let mut ids = Vec::new();
        for i in 0..3 {
            let id = svc
                .create_petition(input(&format!("P{i}"), &format!("https://p/{i}")))
                .await
                .unwrap()
                .id
                .unwrap();
            ids.push(id);
        }
        // P2 gets two likes, P1 one, P0 none.
        svc.toggle_like_on_petition(ids[2], 1).await.unwrap();
        svc.toggle_like_on_petition(ids[2], 2).await.unwrap();
        svc.toggle_like_on_petition(ids[1], 1).await.unwrap();

        let view = svc.likes_count_petitions().await.unwrap();
        assert_eq!(
            view.iter().map(|p| p.id.unwrap()).collect::<Vec<_>>(),
            vec![ids[2], ids[1], ids[0]]
        );
    }

    #[tokio::test]
    async fn update_replaces_fields_but_keeps_likes() {
        let svc = service();
        let id = svc
            .create_petition(input("Before", "https://p/1"))
            .await
            .unwrap()
            .id
            .unwrap();
        svc.toggle_like_on_petition(id, 42).await.unwrap();

        let mut req = input("After", "https://p/1-moved");
        req.category = Category::Welfare;
        let updated = svc.update_petition(id, req).await.unwrap();

        assert_eq!(updated.title, "After");
        assert_eq!(updated.category, Category::Welfare);
        assert_eq!(updated.likes_count, 1);
        assert!(updated.liked_member_ids.contains(&42));
    }

    #[tokio::test]
    async fn update_missing_petition_is_not_found() {
        let svc = service();
        let err = svc
            .update_petition(12345, input("T", "https://p/1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_is_not_a_silent_noop() {
        let svc = service();
        let id = svc
            .create_petition(input("T1", "https://p/1"))
            .await
            .unwrap()
            .id
            .unwrap();

        svc.delete_petition_by_id(id).await.unwrap();
        let err = svc.get_petition_by_id(id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let err = svc.delete_petition_by_id(id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn increased_view_orders_by_delta() {
        let svc = service();
        let mut ids = Vec::new();
        for i in 0..3 {
            let id = svc
                .create_petition(input(&format!("P{i}"), &format!("https://p/{i}")))
                .await
                .unwrap()
                .id
                .unwrap();
            ids.push(id);
        }

        // Simulate the external agreement sync writing counters directly.
        let repo = svc.petitions.clone();
        for (id, (prev, current)) in ids.iter().zip([(100, 110), (0, 500), (50, 250)]) {
            let mut p = repo.find_by_id(*id).await.unwrap().unwrap();
            p.previous_agree_count = prev;
            p.agree_count = Some(current);
            repo.save(p).await.unwrap();
        }

        let view = svc.increased_agree_count_petitions().await.unwrap();
        // ids[1] has no baseline so it is excluded; ids[2] delta 200 > ids[0] delta 10.
        assert_eq!(
            view.iter().map(|p| p.id.unwrap()).collect::<Vec<_>>(),
            vec![ids[2], ids[0]]
        );
    }

    #[tokio::test]
    async fn repeat_get_is_served_from_cache() {
        let cache = Arc::new(RecordingCache::new());
        let svc = service_with_cache(cache.clone());
        let id = svc
            .create_petition(input("Original", "https://p/1"))
            .await
            .unwrap()
            .id
            .unwrap();

        let first = svc.get_petition_by_id(id).await.unwrap();
        assert_eq!(first.title, "Original");

        // Change the stored row behind the cache's back.
        let mut row = svc.petitions.find_by_id(id).await.unwrap().unwrap();
        row.title = "Changed".to_string();
        svc.petitions.save(row).await.unwrap();

        let second = svc.get_petition_by_id(id).await.unwrap();
        assert_eq!(second.title, "Original");
    }

    #[tokio::test]
    async fn like_toggle_clears_cached_petition_keys() {
        let cache = Arc::new(RecordingCache::new());
        let svc = service_with_cache(cache.clone());
        let id = svc
            .create_petition(input("T1", "https://p/1"))
            .await
            .unwrap()
            .id
            .unwrap();

        svc.get_petition_by_id(id).await.unwrap();
        svc.get_ongoing_petitions(PageRequest::default()).await.unwrap();
        assert!(cache.keys().iter().any(|k| k.starts_with(CACHE_PREFIX)));

        svc.toggle_like_on_petition(id, 42).await.unwrap();
        assert!(cache.keys().iter().all(|k| !k.starts_with(CACHE_PREFIX)));

        // The next read sees the new like state, not a stale entry.
        let fresh = svc.get_petition_by_id(id).await.unwrap();
        assert_eq!(fresh.likes_count, 1);
    }

    #[tokio::test]
    async fn random_sample_never_touches_the_cache() {
        let cache = Arc::new(RecordingCache::new());
        let svc = service_with_cache(cache.clone());
        svc.create_petition(input("T1", "https://p/1")).await.unwrap();

        let reads_before = cache.read_count();
        let sample = svc
            .get_random_category_petitions(Category::Education)
            .await
            .unwrap();

        assert_eq!(sample.len(), 1);
        assert_eq!(cache.read_count(), reads_before);
        assert!(cache.keys().is_empty());
    }
}
