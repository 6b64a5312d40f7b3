//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, ExprTrait, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use agora_core::domain::{Category, Member, Page, PageRequest, Petition};
use agora_core::error::RepoError;
use agora_core::ports::{MemberRepository, PetitionRepository};

use super::entity::member::{self, Entity as MemberEntity};
use super::entity::petition::{self, Entity as PetitionEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL petition repository.
pub type PostgresPetitionRepository = PostgresBaseRepository<PetitionEntity>;

/// PostgreSQL member repository.
pub type PostgresMemberRepository = PostgresBaseRepository<MemberEntity>;

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// LIKE wildcards in user input must match literally.
fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn query_err(e: sea_orm::DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

#[async_trait]
impl PetitionRepository for PostgresPetitionRepository {
    async fn find_ongoing(&self, page: PageRequest) -> Result<Page<Petition>, RepoError> {
        let paginator = PetitionEntity::find()
            .filter(petition::Column::EndDate.gte(today()))
            .order_by_asc(petition::Column::Id)
            .paginate(&self.db, page.size);

        let total = paginator.num_items().await.map_err(query_err)?;
        let models = paginator.fetch_page(page.page).await.map_err(query_err)?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }

    async fn find_ongoing_by_category(
        &self,
        page: PageRequest,
        category: Category,
    ) -> Result<Page<Petition>, RepoError> {
        let paginator = PetitionEntity::find()
            .filter(petition::Column::Category.eq(petition::Category::from(category)))
            .filter(petition::Column::EndDate.gte(today()))
            .order_by_asc(petition::Column::Id)
            .paginate(&self.db, page.size);

        let total = paginator.num_items().await.map_err(query_err)?;
        let models = paginator.fetch_page(page.page).await.map_err(query_err)?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }

    async fn count_by_url(&self, url: &str) -> Result<u64, RepoError> {
        PetitionEntity::find()
            .filter(petition::Column::OriginalUrl.eq(url))
            .count(&self.db)
            .await
            .map_err(query_err)
    }

    async fn find_soonest_ending(&self, limit: u64) -> Result<Vec<Petition>, RepoError> {
        let models = PetitionEntity::find()
            .filter(petition::Column::EndDate.gte(today()))
            .order_by_asc(petition::Column::EndDate)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_most_liked(&self, limit: u64) -> Result<Vec<Petition>, RepoError> {
        let models = PetitionEntity::find()
            .filter(petition::Column::EndDate.gte(today()))
            .order_by_desc(petition::Column::LikesCount)
            .order_by_asc(petition::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_random_in_category(
        &self,
        category: Category,
        limit: u64,
    ) -> Result<Vec<Petition>, RepoError> {
        let models = PetitionEntity::find()
            .filter(petition::Column::Category.eq(petition::Category::from(category)))
            .filter(petition::Column::EndDate.gte(today()))
            .order_by(SimpleExpr::FunctionCall(Func::random()), Order::Asc)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_title_containing(&self, needle: &str) -> Result<Vec<Petition>, RepoError> {
        let pattern = format!("%{}%", escape_like(needle));
        let models = PetitionEntity::find()
            .filter(Expr::col(petition::Column::Title).ilike(pattern))
            .order_by_asc(petition::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_with_increased_agree_count(
        &self,
        limit: u64,
    ) -> Result<Vec<Petition>, RepoError> {
        let delta = Expr::col(petition::Column::AgreeCount)
            .sub(Expr::col(petition::Column::PreviousAgreeCount));

        let models = PetitionEntity::find()
            .filter(petition::Column::EndDate.gte(today()))
            .filter(petition::Column::PreviousAgreeCount.gt(0))
            .filter(delta.clone().gt(0))
            .order_by(delta, Order::Desc)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, RepoError> {
        let result = MemberEntity::find()
            .filter(member::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("100%_done\\"), "100\\%\\_done\\\\");
    }
}
