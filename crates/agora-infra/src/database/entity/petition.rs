//! Petition entity for SeaORM.

use std::collections::BTreeSet;

use sea_orm::ActiveValue::NotSet;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use agora_core::domain;

/// Category stored as its SCREAMING_SNAKE_CASE name, matching the domain
/// enum's serde representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Category {
    #[sea_orm(string_value = "POLITICS")]
    Politics,
    #[sea_orm(string_value = "INVESTIGATION")]
    Investigation,
    #[sea_orm(string_value = "FINANCE")]
    Finance,
    #[sea_orm(string_value = "EDUCATION")]
    Education,
    #[sea_orm(string_value = "DIPLOMACY")]
    Diplomacy,
    #[sea_orm(string_value = "ADMINISTRATION")]
    Administration,
    #[sea_orm(string_value = "CULTURE")]
    Culture,
    #[sea_orm(string_value = "HEALTHCARE")]
    Healthcare,
    #[sea_orm(string_value = "WELFARE")]
    Welfare,
    #[sea_orm(string_value = "HUMAN_RIGHTS")]
    HumanRights,
    #[sea_orm(string_value = "OTHERS")]
    Others,
}

impl From<domain::Category> for Category {
    fn from(c: domain::Category) -> Self {
        match c {
            domain::Category::Politics => Category::Politics,
            domain::Category::Investigation => Category::Investigation,
            domain::Category::Finance => Category::Finance,
            domain::Category::Education => Category::Education,
            domain::Category::Diplomacy => Category::Diplomacy,
            domain::Category::Administration => Category::Administration,
            domain::Category::Culture => Category::Culture,
            domain::Category::Healthcare => Category::Healthcare,
            domain::Category::Welfare => Category::Welfare,
            domain::Category::HumanRights => Category::HumanRights,
            domain::Category::Others => Category::Others,
        }
    }
}

impl From<Category> for domain::Category {
    fn from(c: Category) -> Self {
        match c {
            Category::Politics => domain::Category::Politics,
            Category::Investigation => domain::Category::Investigation,
            Category::Finance => domain::Category::Finance,
            Category::Education => domain::Category::Education,
            Category::Diplomacy => domain::Category::Diplomacy,
            Category::Administration => domain::Category::Administration,
            Category::Culture => domain::Category::Culture,
            Category::Healthcare => domain::Category::Healthcare,
            Category::Welfare => domain::Category::Welfare,
            Category::HumanRights => domain::Category::HumanRights,
            Category::Others => domain::Category::Others,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "petitions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub member_id: i64,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub category: Category,
    #[sea_orm(unique)]
    pub original_url: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub related_news: Option<String>,
    pub likes_count: i32,
    pub interest_count: i32,
    pub agree_count: Option<i32>,
    pub previous_agree_count: i32,
    /// JSON array of member ids, so the like toggle stays a single-row write.
    pub liked_member_ids: Json,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Member,
    #[sea_orm(has_many = "super::news::Entity")]
    News,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl Related<super::news::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::News.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Petition.
impl From<Model> for domain::Petition {
    fn from(model: Model) -> Self {
        let liked_member_ids: BTreeSet<i64> =
            serde_json::from_value(model.liked_member_ids).unwrap_or_default();
        Self {
            id: Some(model.id),
            member_id: model.member_id,
            title: model.title,
            content: model.content,
            summary: model.summary,
            start_date: model.start_date,
            end_date: model.end_date,
            category: model.category.into(),
            original_url: model.original_url,
            related_news: model.related_news,
            likes_count: model.likes_count,
            interest_count: model.interest_count,
            agree_count: model.agree_count,
            previous_agree_count: model.previous_agree_count,
            liked_member_ids,
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from Domain Petition to SeaORM ActiveModel.
impl From<domain::Petition> for ActiveModel {
    fn from(petition: domain::Petition) -> Self {
        let liked = serde_json::to_value(&petition.liked_member_ids)
            .unwrap_or_else(|_| Json::Array(Vec::new()));
        Self {
            id: match petition.id {
                Some(id) => Set(id),
                None => NotSet,
            },
            member_id: Set(petition.member_id),
            title: Set(petition.title),
            content: Set(petition.content),
            summary: Set(petition.summary),
            start_date: Set(petition.start_date),
            end_date: Set(petition.end_date),
            category: Set(petition.category.into()),
            original_url: Set(petition.original_url),
            related_news: Set(petition.related_news),
            likes_count: Set(petition.likes_count),
            interest_count: Set(petition.interest_count),
            agree_count: Set(petition.agree_count),
            previous_agree_count: Set(petition.previous_agree_count),
            liked_member_ids: Set(liked),
            created_at: Set(petition.created_at.into()),
        }
    }
}
