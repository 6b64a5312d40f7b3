//! Member entity for SeaORM.

use sea_orm::ActiveValue::NotSet;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use agora_core::domain;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::petition::Entity")]
    Petition,
}

impl Related<super::petition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Petition.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for domain::Member {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            email: model.email,
            password_hash: model.password_hash,
            role: model.role,
            created_at: model.created_at.into(),
        }
    }
}

impl From<domain::Member> for ActiveModel {
    fn from(member: domain::Member) -> Self {
        Self {
            id: match member.id {
                Some(id) => Set(id),
                None => NotSet,
            },
            email: Set(member.email),
            password_hash: Set(member.password_hash),
            role: Set(member.role),
            created_at: Set(member.created_at.into()),
        }
    }
}
