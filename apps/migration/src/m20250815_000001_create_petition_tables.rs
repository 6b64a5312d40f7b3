use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Members::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Members::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Members::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Members::Role).string().not_null())
                    .col(
                        ColumnDef::new(Members::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Petitions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Petitions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Petitions::MemberId).big_integer().not_null())
                    .col(ColumnDef::new(Petitions::Title).text().not_null())
                    .col(ColumnDef::new(Petitions::Content).text().not_null())
                    .col(ColumnDef::new(Petitions::Summary).text())
                    .col(ColumnDef::new(Petitions::StartDate).date().not_null())
                    .col(ColumnDef::new(Petitions::EndDate).date().not_null())
                    .col(ColumnDef::new(Petitions::Category).text().not_null())
                    .col(
                        ColumnDef::new(Petitions::OriginalUrl)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Petitions::RelatedNews).text())
                    .col(
                        ColumnDef::new(Petitions::LikesCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Petitions::InterestCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Petitions::AgreeCount).integer())
                    .col(
                        ColumnDef::new(Petitions::PreviousAgreeCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Petitions::LikedMemberIds)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Petitions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_petitions_member_id")
                            .from(Petitions::Table, Petitions::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Every "ongoing" query filters on end_date
        manager
            .create_index(
                Index::create()
                    .name("idx_petitions_end_date")
                    .table(Petitions::Table)
                    .col(Petitions::EndDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(News::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(News::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(News::PetitionId).big_integer())
                    .col(ColumnDef::new(News::Title).text().not_null())
                    .col(ColumnDef::new(News::SourceUrl).string().not_null())
                    .col(
                        ColumnDef::new(News::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_news_petition_id")
                            .from(News::Table, News::PetitionId)
                            .to(Petitions::Table, Petitions::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(News::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Petitions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Members::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Members {
    Table,
    Id,
    Email,
    PasswordHash,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Petitions {
    Table,
    Id,
    MemberId,
    Title,
    Content,
    Summary,
    StartDate,
    EndDate,
    Category,
    OriginalUrl,
    RelatedNews,
    LikesCount,
    InterestCount,
    AgreeCount,
    PreviousAgreeCount,
    LikedMemberIds,
    CreatedAt,
}

#[derive(DeriveIden)]
enum News {
    Table,
    Id,
    PetitionId,
    Title,
    SourceUrl,
    CreatedAt,
}
