use sea_orm_migration::prelude::*;

/// Creates the `visitor` table holding per-IP, per-page visit counters.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Visitor {
    Table,
    VisitorKey,
    Ip,
    PageId,
    Visits,
    Source,
    Confidence,
    Environment,
    AlternativeIps,
    FirstSeenAt,
    LastSeenAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Visitor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Visitor::VisitorKey)
                            .string_len(128)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Visitor::Ip).string_len(64).not_null())
                    .col(ColumnDef::new(Visitor::PageId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Visitor::Visits)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Visitor::Source).string_len(64).not_null())
                    .col(ColumnDef::new(Visitor::Confidence).integer().not_null())
                    .col(
                        ColumnDef::new(Visitor::Environment)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Visitor::AlternativeIps).text().not_null())
                    .col(
                        ColumnDef::new(Visitor::FirstSeenAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Visitor::LastSeenAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_visitor_page_id")
                    .table(Visitor::Table)
                    .col(Visitor::PageId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Visitor::Table).to_owned())
            .await
    }
}
