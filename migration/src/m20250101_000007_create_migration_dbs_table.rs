use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MigrationDbs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MigrationDbs::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MigrationDbs::FileName)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(MigrationDbs::AppliedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MigrationDbs::DbProvider)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MigrationDbs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MigrationDbs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MigrationDbs::CreatedBy).string_len(64).null())
                    .col(ColumnDef::new(MigrationDbs::UpdatedBy).string_len(64).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MigrationDbs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MigrationDbs {
    Table,
    Id,
    FileName,
    AppliedAt,
    DbProvider,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
}
