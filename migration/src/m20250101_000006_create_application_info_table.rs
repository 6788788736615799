use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApplicationInfo::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ApplicationInfo::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ApplicationInfo::AppVersion)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApplicationInfo::DatabaseProvider)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApplicationInfo::DatabaseName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApplicationInfo::DatabaseVersion)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApplicationInfo::DatabaseMigration)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ApplicationInfo::CacheProvider)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApplicationInfo::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ApplicationInfo::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ApplicationInfo::CreatedBy).string_len(64).null())
                    .col(ColumnDef::new(ApplicationInfo::UpdatedBy).string_len(64).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApplicationInfo::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ApplicationInfo {
    Table,
    Id,
    AppVersion,
    DatabaseProvider,
    DatabaseName,
    DatabaseVersion,
    DatabaseMigration,
    CacheProvider,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
}
