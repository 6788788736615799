use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Settings::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Settings::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Settings::SettingType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Settings::Value).json().null())
                    .col(ColumnDef::new(Settings::Group).string_len(100).null())
                    .col(ColumnDef::new(Settings::Section).string_len(100).null())
                    .col(
                        ColumnDef::new(Settings::Public)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Settings::Hidden)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Settings::Sorter).integer().null())
                    .col(ColumnDef::new(Settings::Description).text().null())
                    .col(ColumnDef::new(Settings::Options).json().null())
                    .col(
                        ColumnDef::new(Settings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Settings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Settings::CreatedBy).string_len(64).null())
                    .col(ColumnDef::new(Settings::UpdatedBy).string_len(64).null())
                    .to_owned(),
            )
            .await?;

        // 缺省的 group / section 按空串参与唯一约束，NULL 不再彼此区分
        manager
            .get_connection()
            .execute_unprepared(
                r#"CREATE UNIQUE INDEX IF NOT EXISTS idx_settings_name_group_section
                   ON settings (name, COALESCE("group", ''), COALESCE(section, ''))"#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Settings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Settings {
    Table,
    Id,
    Name,
    SettingType,
    Value,
    Group,
    Section,
    Public,
    Hidden,
    Sorter,
    Description,
    Options,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
}
