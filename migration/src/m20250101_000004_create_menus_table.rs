use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Menus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Menus::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Menus::Path)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Menus::ParentId).string_len(64).null())
                    .col(ColumnDef::new(Menus::Name).string_len(100).null())
                    .col(ColumnDef::new(Menus::Icon).string_len(100).null())
                    .col(ColumnDef::new(Menus::Component).string_len(255).null())
                    .col(ColumnDef::new(Menus::Redirect).string_len(255).null())
                    .col(
                        ColumnDef::new(Menus::Layout)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Menus::Exact).boolean().null())
                    .col(ColumnDef::new(Menus::SortOrder).integer().null())
                    .col(
                        ColumnDef::new(Menus::HideInMenu)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Menus::HideChildrenInMenu)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Menus::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Menus::Authority).json().not_null())
                    .col(
                        ColumnDef::new(Menus::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Menus::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Menus::CreatedBy).string_len(64).null())
                    .col(ColumnDef::new(Menus::UpdatedBy).string_len(64).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_menus_parent_id")
                    .table(Menus::Table)
                    .col(Menus::ParentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Menus::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Menus {
    Table,
    Id,
    Path,
    ParentId,
    Name,
    Icon,
    Component,
    Redirect,
    Layout,
    Exact,
    SortOrder,
    HideInMenu,
    HideChildrenInMenu,
    IsActive,
    Authority,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
}
