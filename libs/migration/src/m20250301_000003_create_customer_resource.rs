use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerResource::Table)
                    .if_not_exists()
                    .col(big_integer(CustomerResource::CustomerId))
                    .col(big_integer(CustomerResource::ResourceId))
                    .col(
                        timestamp_with_time_zone(CustomerResource::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(CustomerResource::CustomerId)
                            .col(CustomerResource::ResourceId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_resource_customer_id")
                            .from(CustomerResource::Table, CustomerResource::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_resource_resource_id")
                            .from(CustomerResource::Table, CustomerResource::ResourceId)
                            .to(Resources::Table, Resources::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups by resource for cascading deletes
        manager
            .create_index(
                Index::create()
                    .name("idx_customer_resource_resource_id")
                    .table(CustomerResource::Table)
                    .col(CustomerResource::ResourceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerResource::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CustomerResource {
    Table,
    CustomerId,
    ResourceId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Resources {
    Table,
    Id,
}
