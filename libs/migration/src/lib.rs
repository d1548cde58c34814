pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_customers;
mod m20250301_000002_create_resources;
mod m20250301_000003_create_customer_resource;
mod m20250301_000004_create_notifications;
mod m20250302_000001_seed_resources;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_customers::Migration),
            Box::new(m20250301_000002_create_resources::Migration),
            Box::new(m20250301_000003_create_customer_resource::Migration),
            Box::new(m20250301_000004_create_notifications::Migration),
            Box::new(m20250302_000001_seed_resources::Migration),
        ]
    }
}
