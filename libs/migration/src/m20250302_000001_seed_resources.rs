use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO resources (name, type, region)
            VALUES
                ('aws_vpc_main', 'VPC', 'us-east-1'),
                ('gcp_vm_instance', 'Compute', 'us-central1'),
                ('azure_sql_db', 'Database', 'eastus')
            ON CONFLICT (name) DO NOTHING
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "DELETE FROM resources WHERE name IN ('aws_vpc_main', 'gcp_vm_instance', 'azure_sql_db')",
            )
            .await?;

        Ok(())
    }
}
