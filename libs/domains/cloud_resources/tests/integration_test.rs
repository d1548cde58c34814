//! Integration tests for the cloud resources domain
//!
//! Real PostgreSQL via testcontainers, with the seed catalog applied by the
//! migrator.

use domain_cloud_resources::*;
use domain_customers::PgCustomerRepository;
use test_utils::{TestDataBuilder, TestDatabase};

fn names(resources: &[CloudResource]) -> Vec<&str> {
    resources.iter().map(|r| r.name.as_str()).collect()
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_seed_catalog_is_available() {
    let db = TestDatabase::new().await;
    let repo = PgCloudResourceRepository::new(db.connection());

    let catalog = repo.get_all().await.unwrap();
    assert_eq!(
        names(&catalog),
        vec!["aws_vpc_main", "gcp_vm_instance", "azure_sql_db"]
    );
    assert_eq!(catalog[0].resource_type, "VPC");
    assert_eq!(catalog[0].region, "us-east-1");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_unique_index_rejects_second_assignment() {
    let db = TestDatabase::new().await;
    let repo = PgCloudResourceRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("second_assignment");
    let customer_id = db.insert_customer("ebuka", &builder.email("ebuka")).await;

    repo.add_resource_to_customer("aws_vpc_main", customer_id)
        .await
        .unwrap();
    assert!(repo
        .does_customer_have_resource(customer_id, "aws_vpc_main")
        .await
        .unwrap());

    // Skips the service pre-check, as a concurrent request would
    let err = repo
        .add_resource_to_customer("aws_vpc_main", customer_id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "customer already has aws_vpc_main resource");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_bulk_assignment_rolls_back() {
    let db = TestDatabase::new().await;
    let repo = PgCloudResourceRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("bulk_rollback");
    let customer_id = db.insert_customer("a", &builder.email("a")).await;

    let err = repo
        .add_resources_to_customer(
            &["aws_vpc_main".to_string(), "oracle_db".to_string()],
            customer_id,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CloudResourceError::UnknownResource(_)));
    assert!(repo
        .get_resources_by_customer(customer_id)
        .await
        .unwrap()
        .is_empty());

    let added = repo
        .add_resources_to_customer(
            &["gcp_vm_instance".to_string(), "azure_sql_db".to_string()],
            customer_id,
        )
        .await
        .unwrap();
    assert_eq!(names(&added), vec!["gcp_vm_instance", "azure_sql_db"]);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_and_delete_against_postgres() {
    let db = TestDatabase::new().await;
    let repo = PgCloudResourceRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_delete");
    let customer_id = db.insert_customer("a", &builder.email("a")).await;

    let service = CloudResourceService::new(
        repo.clone(),
        PgCustomerRepository::new(db.connection()),
    );

    let vpc = service
        .add_cloud_resource(customer_id, "aws_vpc_main")
        .await
        .unwrap();

    let err = service
        .update_resource(vpc.id, "azure_sql_db", "VPC", "us-east-1")
        .await
        .unwrap_err();
    assert!(matches!(err, CloudResourceError::DuplicateName(_)));

    let renamed = builder.resource_name("vpc");
    let updated = service
        .update_resource(vpc.id, &renamed, "VPC", "us-east-2")
        .await
        .unwrap();
    assert_eq!(updated.name, renamed);

    service.delete_resource(vpc.id).await.unwrap();
    assert!(service
        .get_resources_by_customer(customer_id)
        .await
        .unwrap()
        .is_empty());
}
