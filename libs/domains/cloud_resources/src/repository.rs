use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    error::{CloudResourceError, CloudResourceResult},
    models::{CloudResource, UpdateCloudResource},
};

/// Persistence port for the catalog and customer assignments
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CloudResourceRepository: Send + Sync {
    async fn get_all(&self) -> CloudResourceResult<Vec<CloudResource>>;

    async fn get_by_id(&self, id: i64) -> CloudResourceResult<Option<CloudResource>>;

    async fn get_by_name(&self, name: &str) -> CloudResourceResult<Option<CloudResource>>;

    /// Replace name, type and region. `NotFound` if absent, `DuplicateName`
    /// if the new name belongs to another entry.
    async fn update(
        &self,
        id: i64,
        input: UpdateCloudResource,
    ) -> CloudResourceResult<CloudResource>;

    /// `NotFound` if absent. Assignments of the resource go with it.
    async fn delete(&self, id: i64) -> CloudResourceResult<()>;

    /// Link the named catalog entry to the customer.
    ///
    /// `UnknownResource` if no entry has that name; `AlreadyAssigned` when the
    /// link exists, whichever writer got there first.
    async fn add_resource_to_customer(
        &self,
        name: &str,
        customer_id: i64,
    ) -> CloudResourceResult<CloudResource>;

    /// All-or-nothing version of `add_resource_to_customer`
    async fn add_resources_to_customer(
        &self,
        names: &[String],
        customer_id: i64,
    ) -> CloudResourceResult<Vec<CloudResource>>;

    async fn get_resources_by_customer(
        &self,
        customer_id: i64,
    ) -> CloudResourceResult<Vec<CloudResource>>;

    async fn does_customer_have_resource(
        &self,
        customer_id: i64,
        name: &str,
    ) -> CloudResourceResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    resources: BTreeMap<i64, CloudResource>,
    /// (customer_id, resource_id) in assignment order
    assignments: Vec<(i64, i64)>,
}

impl Store {
    fn find_by_name(&self, name: &str) -> Option<&CloudResource> {
        self.resources.values().find(|r| r.name == name)
    }

    fn is_assigned(&self, customer_id: i64, resource_id: i64) -> bool {
        self.assignments.contains(&(customer_id, resource_id))
    }
}

/// In-memory implementation of CloudResourceRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCloudResourceRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryCloudResourceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository holding the same three entries the seed migration inserts
    pub async fn with_default_catalog() -> Self {
        let repo = Self::new();
        for (name, resource_type, region) in [
            ("aws_vpc_main", "VPC", "us-east-1"),
            ("gcp_vm_instance", "Compute", "us-central1"),
            ("azure_sql_db", "Database", "eastus"),
        ] {
            repo.insert_resource(name, resource_type, region).await;
        }
        repo
    }

    /// Add a catalog entry; an existing name is returned unchanged
    pub async fn insert_resource(
        &self,
        name: &str,
        resource_type: &str,
        region: &str,
    ) -> CloudResource {
        let mut store = self.store.write().await;
        if let Some(existing) = store.find_by_name(name) {
            return existing.clone();
        }

        store.next_id += 1;
        let now = Utc::now();
        let resource = CloudResource {
            id: store.next_id,
            name: name.to_string(),
            resource_type: resource_type.to_string(),
            region: region.to_string(),
            created_at: now,
            updated_at: now,
        };
        store.resources.insert(resource.id, resource.clone());
        resource
    }
}

#[async_trait]
impl CloudResourceRepository for InMemoryCloudResourceRepository {
    async fn get_all(&self) -> CloudResourceResult<Vec<CloudResource>> {
        Ok(self.store.read().await.resources.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> CloudResourceResult<Option<CloudResource>> {
        Ok(self.store.read().await.resources.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> CloudResourceResult<Option<CloudResource>> {
        Ok(self.store.read().await.find_by_name(name).cloned())
    }

    async fn update(
        &self,
        id: i64,
        input: UpdateCloudResource,
    ) -> CloudResourceResult<CloudResource> {
        let mut store = self.store.write().await;

        if store
            .resources
            .values()
            .any(|r| r.id != id && r.name == input.name)
        {
            return Err(CloudResourceError::DuplicateName(input.name));
        }

        let resource = store
            .resources
            .get_mut(&id)
            .ok_or(CloudResourceError::NotFound(id))?;
        resource.name = input.name;
        resource.resource_type = input.resource_type;
        resource.region = input.region;
        resource.updated_at = Utc::now();
        Ok(resource.clone())
    }

    async fn delete(&self, id: i64) -> CloudResourceResult<()> {
        let mut store = self.store.write().await;
        if store.resources.remove(&id).is_none() {
            return Err(CloudResourceError::NotFound(id));
        }
        store.assignments.retain(|(_, resource_id)| *resource_id != id);
        Ok(())
    }

    async fn add_resource_to_customer(
        &self,
        name: &str,
        customer_id: i64,
    ) -> CloudResourceResult<CloudResource> {
        let mut store = self.store.write().await;

        let resource = store
            .find_by_name(name)
            .cloned()
            .ok_or_else(|| CloudResourceError::UnknownResource(name.to_string()))?;
        if store.is_assigned(customer_id, resource.id) {
            return Err(CloudResourceError::AlreadyAssigned(name.to_string()));
        }

        store.assignments.push((customer_id, resource.id));
        Ok(resource)
    }

    async fn add_resources_to_customer(
        &self,
        names: &[String],
        customer_id: i64,
    ) -> CloudResourceResult<Vec<CloudResource>> {
        let mut store = self.store.write().await;

        // Validate the whole batch before touching the store
        let mut staged = BTreeSet::new();
        let mut added = Vec::with_capacity(names.len());
        for name in names {
            let resource = store
                .find_by_name(name)
                .cloned()
                .ok_or_else(|| CloudResourceError::UnknownResource(name.clone()))?;
            if store.is_assigned(customer_id, resource.id) || !staged.insert(resource.id) {
                return Err(CloudResourceError::AlreadyAssigned(name.clone()));
            }
            added.push(resource);
        }

        store
            .assignments
            .extend(added.iter().map(|r| (customer_id, r.id)));
        Ok(added)
    }

    async fn get_resources_by_customer(
        &self,
        customer_id: i64,
    ) -> CloudResourceResult<Vec<CloudResource>> {
        let store = self.store.read().await;
        Ok(store
            .assignments
            .iter()
            .filter(|(cid, _)| *cid == customer_id)
            .filter_map(|(_, rid)| store.resources.get(rid).cloned())
            .collect())
    }

    async fn does_customer_have_resource(
        &self,
        customer_id: i64,
        name: &str,
    ) -> CloudResourceResult<bool> {
        let store = self.store.read().await;
        Ok(store
            .find_by_name(name)
            .is_some_and(|r| store.is_assigned(customer_id, r.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(resources: &[CloudResource]) -> Vec<&str> {
        resources.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_assignment_is_unique_per_customer() {
        let repo = InMemoryCloudResourceRepository::with_default_catalog().await;

        repo.add_resource_to_customer("aws_vpc_main", 1).await.unwrap();
        let err = repo
            .add_resource_to_customer("aws_vpc_main", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, CloudResourceError::AlreadyAssigned(_)));

        // A different customer can still take it
        repo.add_resource_to_customer("aws_vpc_main", 2).await.unwrap();
        assert!(repo.does_customer_have_resource(2, "aws_vpc_main").await.unwrap());
        assert!(!repo.does_customer_have_resource(2, "azure_sql_db").await.unwrap());
    }

    #[tokio::test]
    async fn test_bulk_add_is_all_or_nothing() {
        let repo = InMemoryCloudResourceRepository::with_default_catalog().await;

        let err = repo
            .add_resources_to_customer(&["aws_vpc_main".into(), "missing".into()], 1)
            .await
            .unwrap_err();
        assert!(matches!(err, CloudResourceError::UnknownResource(ref n) if n == "missing"));
        assert!(repo.get_resources_by_customer(1).await.unwrap().is_empty());

        let err = repo
            .add_resources_to_customer(&["azure_sql_db".into(), "azure_sql_db".into()], 1)
            .await
            .unwrap_err();
        assert!(matches!(err, CloudResourceError::AlreadyAssigned(_)));
        assert!(repo.get_resources_by_customer(1).await.unwrap().is_empty());

        let added = repo
            .add_resources_to_customer(&["gcp_vm_instance".into(), "aws_vpc_main".into()], 1)
            .await
            .unwrap();
        assert_eq!(names(&added), vec!["gcp_vm_instance", "aws_vpc_main"]);
        assert_eq!(
            names(&repo.get_resources_by_customer(1).await.unwrap()),
            vec!["gcp_vm_instance", "aws_vpc_main"]
        );
    }

    #[tokio::test]
    async fn test_update_rejects_taken_name() {
        let repo = InMemoryCloudResourceRepository::with_default_catalog().await;
        let vpc = repo.get_by_name("aws_vpc_main").await.unwrap().unwrap();

        let err = repo
            .update(
                vpc.id,
                UpdateCloudResource {
                    name: "azure_sql_db".into(),
                    resource_type: "VPC".into(),
                    region: "us-east-1".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CloudResourceError::DuplicateName(_)));

        // Keeping its own name is fine
        let updated = repo
            .update(
                vpc.id,
                UpdateCloudResource {
                    name: "aws_vpc_main".into(),
                    resource_type: "VPC".into(),
                    region: "eu-west-1".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.region, "eu-west-1");
    }

    #[tokio::test]
    async fn test_delete_cascades_assignments() {
        let repo = InMemoryCloudResourceRepository::with_default_catalog().await;
        let vpc = repo.add_resource_to_customer("aws_vpc_main", 1).await.unwrap();

        repo.delete(vpc.id).await.unwrap();
        assert!(repo.get_resources_by_customer(1).await.unwrap().is_empty());
        assert!(matches!(
            repo.delete(vpc.id).await.unwrap_err(),
            CloudResourceError::NotFound(_)
        ));
    }
}
