use domain_customers::CustomerRepository;
use domain_notifications::{NotificationEvent, NotificationPublisher};
use std::sync::Arc;

use crate::{
    error::{CloudResourceError, CloudResourceResult},
    models::{CloudResource, UpdateCloudResource},
    repository::CloudResourceRepository,
};

/// Resource assignment and catalog maintenance.
///
/// Successful assignments publish one notification per resource through the
/// optional publisher. Publishing never fails the assignment.
pub struct CloudResourceService<R, C>
where
    R: CloudResourceRepository,
    C: CustomerRepository,
{
    resources: Arc<R>,
    customers: Arc<C>,
    publisher: Option<Arc<dyn NotificationPublisher>>,
}

fn require(value: &str, message: &str) -> CloudResourceResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CloudResourceError::Validation(message.to_string()));
    }
    Ok(value.to_string())
}

impl<R, C> CloudResourceService<R, C>
where
    R: CloudResourceRepository,
    C: CustomerRepository,
{
    pub fn new(resources: R, customers: C) -> Self {
        Self {
            resources: Arc::new(resources),
            customers: Arc::new(customers),
            publisher: None,
        }
    }

    pub fn with_publisher(mut self, publisher: Arc<dyn NotificationPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    async fn ensure_customer(&self, customer_id: i64) -> CloudResourceResult<()> {
        match self.customers.get_by_id(customer_id).await? {
            Some(_) => Ok(()),
            None => Err(CloudResourceError::CustomerNotFound(customer_id)),
        }
    }

    async fn notify_added(&self, customer_id: i64, resource_name: &str) {
        let Some(publisher) = &self.publisher else {
            return;
        };

        let event = NotificationEvent::new(
            customer_id,
            format!(
                "added resource {} for customer with customerID {}",
                resource_name, customer_id
            ),
        );
        if let Err(e) = publisher.publish(&event).await {
            tracing::warn!(
                error = %e,
                customer_id,
                resource = resource_name,
                "Failed to publish assignment notification"
            );
        }
    }

    pub async fn get_all_available_resources(&self) -> CloudResourceResult<Vec<CloudResource>> {
        self.resources.get_all().await
    }

    pub async fn add_cloud_resource(
        &self,
        customer_id: i64,
        resource_name: &str,
    ) -> CloudResourceResult<CloudResource> {
        self.ensure_customer(customer_id).await?;
        let name = require(resource_name, "no resource name provided")?;

        if self
            .resources
            .does_customer_have_resource(customer_id, &name)
            .await?
        {
            return Err(CloudResourceError::AlreadyAssigned(name));
        }

        let resource = self
            .resources
            .add_resource_to_customer(&name, customer_id)
            .await?;

        tracing::info!(customer_id, resource = %resource.name, "Assigned resource");
        self.notify_added(customer_id, &resource.name).await;
        Ok(resource)
    }

    pub async fn add_cloud_resources(
        &self,
        customer_id: i64,
        resource_names: &[String],
    ) -> CloudResourceResult<Vec<CloudResource>> {
        self.ensure_customer(customer_id).await?;
        if resource_names.is_empty() {
            return Err(CloudResourceError::Validation(
                "no resource names provided".to_string(),
            ));
        }
        let names = resource_names
            .iter()
            .map(|name| require(name, "no resource name provided"))
            .collect::<CloudResourceResult<Vec<_>>>()?;

        let added = self
            .resources
            .add_resources_to_customer(&names, customer_id)
            .await?;

        tracing::info!(customer_id, count = added.len(), "Assigned resources");
        for resource in &added {
            self.notify_added(customer_id, &resource.name).await;
        }
        Ok(added)
    }

    pub async fn get_resources_by_customer(
        &self,
        customer_id: i64,
    ) -> CloudResourceResult<Vec<CloudResource>> {
        self.ensure_customer(customer_id).await?;
        self.resources.get_resources_by_customer(customer_id).await
    }

    pub async fn update_resource(
        &self,
        id: i64,
        name: &str,
        resource_type: &str,
        region: &str,
    ) -> CloudResourceResult<CloudResource> {
        let input = UpdateCloudResource {
            name: require(name, "name cannot be empty")?,
            resource_type: require(resource_type, "type cannot be empty")?,
            region: require(region, "region cannot be empty")?,
        };

        if self.resources.get_by_id(id).await?.is_none() {
            return Err(CloudResourceError::NotFound(id));
        }

        let updated = self.resources.update(id, input).await?;
        tracing::info!(resource_id = id, "Updated resource");
        Ok(updated)
    }

    pub async fn delete_resource(&self, id: i64) -> CloudResourceResult<()> {
        if self.resources.get_by_id(id).await?.is_none() {
            return Err(CloudResourceError::NotFound(id));
        }
        self.resources.delete(id).await?;
        tracing::info!(resource_id = id, "Deleted resource");
        Ok(())
    }
}
