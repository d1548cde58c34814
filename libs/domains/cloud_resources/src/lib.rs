//! Cloud Resources Domain
//!
//! The resource catalog and its many-to-many assignment to customers. This is
//! where the business rules live: a customer holds a given resource at most
//! once, bulk assignment is all-or-nothing, and every successful assignment
//! emits a best-effort notification.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /resources, /customers/{id}/resources
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌───────────────────────┐
//! │   Service   │ ───► │ NotificationPublisher │
//! └──────┬──────┘      └───────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← catalog + customer_resource edges
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_cloud_resources::{CloudResourceService, PgCloudResourceRepository, handlers};
//! use domain_customers::PgCustomerRepository;
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//!
//! let service = CloudResourceService::new(
//!     PgCloudResourceRepository::new(db.clone()),
//!     PgCustomerRepository::new(db),
//! );
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod customer_resource;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CloudResourceError, CloudResourceResult};
pub use models::{AddResource, AddResources, CloudResource, UpdateCloudResource};
pub use postgres::PgCloudResourceRepository;
pub use repository::{CloudResourceRepository, InMemoryCloudResourceRepository};
pub use service::CloudResourceService;
