//! Container fixtures and data helpers for the inventory test suites.
//!
//! Container-backed fixtures need Docker; tests using them are marked
//! `#[ignore]` and run with `cargo test -- --ignored`.
//!
//! | Feature | Fixture |
//! |---|---|
//! | `postgres` (default) | [`TestDatabase`]: migrated PostgreSQL |
//! | `redis` | [`TestRedis`]: Redis with stream support |
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestDatabase};
//!
//! #[tokio::test]
//! #[ignore] // Requires Docker
//! async fn assigns_resource() {
//!     let db = TestDatabase::new().await;
//!     let data = TestDataBuilder::from_test_name("assigns_resource");
//!     let customer_id = db.insert_customer("ebuka", &data.email("ebuka")).await;
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "redis")]
mod redis;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

#[cfg(feature = "redis")]
pub use redis::TestRedis;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Values for unique columns, derived from a per-test tag.
///
/// The same tag always yields the same values; different tags do not collide
/// when tests share a database.
pub struct TestDataBuilder {
    tag: u64,
}

impl TestDataBuilder {
    pub fn new(tag: u64) -> Self {
        Self { tag }
    }

    pub fn from_test_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Positive notification owner id
    pub fn user_id(&self) -> i64 {
        (self.tag >> 1) as i64 | 1
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// assert_eq!(TestDataBuilder::new(7).email("ebuka"), "ebuka+7@example.com");
    /// ```
    pub fn email(&self, local: &str) -> String {
        format!("{}+{}@example.com", local, self.tag)
    }

    /// Catalog name that cannot clash with the seeded resources
    pub fn resource_name(&self, kind: &str) -> String {
        format!("test_{}_{:x}", kind, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_values() {
        let a = TestDataBuilder::from_test_name("duplicate_email");
        let b = TestDataBuilder::from_test_name("duplicate_email");
        assert_eq!(a.email("x"), b.email("x"));
        assert_eq!(a.user_id(), b.user_id());
    }

    #[test]
    fn test_different_names_do_not_collide() {
        let a = TestDataBuilder::from_test_name("bulk_rollback");
        let b = TestDataBuilder::from_test_name("update_delete");
        assert_ne!(a.email("x"), b.email("x"));
        assert_ne!(a.resource_name("vpc"), b.resource_name("vpc"));
    }

    #[test]
    fn test_user_id_is_positive() {
        assert!(TestDataBuilder::new(u64::MAX).user_id() > 0);
        assert!(TestDataBuilder::new(0).user_id() > 0);
    }
}
