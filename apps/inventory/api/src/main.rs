//! Inventory API - Entry Point
//!
//! Customers, the resource catalog and assignment publishing.

#[tokio::main]
async fn main() -> eyre::Result<()> {
    inventory_api::run().await
}
