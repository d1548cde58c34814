use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Inventory API", description = "Customers and their cloud resources"),
    nest(
        (path = "/api/v1", api = domain_customers::handlers::ApiDoc),
        (path = "/api/v1", api = domain_cloud_resources::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
