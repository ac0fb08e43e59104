mod api;
mod product;

pub use api::{
    DeleteProductResponse, HealthResponse, ProductPayload, ProductQuery, StatsResponse,
    UpdateProductResponse,
};
pub use product::{Product, ProductFields, seed_products};
