mod diagnostics;
mod health;
pub mod products;

pub use diagnostics::{error_test, not_found};
pub use health::{health_check, root};
pub use products::{
    create_product, delete_product, list_products, product_stats, stats_is_not_a_product,
    update_product,
};
