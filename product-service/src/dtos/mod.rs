pub mod products;

pub use products::{CreateProductRequest, ProductListParams, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
