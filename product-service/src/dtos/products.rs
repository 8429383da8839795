use crate::models::{Product, Supplier};
use crate::services::Pagination;
use serde::Deserialize;
use validator::Validate;

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: u64 = 2;
pub const MAX_PAGE_SIZE: u64 = 100;
/// The driver encodes `skip` as an i64; larger offsets are past any real listing anyway.
pub const MAX_SKIP: u64 = i64::MAX as u64;

/// Body of `POST /api/product`. Any `id` the client sends is ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub prodname: String,

    #[validate(length(min = 1, message = "Product price is required"))]
    pub prodprice: String,

    pub supplier: Option<Supplier>,
}

impl From<CreateProductRequest> for Product {
    fn from(req: CreateProductRequest) -> Self {
        Product::new(req.prodname, req.prodprice, req.supplier)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl ProductListParams {
    pub fn pagination(&self) -> Pagination {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        Pagination {
            skip: (page - 1).saturating_mul(page_size).min(MAX_SKIP),
            limit: page_size,
        }
    }
}
