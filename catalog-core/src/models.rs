mod product;
mod response;

pub use product::{NewProduct, Product, ProductData, ProductId, SortOrder};
pub use response::{DataResponse, ErrorResponse};
