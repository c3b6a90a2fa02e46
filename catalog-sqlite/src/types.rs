use catalog_core::models::{Product, ProductData, ProductId};

/// A row of the `productos` table.
#[derive(sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub disponible: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId(row.id),
            data: ProductData {
                name: row.name,
                price: row.price,
                disponible: row.disponible,
            },
        }
    }
}
