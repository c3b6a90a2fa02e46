use crate::models::{NewProduct, Product, ProductData, ProductId, SortOrder};

/// Repository interface for the product lifecycle.
///
/// Every operation touches at most one row. Lookups report a missing product
/// as `Ok(None)` (or `Ok(false)`), reserving `Err` for storage failures.
pub trait ProductRepository: super::Repository {
    /// List every product, ordered by id.
    fn query_products(
        &self,
        order: SortOrder,
    ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send;

    /// Get a product by its id.
    fn get_product(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send;

    /// Store a new product. The backend assigns the id; the product starts
    /// available.
    fn create_product(
        &self,
        product: NewProduct,
    ) -> impl Future<Output = Result<Product, Self::Error>> + Send;

    /// Overwrite every field of an existing product.
    ///
    /// # Returns
    ///
    /// - Ok(Some(product)) with the stored values if the product exists
    /// - Ok(None) if no such product exists
    fn update_product(
        &self,
        product_id: ProductId,
        data: ProductData,
    ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send;

    /// Permanently remove a product.
    ///
    /// # Returns
    ///
    /// - Ok(true) if a product was removed
    /// - Ok(false) if no such product exists
    fn delete_product(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
