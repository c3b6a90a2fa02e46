use super::{CreateProduct, ProductPath, ReplaceProduct};
use crate::{ApiApplication, ApiError, validation::Valid};

use axum::{Json, extract::State, http::StatusCode};
use catalog_core::{
    models::{DataResponse, Product, SortOrder},
    ports::ProductRepository as _,
};
use tracing::{Level, event};

/// Confirmation returned once a product is deleted.
pub(crate) const DELETED_MESSAGE: &str = "Producto Eliminado";

/// List every product, newest first.
///
/// # Returns
///
/// - `200 OK`: All products
/// - `500 Internal Server Error`: Database query failed
pub(crate) async fn list_products<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<DataResponse<Vec<Product>>>, ApiError> {
    let products = app
        .database()
        .query_products(SortOrder::Descending)
        .await
        .map_err(ApiError::storage)?;

    Ok(Json(DataResponse::new(products)))
}

/// Retrieve a product.
///
/// # Returns
///
/// - `200 OK`: Product data
/// - `400 Bad Request`: The id is not an integer
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database query failed
pub(crate) async fn read_product<T: ApiApplication>(
    State(app): State<T>,
    Valid(ProductPath(product_id)): Valid<ProductPath>,
) -> Result<Json<DataResponse<Product>>, ApiError> {
    let product = app
        .database()
        .get_product(product_id)
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(DataResponse::new(product)))
}

/// Create a new product. The storage assigns its id and it starts available.
///
/// # Returns
///
/// - `201 Created`: The stored product
/// - `400 Bad Request`: Invalid name or price
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn create_product<T: ApiApplication>(
    State(app): State<T>,
    Valid(CreateProduct(product)): Valid<CreateProduct>,
) -> Result<(StatusCode, Json<DataResponse<Product>>), ApiError> {
    let product = app
        .database()
        .create_product(product)
        .await
        .map_err(ApiError::storage)?;

    event!(Level::DEBUG, product_id = %product.id, "created product");
    Ok((StatusCode::CREATED, Json(DataResponse::new(product))))
}

/// Overwrite the name, price and availability of a product.
///
/// # Returns
///
/// - `200 OK`: The updated product
/// - `400 Bad Request`: Invalid id or body
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn replace_product<T: ApiApplication>(
    State(app): State<T>,
    Valid(ReplaceProduct { id, data }): Valid<ReplaceProduct>,
) -> Result<Json<DataResponse<Product>>, ApiError> {
    let db = app.database();

    db.get_product(id)
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::NotFound)?;

    // the row may still vanish between the lookup and the write
    let product = db
        .update_product(id, data)
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(DataResponse::new(product)))
}

/// Flip the availability of a product.
///
/// # Returns
///
/// - `200 OK`: The updated product
/// - `400 Bad Request`: The id is not an integer
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn toggle_availability<T: ApiApplication>(
    State(app): State<T>,
    Valid(ProductPath(product_id)): Valid<ProductPath>,
) -> Result<Json<DataResponse<Product>>, ApiError> {
    let db = app.database();

    let current = db
        .get_product(product_id)
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::NotFound)?;

    let product = db
        .update_product(product_id, current.toggled())
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(DataResponse::new(product)))
}

/// Permanently delete a product.
///
/// # Returns
///
/// - `200 OK`: A confirmation message
/// - `400 Bad Request`: The id is not an integer
/// - `404 Not Found`: Product does not exist
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn delete_product<T: ApiApplication>(
    State(app): State<T>,
    Valid(ProductPath(product_id)): Valid<ProductPath>,
) -> Result<Json<DataResponse<String>>, ApiError> {
    let db = app.database();

    db.get_product(product_id)
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::NotFound)?;

    if !db
        .delete_product(product_id)
        .await
        .map_err(ApiError::storage)?
    {
        return Err(ApiError::NotFound);
    }

    event!(Level::DEBUG, %product_id, "deleted product");
    Ok(Json(DataResponse::new(DELETED_MESSAGE.to_string())))
}
