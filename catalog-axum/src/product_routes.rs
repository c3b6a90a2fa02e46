//! REST API endpoints for product operations.
//!
//! Every route validates its path and body with rule chains before the
//! handler runs. The handlers themselves live in [`crud`].

use crate::{
    ApiApplication,
    validation::{Chain, Location, RequestInput, Validate, ValidationErrors},
};
use aide::{
    OperationInput as _,
    axum::{
        ApiRouter,
        routing::{get_with, post_with},
    },
    generate::GenContext,
    openapi::Operation,
    transform::TransformOperation,
};
use axum::{Json, extract::Path};
use catalog_core::models::{
    DataResponse, ErrorResponse, NewProduct, Product, ProductData, ProductId,
};
use serde_json::Value;

mod crud;

/// Creates a router with product-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route(
            "/",
            get_with(crud::list_products::<T>, list_docs)
                .post_with(crud::create_product::<T>, create_docs),
        )
        .api_route(
            "/{id}",
            get_with(crud::read_product::<T>, read_docs)
                .put_with(crud::replace_product::<T>, replace_docs)
                .patch_with(crud::toggle_availability::<T>, toggle_docs)
                .delete_with(crud::delete_product::<T>, delete_docs),
        )
}

fn list_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get a list of products")
        .description("Return a list of products, newest first")
        .tag("productos")
}

fn read_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get a product by ID")
        .description("Return a product based on its unique ID")
        .tag("productos")
        .response_with::<400, Json<ValidationErrors>, _>(|res| {
            res.description("Bad Request - Invalid ID")
        })
        .response_with::<404, Json<ErrorResponse>, _>(|res| res.description("Not found"))
}

fn create_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Creates a new product")
        .description("Returns a new record in the database")
        .tag("productos")
        .response_with::<201, Json<DataResponse<Product>>, _>(|res| {
            res.description("Successful response")
        })
        .response_with::<400, Json<ValidationErrors>, _>(|res| {
            res.description("Bad Request - invalid input data")
        })
}

fn replace_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Updates a product with user input")
        .description("Returns the updated product")
        .tag("productos")
        .response_with::<400, Json<ValidationErrors>, _>(|res| {
            res.description("Bad Request - Invalid ID or Invalid input data")
        })
        .response_with::<404, Json<ErrorResponse>, _>(|res| {
            res.description("Product Not Found")
        })
}

fn toggle_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update Product availability")
        .description("Flips the availability of the product and returns it")
        .tag("productos")
        .response_with::<400, Json<ValidationErrors>, _>(|res| {
            res.description("Bad Request - Invalid ID")
        })
        .response_with::<404, Json<ErrorResponse>, _>(|res| {
            res.description("Product Not Found")
        })
}

fn delete_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete a product by a given ID")
        .description("Return a confirmation message")
        .tag("productos")
        .response_with::<400, Json<ValidationErrors>, _>(|res| {
            res.description("Bad Request - Invalid ID")
        })
        .response_with::<404, Json<ErrorResponse>, _>(|res| {
            res.description("Product Not Found")
        })
}

/// Path parameter for product-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
#[allow(dead_code)]
struct Id {
    /// The ID of the product
    id: i64,
}

fn id_rule() -> Chain {
    Chain::param("id").is_int().with_message("ID no valido")
}

fn name_rule() -> Chain {
    Chain::body("name")
        .not_empty()
        .with_message("El nombre del producto no puede ir vacio")
}

fn price_rule() -> Chain {
    Chain::body("price")
        .is_numeric()
        .with_message("Valor no valido")
        .not_empty()
        .with_message("El precio del producto no puede ir vacio")
        .custom(is_positive)
        .with_message("El precio no es valido")
}

fn availability_rule() -> Chain {
    Chain::body("disponible")
        .is_boolean()
        .with_message("Valor para disponibilidad no valido")
}

fn is_positive(value: Option<&Value>) -> bool {
    crate::validation::as_number(value).is_some_and(|price| price > 0.0)
}

fn product_id(input: &RequestInput) -> Option<ProductId> {
    input.integer(Location::Params, "id").map(ProductId)
}

/// The product addressed by the path, for routes without a body.
pub(crate) struct ProductPath(pub ProductId);

impl Validate for ProductPath {
    fn rules() -> Vec<Chain> {
        vec![id_rule()]
    }

    fn extract(input: &RequestInput) -> Option<Self> {
        product_id(input).map(Self)
    }

    fn describe(ctx: &mut GenContext, operation: &mut Operation) {
        Path::<Id>::operation_input(ctx, operation);
    }
}

/// The body of a create request.
pub(crate) struct CreateProduct(pub NewProduct);

impl Validate for CreateProduct {
    fn rules() -> Vec<Chain> {
        vec![name_rule(), price_rule()]
    }

    fn extract(input: &RequestInput) -> Option<Self> {
        Some(Self(NewProduct {
            name: input.text(Location::Body, "name"),
            price: input.number(Location::Body, "price")?,
        }))
    }

    fn describe(ctx: &mut GenContext, operation: &mut Operation) {
        Json::<NewProduct>::operation_input(ctx, operation);
    }
}

/// The path and body of a full replace request.
pub(crate) struct ReplaceProduct {
    pub id: ProductId,
    pub data: ProductData,
}

impl Validate for ReplaceProduct {
    fn rules() -> Vec<Chain> {
        vec![id_rule(), name_rule(), price_rule(), availability_rule()]
    }

    fn extract(input: &RequestInput) -> Option<Self> {
        Some(Self {
            id: product_id(input)?,
            data: ProductData {
                name: input.text(Location::Body, "name"),
                price: input.number(Location::Body, "price")?,
                disponible: input.boolean(Location::Body, "disponible")?,
            },
        })
    }

    fn describe(ctx: &mut GenContext, operation: &mut Operation) {
        Path::<Id>::operation_input(ctx, operation);
        Json::<ProductData>::operation_input(ctx, operation);
    }
}
