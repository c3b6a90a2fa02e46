use serde::{Deserialize, Serialize};

/// Storage-assigned identifier of a product.
///
/// Ids are handed out on creation, never change afterwards, and are never
/// reused once the product is deleted.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ProductId> for i64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// The writable fields of a product.
///
/// A stored product always has a non-empty `name` and a strictly positive
/// `price`; the HTTP layer rejects anything else before it reaches storage.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    /// The product name
    #[cfg_attr(feature = "schemars", schemars(example = "Monitor Curvo de 42 pulgadas"))]
    pub name: String,
    /// The product price
    #[cfg_attr(feature = "schemars", schemars(example = 300.0))]
    pub price: f64,
    /// The product availability
    #[cfg_attr(feature = "schemars", schemars(example = true))]
    pub disponible: bool,
}

/// The fields accepted when creating a product.
///
/// Availability is not part of creation: every new product starts available.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    /// The product name
    #[cfg_attr(feature = "schemars", schemars(example = "Monitor Curvo de 42 pulgadas"))]
    pub name: String,
    /// The product price
    #[cfg_attr(feature = "schemars", schemars(example = 399.0))]
    pub price: f64,
}

impl From<NewProduct> for ProductData {
    fn from(NewProduct { name, price }: NewProduct) -> Self {
        Self {
            name,
            price,
            disponible: true,
        }
    }
}

/// A stored product: its id together with its data.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "schemars", schemars(rename = "Producto"))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// The product id
    #[cfg_attr(feature = "schemars", schemars(example = 1))]
    pub id: ProductId,
    /// The product fields
    #[serde(flatten)]
    pub data: ProductData,
}

impl Product {
    /// The product's data with availability flipped.
    pub fn toggled(&self) -> ProductData {
        ProductData {
            disponible: !self.data.disponible,
            ..self.data.clone()
        }
    }
}

/// Direction in which products are listed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest first
    Ascending,
    /// Newest first
    #[default]
    Descending,
}
