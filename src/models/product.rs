use serde::Serialize;
use tokio_postgres::Row;

use crate::{db::column, error::AppError};

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    #[serde(rename = "ProductKey")]
    pub product_key: i64,
    #[serde(rename = "ProductName")]
    pub name: String,
    #[serde(rename = "Brand")]
    pub brand: Option<String>,
    #[serde(rename = "Category")]
    pub category: Option<String>,
    #[serde(rename = "Subcategory")]
    pub subcategory: Option<String>,
    #[serde(rename = "UnitPrice")]
    pub unit_price: f64,
}

impl TryFrom<&Row> for Product {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            product_key: column(row, "product_key")?,
            name: column(row, "product_name")?,
            brand: column(row, "brand")?,
            category: column(row, "category")?,
            subcategory: column(row, "subcategory")?,
            unit_price: column(row, "unit_price")?,
        })
    }
}

/// A product together with its all-time quantity sold.
#[derive(Debug, Clone, Serialize)]
pub struct TrendingProduct {
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "TotalVendido")]
    pub quantity_sold: i64,
}

impl TryFrom<&Row> for TrendingProduct {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            product: Product::try_from(row)?,
            quantity_sold: column(row, "quantity_sold")?,
        })
    }
}
