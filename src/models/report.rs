//! Rows returned by the reporting queries.
//!
//! Field names on the wire follow the dashboard client, which predates this
//! service, so every field carries an explicit `rename`.

use serde::Serialize;
use tokio_postgres::Row;

use crate::{db::column, error::AppError};

/// Aggregate sales figures for one date window.
#[derive(Debug, Clone, Serialize)]
pub struct KpiSummary {
    #[serde(rename = "TotalVentas")]
    pub total_sales: f64,
    #[serde(rename = "TotalPedidos")]
    pub order_count: i64,
    /// Revenue divided by distinct orders, not the average line value the legacy dashboard showed.
    #[serde(rename = "TicketPromedio")]
    pub average_order_value: f64,
}

impl TryFrom<&Row> for KpiSummary {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            total_sales: column(row, "total_sales")?,
            order_count: column(row, "order_count")?,
            average_order_value: column(row, "average_order_value")?,
        })
    }
}

/// Revenue, cost and profit for one calendar month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyFinancials {
    /// `YYYY-MM`.
    #[serde(rename = "Mes")]
    pub month: String,
    #[serde(rename = "Ventas")]
    pub revenue: f64,
    #[serde(rename = "Costos")]
    pub cost: f64,
    #[serde(rename = "Ganancia")]
    pub profit: f64,
}

impl TryFrom<&Row> for MonthlyFinancials {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            month: column(row, "month")?,
            revenue: column(row, "revenue")?,
            cost: column(row, "cost")?,
            profit: column(row, "profit")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductSales {
    #[serde(rename = "Producto")]
    pub product: String,
    #[serde(rename = "Ventas")]
    pub revenue: f64,
}

impl TryFrom<&Row> for ProductSales {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            product: column(row, "product")?,
            revenue: column(row, "revenue")?,
        })
    }
}

/// One order with its total, for the "latest orders" feed.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    #[serde(rename = "OrderKey")]
    pub order_key: i64,
    /// `YYYY-MM-DD`.
    #[serde(rename = "Fecha")]
    pub date: String,
    #[serde(rename = "Cliente")]
    pub company: Option<String>,
    #[serde(rename = "Total")]
    pub total: f64,
}

impl TryFrom<&Row> for OrderSummary {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            order_key: column(row, "order_key")?,
            date: column(row, "order_date")?,
            company: column(row, "company")?,
            total: column(row, "total")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyPurchases {
    #[serde(rename = "Cliente")]
    pub company: String,
    #[serde(rename = "TotalComprado")]
    pub amount: f64,
}

impl TryFrom<&Row> for CompanyPurchases {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            company: column(row, "company")?,
            amount: column(row, "amount")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryProfit {
    #[serde(rename = "Categoria")]
    pub category: String,
    #[serde(rename = "GananciaNeta")]
    pub net_profit: f64,
}

impl TryFrom<&Row> for CategoryProfit {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            category: column(row, "category")?,
            net_profit: column(row, "net_profit")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CountrySales {
    #[serde(rename = "Pais")]
    pub country: String,
    #[serde(rename = "Ventas")]
    pub revenue: f64,
}

impl TryFrom<&Row> for CountrySales {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            country: column(row, "country")?,
            revenue: column(row, "revenue")?,
        })
    }
}

/// Precomputed customer count for a country/state pair.
#[derive(Debug, Clone, Serialize)]
pub struct GeoCustomers {
    #[serde(rename = "Pais")]
    pub country: String,
    #[serde(rename = "Estado")]
    pub state: Option<String>,
    #[serde(rename = "TotalClientes")]
    pub customers: i64,
}

impl TryFrom<&Row> for GeoCustomers {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            country: column(row, "country")?,
            state: column(row, "state")?,
            customers: column(row, "customers")?,
        })
    }
}
