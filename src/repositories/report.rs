//! SQL for the reporting endpoints.
//!
//! Each query appends a [`DateFilter`] predicate on `o.order_date` to its
//! `WHERE` clause; the filter supplies the only bound parameter.

use crate::{
    date_window::DateFilter,
    db::Database,
    error::Result,
    models::report::{
        CategoryProfit, CompanyPurchases, CountrySales, GeoCustomers, KpiSummary,
        MonthlyFinancials, OrderSummary, ProductSales,
    },
};

/// The column every date window applies to.
pub const ORDER_DATE_COLUMN: &str = "o.order_date";

pub async fn kpi_summary(db: &Database, filter: &DateFilter) -> Result<Option<KpiSummary>> {
    let sql = format!(
        r#"
        SELECT
            COALESCE(SUM(r.quantity * r.unit_price), 0)::float8 AS total_sales,
            COUNT(DISTINCT r.order_key)::int8 AS order_count,
            COALESCE(
                SUM(r.quantity * r.unit_price) / NULLIF(COUNT(DISTINCT r.order_key), 0),
                0
            )::float8 AS average_order_value
        FROM data.order_rows r
        JOIN data.orders o ON r.order_key = o.order_key
        WHERE 1=1 {}
        "#,
        filter.predicate()
    );
    db.fetch_optional(&sql, &filter.params()).await
}

pub async fn financial_trend(db: &Database, filter: &DateFilter) -> Result<Vec<MonthlyFinancials>> {
    let sql = format!(
        r#"
        SELECT
            to_char(o.order_date, 'YYYY-MM') AS month,
            SUM(r.quantity * r.unit_price)::float8 AS revenue,
            SUM(r.quantity * r.unit_cost)::float8 AS cost,
            SUM(r.quantity * (r.unit_price - r.unit_cost))::float8 AS profit
        FROM data.order_rows r
        JOIN data.orders o ON r.order_key = o.order_key
        WHERE 1=1 {}
        GROUP BY to_char(o.order_date, 'YYYY-MM')
        ORDER BY month
        "#,
        filter.predicate()
    );
    db.fetch_all(&sql, &filter.params()).await
}

pub async fn top_products(db: &Database, filter: &DateFilter) -> Result<Vec<ProductSales>> {
    let sql = format!(
        r#"
        SELECT
            p.product_name AS product,
            SUM(r.quantity * r.unit_price)::float8 AS revenue
        FROM data.order_rows r
        JOIN data.product p ON r.product_key = p.product_key
        JOIN data.orders o ON r.order_key = o.order_key
        WHERE 1=1 {}
        GROUP BY p.product_name
        ORDER BY revenue DESC
        LIMIT 10
        "#,
        filter.predicate()
    );
    db.fetch_all(&sql, &filter.params()).await
}

pub async fn latest_orders(db: &Database, filter: &DateFilter) -> Result<Vec<OrderSummary>> {
    let sql = format!(
        r#"
        SELECT
            o.order_key::int8 AS order_key,
            to_char(o.order_date, 'YYYY-MM-DD') AS order_date,
            c.company AS company,
            SUM(r.quantity * r.unit_price)::float8 AS total
        FROM data.orders o
        JOIN data.order_rows r ON o.order_key = r.order_key
        JOIN data.customer c ON o.customer_key = c.customer_key
        WHERE 1=1 {}
        GROUP BY o.order_key, o.order_date, c.company
        ORDER BY o.order_date DESC
        LIMIT 10
        "#,
        filter.predicate()
    );
    db.fetch_all(&sql, &filter.params()).await
}

/// Companies ranked by amount purchased; blank company names are skipped.
pub async fn top_customers(db: &Database, filter: &DateFilter) -> Result<Vec<CompanyPurchases>> {
    let sql = format!(
        r#"
        SELECT
            c.company AS company,
            SUM(r.quantity * r.unit_price)::float8 AS amount
        FROM data.order_rows r
        JOIN data.orders o ON r.order_key = o.order_key
        JOIN data.customer c ON o.customer_key = c.customer_key
        WHERE c.company IS NOT NULL AND c.company <> '' {}
        GROUP BY c.company
        ORDER BY amount DESC
        LIMIT 10
        "#,
        filter.predicate()
    );
    db.fetch_all(&sql, &filter.params()).await
}

pub async fn category_profitability(
    db: &Database,
    filter: &DateFilter,
) -> Result<Vec<CategoryProfit>> {
    let sql = format!(
        r#"
        SELECT
            p.category AS category,
            SUM(r.quantity * (r.unit_price - r.unit_cost))::float8 AS net_profit
        FROM data.order_rows r
        JOIN data.product p ON r.product_key = p.product_key
        JOIN data.orders o ON r.order_key = o.order_key
        WHERE p.category IS NOT NULL {}
        GROUP BY p.category
        ORDER BY net_profit DESC
        LIMIT 15
        "#,
        filter.predicate()
    );
    db.fetch_all(&sql, &filter.params()).await
}

pub async fn country_sales(db: &Database, filter: &DateFilter) -> Result<Vec<CountrySales>> {
    let sql = format!(
        r#"
        SELECT
            c.country AS country,
            SUM(r.quantity * r.unit_price)::float8 AS revenue
        FROM data.order_rows r
        JOIN data.orders o ON r.order_key = o.order_key
        JOIN data.customer c ON o.customer_key = c.customer_key
        WHERE c.country IS NOT NULL {}
        GROUP BY c.country
        ORDER BY revenue DESC
        LIMIT 10
        "#,
        filter.predicate()
    );
    db.fetch_all(&sql, &filter.params()).await
}

/// Installed base by country and state. Not date filtered.
pub async fn geo_distribution(db: &Database) -> Result<Vec<GeoCustomers>> {
    db.fetch_all(
        r#"
        SELECT
            country,
            state,
            num_customers::int8 AS customers
        FROM data.geo_locations
        WHERE num_customers > 0
        ORDER BY num_customers DESC
        LIMIT 60
        "#,
        &[],
    )
    .await
}
