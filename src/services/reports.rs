use crate::{
    date_window::{DateFilter, DateWindow},
    error::Result,
    models::report::{
        CategoryProfit, CompanyPurchases, CountrySales, GeoCustomers, KpiSummary,
        MonthlyFinancials, OrderSummary, ProductSales,
    },
    repositories::report::{self as report_repo, ORDER_DATE_COLUMN},
    state::AppState,
};

/// Binds a window to the order date column, anchored at the reference date.
fn order_date_filter(state: &AppState, window: DateWindow) -> DateFilter {
    DateFilter::new(window, state.config.reference_date, ORDER_DATE_COLUMN)
}

/// Total revenue, order count and average order value.
///
/// An empty window yields zeros rather than an empty object.
pub async fn kpi_summary(state: &AppState, window: DateWindow) -> Result<KpiSummary> {
    let filter = order_date_filter(state, window);
    let summary = report_repo::kpi_summary(&state.db, &filter).await?;
    Ok(summary.unwrap_or(KpiSummary {
        total_sales: 0.0,
        order_count: 0,
        average_order_value: 0.0,
    }))
}

pub async fn financial_trend(state: &AppState, window: DateWindow) -> Result<Vec<MonthlyFinancials>> {
    report_repo::financial_trend(&state.db, &order_date_filter(state, window)).await
}

pub async fn top_products(state: &AppState, window: DateWindow) -> Result<Vec<ProductSales>> {
    report_repo::top_products(&state.db, &order_date_filter(state, window)).await
}

pub async fn latest_orders(state: &AppState, window: DateWindow) -> Result<Vec<OrderSummary>> {
    report_repo::latest_orders(&state.db, &order_date_filter(state, window)).await
}

pub async fn top_customers(state: &AppState, window: DateWindow) -> Result<Vec<CompanyPurchases>> {
    report_repo::top_customers(&state.db, &order_date_filter(state, window)).await
}

pub async fn category_profitability(
    state: &AppState,
    window: DateWindow,
) -> Result<Vec<CategoryProfit>> {
    report_repo::category_profitability(&state.db, &order_date_filter(state, window)).await
}

pub async fn country_sales(state: &AppState, window: DateWindow) -> Result<Vec<CountrySales>> {
    report_repo::country_sales(&state.db, &order_date_filter(state, window)).await
}

pub async fn geo_distribution(state: &AppState) -> Result<Vec<GeoCustomers>> {
    report_repo::geo_distribution(&state.db).await
}
