use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};

use crate::{
    date_window::WindowQuery,
    error::Result,
    response,
    services::reports as report_service,
    state::AppState,
};

/// `GET /kpis`
pub async fn kpis(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Response> {
    let summary = report_service::kpi_summary(&state, query.window()).await?;
    response::json(StatusCode::OK, &summary)
}

/// `GET /analisis-financiero`
pub async fn financial_trend(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Response> {
    let months = report_service::financial_trend(&state, query.window()).await?;
    response::json(StatusCode::OK, &months)
}

/// `GET /top-productos`
pub async fn top_products(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Response> {
    let products = report_service::top_products(&state, query.window()).await?;
    response::json(StatusCode::OK, &products)
}

/// `GET /ultimas-ordenes`
pub async fn latest_orders(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Response> {
    let orders = report_service::latest_orders(&state, query.window()).await?;
    response::json(StatusCode::OK, &orders)
}

/// `GET /top-clientes`
pub async fn top_customers(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Response> {
    let customers = report_service::top_customers(&state, query.window()).await?;
    response::json(StatusCode::OK, &customers)
}

/// `GET /admin/rentabilidad-categoria`
pub async fn category_profitability(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Response> {
    let categories = report_service::category_profitability(&state, query.window()).await?;
    response::json(StatusCode::OK, &categories)
}

/// `GET /admin/ventas-globales`
pub async fn country_sales(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> Result<Response> {
    let countries = report_service::country_sales(&state, query.window()).await?;
    response::json(StatusCode::OK, &countries)
}

/// `GET /admin/geo-clientes`
pub async fn geo_distribution(State(state): State<AppState>) -> Result<Response> {
    let locations = report_service::geo_distribution(&state).await?;
    response::json(StatusCode::OK, &locations)
}
