use crate::{
    error::Result,
    models::{
        customer::Purchase,
        product::{Product, TrendingProduct},
    },
    repositories::{customer as customer_repo, product as product_repo},
    state::AppState,
};

/// A fresh random sample of purchasable products.
///
/// The order is unspecified and changes per call.
pub async fn catalog(state: &AppState) -> Result<Vec<Product>> {
    product_repo::catalog_sample(&state.db, state.config.catalog_sample_size).await
}

/// The four best sellers by quantity, over all history.
pub async fn trending(state: &AppState) -> Result<Vec<TrendingProduct>> {
    product_repo::trending(&state.db).await
}

/// Recent orders of the customer identified by `email`.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `email` - The verified token subject. Never taken from the request.
pub async fn purchases(state: &AppState, email: &str) -> Result<Vec<Purchase>> {
    customer_repo::purchases_by_email(&state.db, email).await
}
