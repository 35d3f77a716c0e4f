use crate::{
    db::Database,
    error::Result,
    models::product::{Product, TrendingProduct},
};

/// A random sample of `size` products with a positive price.
pub async fn catalog_sample(db: &Database, size: i64) -> Result<Vec<Product>> {
    db.fetch_all(
        r#"
        SELECT
            product_key::int8 AS product_key,
            product_name,
            brand,
            category,
            subcategory,
            unit_price::float8 AS unit_price
        FROM data.product
        WHERE unit_price > 0
        ORDER BY random()
        LIMIT $1
        "#,
        &[&size],
    )
    .await
}

/// The four products with the highest all-time quantity sold.
pub async fn trending(db: &Database) -> Result<Vec<TrendingProduct>> {
    db.fetch_all(
        r#"
        SELECT
            p.product_key::int8 AS product_key,
            p.product_name,
            p.brand,
            p.category,
            p.subcategory,
            p.unit_price::float8 AS unit_price,
            SUM(r.quantity)::int8 AS quantity_sold
        FROM data.order_rows r
        JOIN data.product p ON p.product_key = r.product_key
        GROUP BY p.product_key, p.product_name, p.brand, p.category, p.subcategory, p.unit_price
        ORDER BY quantity_sold DESC
        LIMIT 4
        "#,
        &[],
    )
    .await
}
