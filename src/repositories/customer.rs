use crate::{
    db::{self, Database},
    error::{AppError, Result},
    models::customer::{CustomerCredentials, NewCustomer, Purchase},
};

/// Exists to let `fetch_optional` map a single boolean column.
struct Exists(bool);

impl TryFrom<&tokio_postgres::Row> for Exists {
    type Error = AppError;

    fn try_from(row: &tokio_postgres::Row) -> Result<Self> {
        Ok(Self(db::column(row, "found")?))
    }
}

/// Finds the login columns for a customer by exact email.
pub async fn find_credentials_by_email(
    db: &Database,
    email: &str,
) -> Result<Option<CustomerCredentials>> {
    db.fetch_optional(
        r#"
        SELECT email, password_hash, given_name, surname
        FROM data.customer
        WHERE email = $1 AND password_hash IS NOT NULL
        "#,
        &[&email],
    )
    .await
}

/// Whether any customer already uses this email.
pub async fn email_exists(db: &Database, email: &str) -> Result<bool> {
    let exists: Option<Exists> = db
        .fetch_optional(
            r#"
            SELECT EXISTS (SELECT 1 FROM data.customer WHERE email = $1) AS found
            "#,
            &[&email],
        )
        .await?;
    Ok(exists.is_some_and(|found| found.0))
}

/// Inserts a new customer row.
pub async fn insert_customer(db: &Database, customer: &NewCustomer) -> Result<()> {
    db.execute(
        r#"
        INSERT INTO data.customer (given_name, surname, email, password_hash)
        VALUES ($1, $2, $3, $4)
        "#,
        &[
            &customer.given_name,
            &customer.surname,
            &customer.email,
            &customer.password_hash,
        ],
    )
    .await?;
    Ok(())
}

/// The 20 most recent orders placed by the customer with this email.
pub async fn purchases_by_email(db: &Database, email: &str) -> Result<Vec<Purchase>> {
    db.fetch_all(
        r#"
        SELECT
            o.order_key::int8 AS order_key,
            to_char(o.order_date, 'YYYY-MM-DD') AS order_date,
            SUM(r.quantity)::int8 AS item_count,
            SUM(r.quantity * r.unit_price)::float8 AS total,
            c.country AS country
        FROM data.orders o
        JOIN data.order_rows r ON r.order_key = o.order_key
        JOIN data.customer c ON c.customer_key = o.customer_key
        WHERE c.email = $1
        GROUP BY o.order_key, o.order_date, c.country
        ORDER BY o.order_date DESC, o.order_key DESC
        LIMIT 20
        "#,
        &[&email],
    )
    .await
}
