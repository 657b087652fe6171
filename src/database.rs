use sqlx::{PgPool, Pool, Postgres};

pub type Database = Pool<Postgres>;

pub async fn create_database_pool(database_url: &str) -> Result<Database, sqlx::Error> {
    let pool = PgPool::connect(database_url).await?;

    // Test the connection
    sqlx::query("SELECT 1")
        .fetch_one(&pool)
        .await?;

    println!("Connected to database successfully!");
    Ok(pool)
}

/// Idempotent schema bootstrap. The UNIQUE constraint on skus.sku is the
/// final arbiter of code uniqueness when two clients race past the
/// duplicate pre-check.
pub async fn init_schema(pool: &Database) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS skus (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            bin_column TEXT NOT NULL DEFAULT '',
            bin_row TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL,
            subcategory TEXT,
            cost NUMERIC,
            price NUMERIC,
            description TEXT,
            sku TEXT NOT NULL UNIQUE,
            serial_number INT NOT NULL,
            date_code TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'Active',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS locations (
            id BIGSERIAL PRIMARY KEY,
            kind TEXT NOT NULL,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Registry dedup is case-insensitive, so the constraint has to be too:
    // two concurrent adds of 'a' and 'A' must collapse to one row even when
    // both slip past the handler's pre-check.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS locations_kind_value_idx
        ON locations (kind, LOWER(value))
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
