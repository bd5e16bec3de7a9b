//! PostgreSQL schema setup for userbase storage.

use sqlx::PgPool;

/// Create the users table and its unique email index if missing.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID NOT NULL,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            date_of_birth TIMESTAMPTZ NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            CONSTRAINT users_pkey PRIMARY KEY (id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users (email)")
        .execute(pool)
        .await?;

    tracing::debug!("PostgreSQL schema ready");
    Ok(())
}
