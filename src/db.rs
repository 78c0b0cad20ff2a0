use sqlx::MySqlPool;
use tracing::info;

pub async fn init_db(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPool::connect(database_url).await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Creates both tables with their unique keys if they are missing.
///
/// Identifier, email and department columns use a binary collation so
/// uniqueness and grouping match the exact stored values.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id CHAR(36) NOT NULL PRIMARY KEY,
            employee_id VARCHAR(20) COLLATE utf8mb4_bin NOT NULL,
            full_name VARCHAR(100) NOT NULL,
            email VARCHAR(254) COLLATE utf8mb4_bin NOT NULL,
            department VARCHAR(50) COLLATE utf8mb4_bin NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE KEY uq_employees_employee_id (employee_id),
            UNIQUE KEY uq_employees_email (email)
        ) DEFAULT CHARSET = utf8mb4
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id CHAR(36) NOT NULL PRIMARY KEY,
            employee_id VARCHAR(20) COLLATE utf8mb4_bin NOT NULL,
            date DATE NOT NULL,
            status VARCHAR(10) NOT NULL,
            UNIQUE KEY uq_attendance_employee_date (employee_id, date),
            KEY idx_attendance_date_status (date, status)
        ) DEFAULT CHARSET = utf8mb4
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema ready");
    Ok(())
}
