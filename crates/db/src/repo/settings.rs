use sqlx::SqlitePool;

/// Get a setting value by key.
pub async fn get(pool: &SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(v,)| v))
}

/// Set a setting value (upsert).
pub async fn set(pool: &SqlitePool, key: &str, value: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO settings (key, value, updated_ts) VALUES (?, ?, ?) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_ts = excluded.updated_ts",
    )
    .bind(key)
    .bind(value)
    .bind(chrono::Utc::now().timestamp())
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn pool() -> SqlitePool {
        let pool = crate::connect(":memory:").await.unwrap();
        crate::migrate::run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn set_get_overwrite() {
        let pool = pool().await;
        assert_eq!(get(&pool, "k").await.unwrap(), None);

        set(&pool, "k", "one").await.unwrap();
        assert_eq!(get(&pool, "k").await.unwrap().as_deref(), Some("one"));

        set(&pool, "k", "two").await.unwrap();
        assert_eq!(get(&pool, "k").await.unwrap().as_deref(), Some("two"));
        assert_eq!(get(&pool, "other").await.unwrap(), None);
    }
}
