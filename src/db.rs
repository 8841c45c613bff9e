use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const CREATE_ACTIVITIES: &str = "\
    CREATE TABLE IF NOT EXISTS activities (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT,
        specific TEXT NOT NULL,
        measurable TEXT NOT NULL,
        achievable TEXT,
        relevant TEXT,
        timebound TEXT NOT NULL,
        buddy_email TEXT,
        completed BOOLEAN DEFAULT 0,
        created_at DATETIME,
        updated_at DATETIME
    )";

const CREATE_LOGS: &str = "\
    CREATE TABLE IF NOT EXISTS logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        activity_id INTEGER NOT NULL,
        text TEXT NOT NULL,
        metrics TEXT,
        created_at DATETIME,
        FOREIGN KEY (activity_id) REFERENCES activities (id) ON DELETE CASCADE
    )";

const CREATE_GOALS: &str = "\
    CREATE TABLE IF NOT EXISTS goals (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        activity_id INTEGER NOT NULL,
        target_value INTEGER NOT NULL,
        current_value INTEGER DEFAULT 0,
        target_date DATE,
        achieved BOOLEAN DEFAULT 0,
        created_at DATETIME,
        FOREIGN KEY (activity_id) REFERENCES activities (id) ON DELETE CASCADE
    )";

/// Open (or create) the SQLite database file and return a shared pool.
/// Foreign keys are switched on per connection; cascade deletes depend
/// on it.
pub async fn connect(path: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new().connect_with(options).await
}

/// Idempotent table creation. Activities must come first; logs and goals
/// declare foreign keys against it.
pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_ACTIVITIES).execute(pool).await?;
    sqlx::query(CREATE_LOGS).execute(pool).await?;
    sqlx::query(CREATE_GOALS).execute(pool).await?;
    Ok(())
}
