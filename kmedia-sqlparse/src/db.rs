use dotenvy::dotenv;

/// Whether `url` points at a PostgreSQL database, the only backend kmedia supports.
#[must_use]
pub fn is_postgres_url(url: &str) -> bool {
    let lower = url.to_lowercase();

    lower.starts_with("postgres://") || lower.starts_with("postgresql://")
}

/// Attempt to retrieve the database URL from the `DATABASE_URL` environment variable, or from a
/// corresponding `.env` file. A value that is not valid UTF-8 counts as missing.
#[must_use]
pub fn get_database_url() -> Option<String> {
    let _ = dotenv();

    std::env::var("DATABASE_URL").ok()
}

#[cfg(test)]
mod test {
    use super::is_postgres_url;

    #[test]
    fn test_is_postgres_url() {
        assert!(is_postgres_url("postgres://kmedia@localhost/kmedia"));
        assert!(is_postgres_url("PostgreSQL://localhost:5432/kmedia"));
        assert!(!is_postgres_url("sqlite://kmedia.db"));
        assert!(!is_postgres_url("mysql://localhost/kmedia"));
    }
}
