use sqlx::postgres::PgRow;

/// Trait describing a struct that may be parsed from a [`sqlx::Row`].
pub trait ParseFromRow: Sized {
    /// # Errors
    ///
    /// If a column is missing from the row, or its value cannot be decoded.
    fn parse_from_row(row: &PgRow) -> Result<Self, sqlx::Error>;
}
