//! Core traits.

use rusqlite::Row;

/// A trait for types that can be constructed from a SQLite row.
///
/// Used by [`QueryBuilder::get_as`](crate::QueryBuilder::get_as) and
/// [`QueryBuilder::first_as`](crate::QueryBuilder::first_as) to map query
/// results onto concrete types.
///
/// # Example
///
/// ```rust
/// use quarry::FromRow;
///
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// impl FromRow for User {
///     fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
///         Ok(User {
///             id: row.get("id")?,
///             name: row.get("name")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}
