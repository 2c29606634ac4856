pub mod error;
pub mod helpers;
pub mod macros;
pub mod query;
pub mod row;
pub mod traits;

pub use helpers::*;
pub use query::*;
pub use row::Row;
pub use rusqlite::types::Value;
pub use traits::FromRow;
