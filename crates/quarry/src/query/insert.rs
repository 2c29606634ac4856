//! INSERT compilation.

use rusqlite::types::Value;
use tracing::debug;

use crate::{
    error::{QueryError, Result},
    query::state::{CompiledQuery, QueryState},
};

/// Renders `INSERT INTO <table> (<cols>) VALUES (?, …)`, one parameter per
/// value in pair order.
pub(crate) fn compile_insert(
    state: &QueryState,
    values: &[(String, Value)],
) -> Result<CompiledQuery> {
    let table = state.require_table()?;
    if values.is_empty() {
        return Err(QueryError::EmptyValues("INSERT"));
    }

    let columns = values
        .iter()
        .map(|(column, _)| column.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; values.len()].join(", ");

    let sql = format!("INSERT INTO {} ({}) VALUES ({})", table, columns, placeholders);
    let params = values.iter().map(|(_, value)| value.clone()).collect();

    debug!("compiled insert: {}", sql);
    Ok(CompiledQuery { sql, params })
}
