//! DELETE compilation.

use tracing::debug;

use crate::{
    error::Result,
    query::{
        clause::render_where,
        state::{CompiledQuery, QueryState},
    },
};

/// Renders `DELETE FROM <table>` followed by the WHERE clause. Without
/// predicates this deletes every row; that is the caller's call to make.
pub(crate) fn compile_delete(state: &QueryState) -> Result<CompiledQuery> {
    let table = state.require_table()?;

    let mut params = Vec::new();
    let mut sql = format!("DELETE FROM {}", table);

    if !state.predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&render_where(&state.predicates, &mut params));
    }

    debug!("compiled delete: {}", sql);
    Ok(CompiledQuery { sql, params })
}
