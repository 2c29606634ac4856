//! The main query builder implementation.

use std::sync::{Arc, Mutex};

use rusqlite::{types::Value, Connection, ToSql};
use tracing::debug;

use crate::{
    error::{QueryError, Result},
    query::{
        clause::{Combinator, Direction, JoinKind, JoinSpec, OrderClause, Predicate},
        delete::compile_delete,
        insert::compile_insert,
        select::{compile_count, compile_select},
        state::{CompiledQuery, QueryState},
        update::compile_update,
    },
    row::Row,
    traits::FromRow,
};

/// An ergonomic, chainable SQL query builder for SQLite.
///
/// A builder accumulates clause state through its fluent methods and
/// compiles it on a terminal call ([`get`](Self::get), [`first`](Self::first),
/// [`insert`](Self::insert), [`update`](Self::update), [`delete`](Self::delete))
/// into SQL text plus a positionally aligned parameter list, executed
/// against the injected connection handle. The handle is shared, never
/// owned: the builder neither opens nor closes it.
///
/// Terminal calls consume the accumulated state logically, not physically —
/// clauses stay recorded until [`reset`](Self::reset), so reuse a builder
/// for a second query only after resetting it.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
///
/// use quarry::{values, QueryBuilder};
/// use rusqlite::Connection;
///
/// let conn = Connection::open_in_memory().unwrap();
/// conn.execute(
///     "CREATE TABLE users (
///         id INTEGER PRIMARY KEY,
///         name TEXT NOT NULL,
///         age INTEGER NOT NULL
///     )",
///     [],
/// )
/// .unwrap();
///
/// let db = Arc::new(Mutex::new(conn));
/// let mut query = QueryBuilder::new(db);
///
/// let id = query
///     .table("users")
///     .insert(values! { "name" => "ferris".to_string(), "age" => 11 })
///     .unwrap();
/// assert_eq!(id, 1);
///
/// let adults = query
///     .reset()
///     .table("users")
///     .where_("age", ">=", 10)
///     .order_desc("age")
///     .get()
///     .unwrap();
/// assert_eq!(adults.len(), 1);
/// ```
pub struct QueryBuilder {
    db: Arc<Mutex<Connection>>,
    state: QueryState,
    compiled: Option<CompiledQuery>,
}

impl QueryBuilder {
    /// Creates a builder over a shared connection handle.
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self {
            db,
            state: QueryState::default(),
            compiled: None,
        }
    }

    /// Sets the target table.
    pub fn table(&mut self, name: impl Into<String>) -> &mut Self {
        self.state.table = Some(name.into());
        self
    }

    /// Replaces the column list. An empty iterator restores the default `*`.
    pub fn select<I>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.state.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    fn push_simple(
        &mut self,
        combinator: Combinator,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.state.predicates.push(Predicate::Simple {
            combinator,
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
        });
        self
    }

    /// Adds a WHERE condition joined with AND.
    pub fn where_(
        &mut self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.push_simple(Combinator::And, column, operator, value)
    }

    /// Shorthand for [`where_`](Self::where_) with the `=` operator.
    pub fn where_eq(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.where_(column, "=", value)
    }

    /// Adds a WHERE condition joined with OR.
    ///
    /// If this is the first predicate, the clause still opens with a plain
    /// condition; combinators are only rendered between predicates.
    pub fn or_where(
        &mut self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.push_simple(Combinator::Or, column, operator, value)
    }

    /// Shorthand for [`or_where`](Self::or_where) with the `=` operator.
    pub fn or_where_eq(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.or_where(column, "=", value)
    }

    /// Adds one `=` condition per pair, joined with AND, in pair order.
    pub fn where_all<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (column, value) in pairs {
            self.where_eq(column, value);
        }
        self
    }

    fn push_in<I, V>(&mut self, column: impl Into<String>, values: I, negated: bool) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.state.predicates.push(Predicate::In {
            combinator: Combinator::And,
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated,
        });
        self
    }

    /// Adds a `column IN (?, ?, …)` condition, one parameter per value.
    pub fn where_in<I, V>(&mut self, column: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push_in(column, values, false)
    }

    /// Adds a `column NOT IN (?, ?, …)` condition.
    pub fn where_not_in<I, V>(&mut self, column: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push_in(column, values, true)
    }

    /// Adds a `column IS NULL` condition. Binds nothing.
    pub fn where_null(&mut self, column: impl Into<String>) -> &mut Self {
        self.state.predicates.push(Predicate::Null {
            combinator: Combinator::And,
            column: column.into(),
            negated: false,
        });
        self
    }

    /// Adds a `column IS NOT NULL` condition. Binds nothing.
    pub fn where_not_null(&mut self, column: impl Into<String>) -> &mut Self {
        self.state.predicates.push(Predicate::Null {
            combinator: Combinator::And,
            column: column.into(),
            negated: true,
        });
        self
    }

    /// Adds a `column BETWEEN ? AND ?` condition binding `(low, high)` in
    /// that order.
    pub fn where_between<L, H>(
        &mut self,
        column: impl Into<String>,
        low: L,
        high: H,
    ) -> &mut Self
    where
        L: Into<Value>,
        H: Into<Value>,
    {
        self.state.predicates.push(Predicate::Between {
            combinator: Combinator::And,
            column: column.into(),
            low: low.into(),
            high: high.into(),
        });
        self
    }

    fn push_join(
        &mut self,
        kind: JoinKind,
        table: impl Into<String>,
        left: impl Into<String>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> &mut Self {
        self.state.joins.push(JoinSpec {
            table: table.into(),
            left: left.into(),
            operator: operator.into(),
            right: right.into(),
            kind,
        });
        self
    }

    /// Adds an INNER JOIN with an equality ON condition.
    pub fn join(
        &mut self,
        table: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> &mut Self {
        self.push_join(JoinKind::Inner, table, left, "=", right)
    }

    /// Adds an INNER JOIN with an explicit ON operator.
    pub fn join_on(
        &mut self,
        table: impl Into<String>,
        left: impl Into<String>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> &mut Self {
        self.push_join(JoinKind::Inner, table, left, operator, right)
    }

    /// Adds a LEFT JOIN with an equality ON condition.
    pub fn left_join(
        &mut self,
        table: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> &mut Self {
        self.push_join(JoinKind::Left, table, left, "=", right)
    }

    /// Adds a LEFT JOIN with an explicit ON operator.
    pub fn left_join_on(
        &mut self,
        table: impl Into<String>,
        left: impl Into<String>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> &mut Self {
        self.push_join(JoinKind::Left, table, left, operator, right)
    }

    /// Adds a RIGHT JOIN with an equality ON condition.
    pub fn right_join(
        &mut self,
        table: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> &mut Self {
        self.push_join(JoinKind::Right, table, left, "=", right)
    }

    /// Adds a RIGHT JOIN with an explicit ON operator.
    pub fn right_join_on(
        &mut self,
        table: impl Into<String>,
        left: impl Into<String>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> &mut Self {
        self.push_join(JoinKind::Right, table, left, operator, right)
    }

    /// Adds an ORDER BY clause.
    pub fn order_by(&mut self, column: impl Into<String>, direction: Direction) -> &mut Self {
        self.state.order_by.push(OrderClause {
            column: column.into(),
            direction,
        });
        self
    }

    /// Adds an ascending ORDER BY clause.
    pub fn order_asc(&mut self, column: impl Into<String>) -> &mut Self {
        self.order_by(column, Direction::Asc)
    }

    /// Adds a descending ORDER BY clause.
    pub fn order_desc(&mut self, column: impl Into<String>) -> &mut Self {
        self.order_by(column, Direction::Desc)
    }

    /// Accumulates GROUP BY columns; repeated calls extend the list.
    pub fn group_by<I>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.state
            .group_by
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// Adds a HAVING condition. HAVING predicates always join with AND.
    pub fn having(
        &mut self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.state.having.push(Predicate::Simple {
            combinator: Combinator::And,
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
        });
        self
    }

    /// Shorthand for [`having`](Self::having) with the `=` operator.
    pub fn having_eq(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.having(column, "=", value)
    }

    /// Limits the number of result rows.
    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.state.limit = Some(limit);
        self
    }

    /// Skips the given number of result rows. Only valid together with a
    /// limit; a select with an offset but no limit fails to compile.
    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.state.offset = Some(offset);
        self
    }

    /// Sets pagination params. Pages are 1-based; page 0 reads as page 1.
    pub fn page(&mut self, page: u64, per_page: u64) -> &mut Self {
        self.limit(per_page)
            .offset(page.saturating_sub(1) * per_page)
    }

    /// Restores the builder to its freshly-created form, dropping all
    /// accumulated clauses and the recorded compiled query.
    pub fn reset(&mut self) -> &mut Self {
        self.state = QueryState::default();
        self.compiled = None;
        self
    }

    /// Compiles the SELECT for the current state without executing it.
    ///
    /// The compiled query is also recorded for [`last_query`](Self::last_query).
    pub fn to_sql(&mut self) -> Result<CompiledQuery> {
        let compiled = compile_select(&self.state)?;
        self.compiled = Some(compiled.clone());
        Ok(compiled)
    }

    /// The most recently compiled query, from any terminal operation or
    /// [`to_sql`](Self::to_sql). `None` until something compiles.
    pub fn last_query(&self) -> Option<&CompiledQuery> {
        self.compiled.as_ref()
    }

    /// Executes the SELECT and returns all rows as dynamic column/value
    /// mappings.
    pub fn get(&mut self) -> Result<Vec<Row>> {
        let compiled = compile_select(&self.state)?;
        let rows = self.fetch_rows(&compiled)?;
        self.compiled = Some(compiled);
        Ok(rows)
    }

    /// Executes the SELECT and maps each row through [`FromRow`].
    pub fn get_as<T: FromRow>(&mut self) -> Result<Vec<T>> {
        let compiled = compile_select(&self.state)?;
        let rows = self.fetch_rows_as(&compiled)?;
        self.compiled = Some(compiled);
        Ok(rows)
    }

    /// Executes the SELECT with `LIMIT 1` and returns the row, if any.
    ///
    /// An absent row is `Ok(None)`, never an error.
    pub fn first(&mut self) -> Result<Option<Row>> {
        self.limit(1);
        Ok(self.get()?.pop())
    }

    /// Typed variant of [`first`](Self::first).
    pub fn first_as<T: FromRow>(&mut self) -> Result<Option<T>> {
        self.limit(1);
        Ok(self.get_as()?.pop())
    }

    /// Counts the rows matching the accumulated joins and predicates.
    pub fn count(&mut self) -> Result<u64> {
        let compiled = compile_count(&self.state)?;
        let total = self.query_scalar(&compiled)?;
        self.compiled = Some(compiled);
        Ok(total)
    }

    /// Whether any row matches the accumulated joins and predicates.
    pub fn exists(&mut self) -> Result<bool> {
        Ok(self.count()? > 0)
    }

    /// Inserts one row from ordered `(column, value)` pairs and returns the
    /// identity key of the inserted row.
    pub fn insert<I, K, V>(&mut self, values: I) -> Result<i64>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let values: Vec<(String, Value)> = values
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .collect();
        let compiled = compile_insert(&self.state, &values)?;

        let id = {
            let conn = self.lock()?;
            let params_ref: Vec<&dyn ToSql> =
                compiled.params.iter().map(|p| p as &dyn ToSql).collect();
            debug!("executing insert: {}", compiled.sql);
            conn.execute(&compiled.sql, params_ref.as_slice())?;
            conn.last_insert_rowid()
        };

        self.compiled = Some(compiled);
        Ok(id)
    }

    /// Updates matching rows from ordered `(column, value)` pairs and
    /// returns the affected row count. SET parameters bind before WHERE
    /// parameters.
    pub fn update<I, K, V>(&mut self, values: I) -> Result<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let values: Vec<(String, Value)> = values
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .collect();
        let compiled = compile_update(&self.state, &values)?;
        let affected = self.execute(&compiled)?;
        self.compiled = Some(compiled);
        Ok(affected)
    }

    /// Deletes matching rows and returns the affected row count.
    pub fn delete(&mut self) -> Result<usize> {
        let compiled = compile_delete(&self.state)?;
        let affected = self.execute(&compiled)?;
        self.compiled = Some(compiled);
        Ok(affected)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.db.lock().map_err(|_| QueryError::Poisoned)
    }

    fn fetch_rows(&self, compiled: &CompiledQuery) -> Result<Vec<Row>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&compiled.sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let params_ref: Vec<&dyn ToSql> =
            compiled.params.iter().map(|p| p as &dyn ToSql).collect();
        debug!("executing select: {}", compiled.sql);
        let rows = stmt.query_map(params_ref.as_slice(), |row| {
            Row::from_rusqlite(row, &columns)
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn fetch_rows_as<T: FromRow>(&self, compiled: &CompiledQuery) -> Result<Vec<T>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&compiled.sql)?;

        let params_ref: Vec<&dyn ToSql> =
            compiled.params.iter().map(|p| p as &dyn ToSql).collect();
        debug!("executing select: {}", compiled.sql);
        let rows = stmt.query_map(params_ref.as_slice(), T::from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn query_scalar(&self, compiled: &CompiledQuery) -> Result<u64> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&compiled.sql)?;

        let params_ref: Vec<&dyn ToSql> =
            compiled.params.iter().map(|p| p as &dyn ToSql).collect();
        Ok(stmt.query_row(params_ref.as_slice(), |row| row.get(0))?)
    }

    fn execute(&self, compiled: &CompiledQuery) -> Result<usize> {
        let conn = self.lock()?;
        let params_ref: Vec<&dyn ToSql> =
            compiled.params.iter().map(|p| p as &dyn ToSql).collect();
        debug!("executing: {}", compiled.sql);
        Ok(conn.execute(&compiled.sql, params_ref.as_slice())?)
    }
}
