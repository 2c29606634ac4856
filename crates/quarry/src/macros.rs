//! Macros for assembling ordered column/value lists.

/// Builds an ordered `Vec<(String, Value)>` for
/// [`insert`](crate::QueryBuilder::insert),
/// [`update`](crate::QueryBuilder::update), and
/// [`where_all`](crate::QueryBuilder::where_all).
///
/// Pair order is preserved, which fixes both the rendered column order and
/// the parameter order.
///
/// # Example
///
/// ```rust
/// use quarry::{values, Value};
///
/// let pairs = values! {
///     "name" => "ferris".to_string(),
///     "age" => 3,
/// };
/// assert_eq!(pairs[0].0, "name");
/// assert_eq!(pairs[1].1, Value::Integer(3));
/// ```
#[macro_export]
macro_rules! values {
    () => {
        ::std::vec::Vec::<(::std::string::String, $crate::Value)>::new()
    };
    ($($column:expr => $value:expr),+ $(,)?) => {
        ::std::vec![
            $(
                (
                    ::std::string::String::from($column),
                    $crate::Value::from($value),
                )
            ),+
        ]
    };
}
