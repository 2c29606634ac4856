//! The query builder.
//!
//! [`QueryBuilder`] accumulates clause state through chainable methods and
//! compiles it, one function per terminal verb, into a [`CompiledQuery`]:
//! SQL text plus a parameter list whose order matches the `?` placeholders
//! left to right. Positional alignment is the module's central contract;
//! predicates append their bound values while rendering, so text and
//! parameters cannot drift apart.
//!
//! # Submodules
//!
//! - [`builder`] — the fluent [`QueryBuilder`] and execution dispatch.
//! - [`clause`] — predicate, join, and ordering state plus shared rendering.
//! - [`state`] — the accumulated build state and [`CompiledQuery`].
//! - [`select`], [`insert`], [`update`], [`delete`] — per-verb compilation.

pub mod builder;
pub mod clause;
pub mod delete;
pub mod insert;
pub mod select;
pub mod state;
pub mod update;

pub use builder::QueryBuilder;
pub use clause::Direction;
pub use state::CompiledQuery;
