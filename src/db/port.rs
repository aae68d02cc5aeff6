//! # Database Port (Synchronous)
//!
//! Defines an abstract data-store interface (`Db`) and supporting types
//! used by adapters such as the MySQL implementation.
//!
//! - [`Param`]: Represents SQL parameters.
//! - [`Value`] / [`Row`]: Generic owned data representations.
//! - [`Db`]: Minimal operations (`fetch_one`, `fetch_all`, `exec`).
//!
//! # Example
//! ```rust,ignore
//! use spa_file_server::db::port::{Db, Param};
//! use spa_file_server::params;
//!
//! let ps = params!["ada@example.com"];
//! let n = db.exec("DELETE FROM users WHERE email = ?", &ps)?;
//! ```
use std::collections::HashMap;

use anyhow::{bail, Result};

/// SQL parameter types passed to a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Param<'a> {
    Str(&'a str),
    Null,
}

/// Generic owned database value used for row mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I64(i64),
    U64(u64),
    F64(f64),
    Str(String),
    Null,
}

/// Represents a single database row (column name → value map).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cols: HashMap<String, Value>,
}

impl<'a> From<&'a str> for Param<'a> {
    fn from(x: &'a str) -> Self {
        Param::Str(x)
    }
}

impl<'a> From<&'a String> for Param<'a> {
    fn from(x: &'a String) -> Self {
        Param::Str(x.as_str())
    }
}

impl<'a> From<Option<&'a str>> for Param<'a> {
    fn from(x: Option<&'a str>) -> Self {
        match x {
            Some(s) => Param::Str(s),
            None => Param::Null,
        }
    }
}

/// Builds a `Vec<Param>` for SQL queries.
///
/// # Example
/// ```rust
/// use spa_file_server::db::port::Param;
/// use spa_file_server::params;
///
/// let note: Option<&str> = None;
/// let ps = params!["Alice", note];
/// assert_eq!(ps[0], Param::Str("Alice"));
/// assert_eq!(ps[1], Param::Null);
/// ```
#[macro_export]
macro_rules! params {
    ($($x:expr),* $(,)?) => {{
        let mut v = Vec::<$crate::db::port::Param>::new();
        $( v.push($crate::db::port::Param::from($x)); )*
        v
    }};
}

impl Row {
    /// Inserts a new column (used by DB adapters and fakes).
    pub fn insert(&mut self, key: impl Into<String>, val: Value) {
        self.cols.insert(key.into(), val);
    }

    /// Builds a row from `(column, value)` pairs.
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        let mut row = Row::default();
        for (k, v) in pairs {
            row.insert(k, v);
        }
        row
    }

    /// Returns a `String` (only for `Value::Str`).
    pub fn get_string(&self, key: &str) -> Result<String> {
        match self.cols.get(key) {
            Some(Value::Str(s)) => Ok(s.clone()),
            _ => bail!("column `{key}` is not String"),
        }
    }
}

/// Data-store abstraction (synchronous).
pub trait Db: Send + Sync {
    fn fetch_one(&self, sql: &str, params: &[Param]) -> Result<Option<Row>>;

    fn fetch_all(&self, sql: &str, params: &[Param]) -> Result<Vec<Row>>;

    /// Execute a write operation (`INSERT`, `UPDATE`, `DELETE`).
    ///
    /// Returns affected row count.
    fn exec(&self, sql: &str, params: &[Param]) -> Result<u64>;
}
