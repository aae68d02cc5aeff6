//! # MySQL Database Adapter
//!
//! An implementation of the [`Db`] port using the [`mysql`] driver crate.
//!
//! ## Responsibilities
//! - Convert generic [`Param`] values into [`mysql::Value`]
//! - Convert [`mysql::Row`] into a generic [`Row`]
//! - Implement `fetch_one`, `fetch_all` and `exec` on top of `mysql::Pool`
//!
//! ## Testing Policy
//! Unit tests cover the pure conversion functions only. Query execution
//! needs a live server and is exercised through the [`Db`] fakes used by
//! the helpers' tests.

use anyhow::{Context, Result};
use mysql::{prelude::*, Error as MyError, Params, Value as My};

use crate::config::db::DbPool;
use crate::db::port::{Db, Param, Row as GRow, Value};

fn mysql_err_summary(e: &MyError) -> String {
    match e {
        MyError::MySqlError(me) => format!(
            "code={}, state={}, message={}",
            me.code, me.state, me.message
        ),
        MyError::DriverError(de) => format!("driver={de:?}"),
        MyError::UrlError(ue) => format!("url={ue:?}"),
        MyError::IoError(ioe) => format!("io={ioe}"),
        MyError::CodecError(ce) => format!("codec={ce:?}"),
        MyError::FromValueError(fve) => format!("from_value={fve:?}"),
        MyError::FromRowError(fre) => format!("from_row={fre:?}"),
    }
}

/// MySQL implementation of the [`Db`] port.
///
/// Wraps a shared connection pool; errors are propagated as [`anyhow::Error`]
/// and logged with the driver's error summary.
#[derive(Clone)]
pub struct MySqlDb {
    pool: DbPool,
}

impl MySqlDb {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Converts a single [`Param`] into a [`mysql::Value`].
    ///
    /// `Str` is sent as `Bytes`.
    fn to_mysql_value(p: &Param) -> My {
        match p {
            Param::Str(s) => My::Bytes(s.as_bytes().to_vec()),
            Param::Null => My::NULL,
        }
    }

    fn to_mysql_params(params_in: &[Param]) -> Params {
        if params_in.is_empty() {
            return Params::Empty;
        }
        Params::Positional(params_in.iter().map(Self::to_mysql_value).collect())
    }

    /// Converts a driver value into a generic [`Value`].
    ///
    /// Dates and times are stringified; the helpers in this crate only
    /// read text and integer columns.
    fn value_from_mysql(v: My) -> Value {
        match v {
            My::NULL => Value::Null,
            My::Int(i) => Value::I64(i),
            My::UInt(u) => Value::U64(u),
            My::Float(f) => Value::F64(f64::from(f)),
            My::Double(f) => Value::F64(f),
            My::Bytes(b) => match String::from_utf8(b) {
                Ok(s) => Value::Str(s),
                Err(e) => Value::Str(String::from_utf8_lossy(e.as_bytes()).into_owned()),
            },
            My::Date(y, m, d, hh, mm, ss, _) => {
                Value::Str(format!("{y:04}-{m:02}-{d:02} {hh:02}:{mm:02}:{ss:02}"))
            }
            My::Time(neg, days, hh, mm, ss, _) => {
                let sign = if neg { "-" } else { "" };
                Value::Str(format!("{sign}{days:03} {hh:02}:{mm:02}:{ss:02}"))
            }
        }
    }

    fn row_from_mysql(mut r: mysql::Row) -> GRow {
        let names: Vec<String> = r
            .columns_ref()
            .iter()
            .map(|c| c.name_str().to_string())
            .collect();

        let mut out = GRow::default();
        for (idx, name) in names.into_iter().enumerate() {
            let v = r
                .take_opt::<My, _>(idx)
                .unwrap_or(Ok(My::NULL))
                .unwrap_or(My::NULL);
            out.insert(name, Self::value_from_mysql(v));
        }
        out
    }

    fn log_failure(op: &str, sql: &str, e: &MyError) {
        tracing::error!(op, sql, error = %mysql_err_summary(e), "query failed");
    }
}

impl Db for MySqlDb {
    fn fetch_one(&self, sql: &str, params_in: &[Param]) -> Result<Option<GRow>> {
        let mut conn = self.pool.get_conn().context("get_conn failed")?;
        tracing::debug!(sql, params = ?params_in, "fetch_one");

        let row = conn
            .exec_first::<mysql::Row, _, _>(sql, Self::to_mysql_params(params_in))
            .inspect_err(|e| Self::log_failure("fetch_one", sql, e))
            .context("exec_first failed")?;

        Ok(row.map(Self::row_from_mysql))
    }

    fn fetch_all(&self, sql: &str, params_in: &[Param]) -> Result<Vec<GRow>> {
        let mut conn = self.pool.get_conn().context("get_conn failed")?;
        tracing::debug!(sql, params = ?params_in, "fetch_all");

        let rows = conn
            .exec::<mysql::Row, _, _>(sql, Self::to_mysql_params(params_in))
            .inspect_err(|e| Self::log_failure("fetch_all", sql, e))
            .context("exec (fetch_all) failed")?;
        tracing::debug!(rows = rows.len(), "fetch_all done");

        Ok(rows.into_iter().map(Self::row_from_mysql).collect())
    }

    fn exec(&self, sql: &str, params_in: &[Param]) -> Result<u64> {
        let mut conn = self.pool.get_conn().context("get_conn failed")?;
        tracing::debug!(sql, params = ?params_in, "exec");

        conn.exec_drop(sql, Self::to_mysql_params(params_in))
            .inspect_err(|e| Self::log_failure("exec", sql, e))
            .context("exec_drop failed")?;

        Ok(conn.affected_rows())
    }
}
