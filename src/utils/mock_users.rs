//! # Mock Users
//!
//! Seeds and removes a fixed set of test users in the `users` table.
//!
//! Fixtures are read from a JSON array (see `json/mock-users.json`):
//!
//! ```json
//! [{ "firstName": "Ada", "lastName": "Lindqvist",
//!    "email": "ada.lindqvist@example.com", "password": "abC9#fgh" }]
//! ```
//!
//! Users are identified by email. Both operations are idempotent: creating
//! skips users already present, removing skips users already gone. Each
//! returns exactly the users it changed.
//!
//! # Example
//! ```rust,no_run
//! use spa_file_server::config::db::{create_pool, DbConfig};
//! use spa_file_server::db::mysql_adapter::MySqlDb;
//! use spa_file_server::utils::mock_users::{create_mock_users, load_mock_users};
//!
//! let db = MySqlDb::new(create_pool(&DbConfig::from_env()).unwrap());
//! let users = load_mock_users("json/mock-users.json").unwrap();
//! let added = create_mock_users(&db, &users).unwrap();
//! println!("added {} users", added.len());
//! ```
use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::db::port::Db;
use crate::params;

/// Path of the bundled fixture, relative to the crate root.
pub const MOCK_USERS_FILE: &str = "json/mock-users.json";

const SELECT_EMAILS: &str = "SELECT email FROM users";
const INSERT_USER: &str =
    "INSERT INTO users (email, firstName, lastName, role, password) VALUES (?, ?, ?, 'user', ?)";
const DELETE_USER: &str = "DELETE FROM users WHERE email = ?";

/// A test user as stored in the fixture file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Parses a JSON array of mock users.
pub fn parse_mock_users(json: &str) -> Result<Vec<MockUser>> {
    serde_json::from_str(json).context("invalid mock user JSON")
}

/// Reads and parses a mock-user fixture file.
pub fn load_mock_users(path: impl AsRef<Path>) -> Result<Vec<MockUser>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_mock_users(&json).with_context(|| format!("failed to parse {}", path.display()))
}

fn existing_emails(db: &dyn Db) -> Result<HashSet<String>> {
    db.fetch_all(SELECT_EMAILS, &[])?
        .iter()
        .map(|row| row.get_string("email"))
        .collect()
}

/// Inserts every user whose email is not yet in the `users` table.
///
/// Returns the users that were inserted, in fixture order.
pub fn create_mock_users(db: &dyn Db, users: &[MockUser]) -> Result<Vec<MockUser>> {
    let mut emails = existing_emails(db)?;
    let mut created = Vec::new();

    for user in users {
        if emails.contains(&user.email) {
            continue;
        }
        let ps = params![
            &user.email,
            &user.first_name,
            &user.last_name,
            &user.password
        ];
        db.exec(INSERT_USER, &ps)
            .with_context(|| format!("failed to insert mock user {}", user.email))?;

        emails.insert(user.email.clone());
        created.push(user.clone());
    }

    tracing::info!(created = created.len(), "mock users created");
    Ok(created)
}

/// Deletes every user from `users` that is present in the `users` table.
///
/// Returns the users that were removed, in fixture order.
pub fn remove_mock_users(db: &dyn Db, users: &[MockUser]) -> Result<Vec<MockUser>> {
    let mut emails = existing_emails(db)?;
    let mut removed = Vec::new();

    for user in users {
        if !emails.remove(&user.email) {
            continue;
        }
        db.exec(DELETE_USER, &params![&user.email])
            .with_context(|| format!("failed to remove mock user {}", user.email))?;

        removed.push(user.clone());
    }

    tracing::info!(removed = removed.len(), "mock users removed");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use anyhow::bail;

    use crate::db::port::{Param, Row, Value};

    /// In-memory `users` table keyed by email.
    #[derive(Default)]
    struct FakeDb {
        emails: Mutex<Vec<String>>,
        inserts: Mutex<Vec<Vec<String>>>,
        fail_writes: bool,
    }

    impl FakeDb {
        fn with_emails(emails: &[&str]) -> Self {
            Self {
                emails: Mutex::new(emails.iter().map(|e| e.to_string()).collect()),
                ..Default::default()
            }
        }

        fn emails(&self) -> Vec<String> {
            self.emails.lock().unwrap().clone()
        }
    }

    fn text(p: &Param) -> String {
        match p {
            Param::Str(s) => s.to_string(),
            other => panic!("expected text param, got {other:?}"),
        }
    }

    impl Db for FakeDb {
        fn fetch_one(&self, sql: &str, params: &[Param]) -> Result<Option<Row>> {
            Ok(self.fetch_all(sql, params)?.into_iter().next())
        }

        fn fetch_all(&self, sql: &str, _params: &[Param]) -> Result<Vec<Row>> {
            assert_eq!(sql, SELECT_EMAILS);
            Ok(self
                .emails()
                .into_iter()
                .map(|e| Row::from_pairs([("email", Value::Str(e))]))
                .collect())
        }

        fn exec(&self, sql: &str, params: &[Param]) -> Result<u64> {
            if self.fail_writes {
                bail!("write refused");
            }
            let values: Vec<String> = params.iter().map(text).collect();
            let mut emails = self.emails.lock().unwrap();

            if sql.starts_with("INSERT") {
                emails.push(values[0].clone());
                self.inserts.lock().unwrap().push(values);
                Ok(1)
            } else if sql.starts_with("DELETE") {
                let before = emails.len();
                emails.retain(|e| *e != values[0]);
                Ok((before - emails.len()) as u64)
            } else {
                bail!("unexpected SQL: {sql}");
            }
        }
    }

    fn fixture() -> Vec<MockUser> {
        load_mock_users(Path::new(env!("CARGO_MANIFEST_DIR")).join(MOCK_USERS_FILE)).unwrap()
    }

    #[test]
    fn fixture_parses() {
        let users = fixture();
        assert!(!users.is_empty());
        assert!(users.iter().all(|u| u.email.contains('@')));
    }

    #[test]
    fn parse_uses_camel_case_fields() {
        let users = parse_mock_users(
            r#"[{"firstName":"Ada","lastName":"L","email":"a@x.se","password":"p"}]"#,
        )
        .unwrap();
        assert_eq!(
            users,
            vec![MockUser {
                first_name: "Ada".into(),
                last_name: "L".into(),
                email: "a@x.se".into(),
                password: "p".into(),
            }]
        );
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = parse_mock_users(r#"[{"firstName":"Ada"}]"#).unwrap_err();
        assert!(format!("{err:#}").contains("invalid mock user JSON"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load_mock_users("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn create_only_inserts_users_not_in_db() {
        let users = fixture();
        let db = FakeDb::with_emails(&[users[0].email.as_str(), "someone@else.com"]);

        let expected: Vec<MockUser> = users[1..].to_vec();
        let created = create_mock_users(&db, &users).unwrap();

        assert_eq!(created, expected);
        assert_eq!(db.emails().len(), 2 + expected.len());

        let inserts = db.inserts.lock().unwrap();
        assert_eq!(
            inserts[0],
            vec![
                users[1].email.clone(),
                users[1].first_name.clone(),
                users[1].last_name.clone(),
                users[1].password.clone(),
            ]
        );
    }

    #[test]
    fn create_twice_adds_nothing_the_second_time() {
        let users = fixture();
        let db = FakeDb::default();

        assert_eq!(create_mock_users(&db, &users).unwrap().len(), users.len());
        assert!(create_mock_users(&db, &users).unwrap().is_empty());
    }

    #[test]
    fn create_skips_duplicate_fixture_entries() {
        let users = fixture();
        let doubled = vec![users[0].clone(), users[0].clone()];
        let db = FakeDb::default();

        let created = create_mock_users(&db, &doubled).unwrap();
        assert_eq!(created, vec![users[0].clone()]);
    }

    #[test]
    fn remove_only_deletes_users_in_db() {
        let users = fixture();
        let db = FakeDb::with_emails(&[
            users[0].email.as_str(),
            users[2].email.as_str(),
            "keep@me.com",
        ]);

        let removed = remove_mock_users(&db, &users).unwrap();

        assert_eq!(removed, vec![users[0].clone(), users[2].clone()]);
        assert_eq!(db.emails(), vec!["keep@me.com".to_string()]);
    }

    #[test]
    fn remove_after_create_round_trips_to_original_table() {
        let users = fixture();
        let db = FakeDb::with_emails(&["keep@me.com"]);

        let created = create_mock_users(&db, &users).unwrap();
        let removed = remove_mock_users(&db, &users).unwrap();

        assert_eq!(created, removed);
        assert_eq!(db.emails(), vec!["keep@me.com".to_string()]);
    }

    #[test]
    fn write_failures_are_propagated() {
        let users = fixture();
        let db = FakeDb {
            fail_writes: true,
            ..Default::default()
        };

        let err = create_mock_users(&db, &users).unwrap_err();
        assert!(format!("{err:#}").contains("failed to insert mock user"));
    }
}
