//! In-memory [`SqlExecutor`] for tests.
//!
//! Records every statement it receives and replays canned rows or failures,
//! so repository and HTTP tests run without PostgreSQL.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::StreamExt;
use futures::stream::{self, BoxStream};

use crate::statement::Statement;
use crate::traits::{SqlExecutor, StatementRow};

/// A canned result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRow(pub Vec<String>);

impl StatementRow for MockRow {
    fn get_text(&self, index: usize) -> Result<String, sqlx::Error> {
        self.0
            .get(index)
            .cloned()
            .ok_or(sqlx::Error::ColumnIndexOutOfBounds {
                index,
                len: self.0.len(),
            })
    }
}

#[derive(Debug, Default)]
struct MockState {
    rows: Vec<MockRow>,
    fetch_error: Option<String>,
    error_after_rows: Option<String>,
    fail_execute_at: Option<(usize, String)>,
    ping_error: Option<String>,
    row_delay: Option<Duration>,
    executed: Vec<Statement>,
    fetched: Vec<Statement>,
}

/// Mock executor with shared, inspectable state.
///
/// Clones share state, so a test can keep one handle while the repository
/// (or router) owns another.
#[derive(Debug, Clone, Default)]
pub struct MockExecutor {
    state: Arc<Mutex<MockState>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows returned by every fetch, each given as `(query, total_exec_time)`.
    pub fn with_rows(self, rows: &[(&str, &str)]) -> Self {
        self.lock().rows = rows
            .iter()
            .map(|(q, t)| MockRow(vec![q.to_string(), t.to_string()]))
            .collect();
        self
    }

    /// Rows with arbitrary columns, for exercising decode failures.
    pub fn with_raw_rows(self, rows: Vec<MockRow>) -> Self {
        self.lock().rows = rows;
        self
    }

    /// Fails fetches before any row is produced.
    pub fn failing_fetch(self, message: &str) -> Self {
        self.lock().fetch_error = Some(message.to_string());
        self
    }

    /// Fails fetches after all canned rows have been produced.
    pub fn failing_after_rows(self, message: &str) -> Self {
        self.lock().error_after_rows = Some(message.to_string());
        self
    }

    /// Fails the `call`-th execute (zero-based).
    pub fn failing_execute_at(self, call: usize, message: &str) -> Self {
        self.lock().fail_execute_at = Some((call, message.to_string()));
        self
    }

    pub fn failing_ping(self, message: &str) -> Self {
        self.lock().ping_error = Some(message.to_string());
        self
    }

    /// Sleeps before yielding each row.
    pub fn with_row_delay(self, delay: Duration) -> Self {
        self.lock().row_delay = Some(delay);
        self
    }

    /// Statements passed to `execute`, in call order.
    pub fn executed(&self) -> Vec<Statement> {
        self.lock().executed.clone()
    }

    /// Statements passed to `fetch`, in call order.
    pub fn fetched(&self) -> Vec<Statement> {
        self.lock().fetched.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the recorded calls
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SqlExecutor for MockExecutor {
    type Row = MockRow;

    async fn execute(&self, statement: &Statement) -> Result<u64, sqlx::Error> {
        let mut state = self.lock();
        let call = state.executed.len();
        state.executed.push(statement.clone());

        match &state.fail_execute_at {
            Some((at, message)) if *at == call => Err(sqlx::Error::Protocol(message.clone())),
            _ => Ok(0),
        }
    }

    fn fetch<'a>(&'a self, statement: &'a Statement) -> BoxStream<'a, Result<MockRow, sqlx::Error>> {
        let mut state = self.lock();
        state.fetched.push(statement.clone());

        let mut items: Vec<Result<MockRow, sqlx::Error>> = Vec::new();
        if let Some(message) = &state.fetch_error {
            items.push(Err(sqlx::Error::Protocol(message.clone())));
        } else {
            items.extend(state.rows.iter().cloned().map(Ok));
            if let Some(message) = &state.error_after_rows {
                items.push(Err(sqlx::Error::Protocol(message.clone())));
            }
        }

        match state.row_delay {
            Some(delay) => stream::iter(items)
                .then(move |item| async move {
                    tokio::time::sleep(delay).await;
                    item
                })
                .boxed(),
            None => stream::iter(items).boxed(),
        }
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        match &self.lock().ping_error {
            Some(message) => Err(sqlx::Error::Protocol(message.clone())),
            None => Ok(()),
        }
    }
}
