//! Record-source capability: connect, query, disconnect.
//!
//! The pipeline core never depends on a concrete backend, only on these
//! traits. [`Session`] scopes a connection so that `disconnect` runs on
//! every exit path, including early returns through `?`.
//!
//! [`DirectorySource`] is a read-only backend where each table is a
//! tab-separated file inside a directory.

use std::fs;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::SourceError;

/// One fetched row: its column values in order.
pub type Row = Vec<String>;

/// All rows returned by a query.
pub type Rows = Vec<Row>;

/// Something that hands out connections.
pub trait RecordSource {
    type Connection: Connection;

    fn connect(&self) -> Result<Self::Connection, SourceError>;
}

/// An open connection.
pub trait Connection {
    fn query(&mut self, sql: &str) -> Result<Rows, SourceError>;

    /// Release the connection. Calling it more than once is a no-op.
    fn disconnect(&mut self);
}

/// Scoped connection: disconnects when dropped.
pub struct Session<C: Connection> {
    conn: C,
}

impl<C: Connection> Session<C> {
    pub fn open<S>(source: &S) -> Result<Self, SourceError>
    where
        S: RecordSource<Connection = C>,
    {
        let conn = source.connect()?;
        debug!("session opened");
        Ok(Self { conn })
    }
}

impl<C: Connection> Deref for Session<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.conn
    }
}

impl<C: Connection> DerefMut for Session<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.conn
    }
}

impl<C: Connection> Drop for Session<C> {
    fn drop(&mut self) {
        self.conn.disconnect();
        debug!("session closed");
    }
}

/// Fetch every row of `table`.
///
/// The connection is released before this returns, whether or not the
/// query succeeded.
pub fn fetch_all<S: RecordSource>(source: &S, table: &str) -> Result<Rows, SourceError> {
    let mut session = Session::<S::Connection>::open(source)?;
    let rows = session.query(&format!("SELECT * FROM {table}"))?;
    info!(table, rows = rows.len(), "fetched rows");
    Ok(rows)
}

/// Parse `SELECT * FROM <table>` and return the table name.
///
/// Keywords are case-insensitive; a trailing `;` is allowed. The table name
/// must be a plain identifier.
fn parse_select_all(sql: &str) -> Result<&str, SourceError> {
    let reject = |reason: &str| SourceError::Query {
        sql: sql.to_string(),
        reason: reason.to_string(),
    };

    let stmt = sql.trim().trim_end_matches(';').trim_end();
    let mut words = stmt.split_whitespace();
    let keywords_ok = matches!(
        (words.next(), words.next(), words.next()),
        (Some(s), Some("*"), Some(f))
            if s.eq_ignore_ascii_case("select") && f.eq_ignore_ascii_case("from")
    );
    if !keywords_ok {
        return Err(reject("only SELECT * FROM <table> is supported"));
    }

    let table = words.next().ok_or_else(|| reject("missing table name"))?;
    if words.next().is_some() {
        return Err(reject("unexpected tokens after table name"));
    }
    let valid = table
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(reject("invalid table name"));
    }
    Ok(table)
}

/// Read-only source backed by a directory of `<table>.tsv` files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl RecordSource for DirectorySource {
    type Connection = DirectoryConnection;

    fn connect(&self) -> Result<DirectoryConnection, SourceError> {
        if !self.root.is_dir() {
            return Err(SourceError::Connect(format!(
                "'{}' is not a directory",
                self.root.display()
            )));
        }
        Ok(DirectoryConnection {
            root: Some(self.root.clone()),
        })
    }
}

/// Connection handed out by [`DirectorySource`].
#[derive(Debug)]
pub struct DirectoryConnection {
    root: Option<PathBuf>,
}

impl DirectoryConnection {
    pub fn is_open(&self) -> bool {
        self.root.is_some()
    }
}

impl Connection for DirectoryConnection {
    fn query(&mut self, sql: &str) -> Result<Rows, SourceError> {
        let root = self.root.as_ref().ok_or(SourceError::NotConnected)?;
        let table = parse_select_all(sql)?;
        let path = root.join(format!("{table}.tsv"));
        if !path.is_file() {
            return Err(SourceError::UnknownTable(table.to_string()));
        }

        let text = fs::read_to_string(&path)?;
        let rows: Rows = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split('\t').map(str::to_string).collect())
            .collect();
        Ok(rows)
    }

    fn disconnect(&mut self) {
        self.root = None;
    }
}
