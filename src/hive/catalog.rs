//! Catalog query boundary
//!
//! [`Catalog`] is everything the supplier needs from a Hive-compatible endpoint:
//! `SHOW DATABASES`, `SHOW TABLES`, `DESCRIBE EXTENDED` and a zero-row `SELECT` used to
//! recover column shapes when `DESCRIBE` fails. Statements are rendered by [`Statement`],
//! which routes every identifier through [`quote_identifier`].
//!
//! [`FixtureCatalog`] answers from a YAML/JSON document and backs the CLI and tests.

use crate::hive::describe::{MetadataRow, ProbeColumn};
use crate::hive::identifiers::{quote_identifier, IdentifierError};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Errors produced by [`Catalog`] operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// The engine rejected or failed a statement.
    #[error("query `{statement}` failed: {message}")]
    Query { statement: String, message: String },

    #[error("unknown database '{0}'")]
    UnknownDatabase(String),

    #[error("unknown table '{database}.{table}'")]
    UnknownTable { database: String, table: String },

    #[error("cannot read catalog fixture {}: {source}", path.display())]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog fixture: {0}")]
    FixtureFormat(String),
}

/// Statements issued against the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    ShowDatabases,
    Use { database: &'a str },
    ShowTables,
    DescribeExtended { database: &'a str, table: &'a str },
    /// Zero-row select whose result metadata gives the column shapes
    Probe { database: &'a str, table: &'a str },
}

impl Statement<'_> {
    pub fn render(&self) -> Result<String, IdentifierError> {
        Ok(match self {
            Statement::ShowDatabases => "SHOW DATABASES".to_string(),
            Statement::Use { database } => format!("USE {}", quote_identifier(database)?),
            Statement::ShowTables => "SHOW TABLES".to_string(),
            Statement::DescribeExtended { database, table } => format!(
                "DESCRIBE EXTENDED {}.{}",
                quote_identifier(database)?,
                quote_identifier(table)?
            ),
            Statement::Probe { database, table } => format!(
                "SELECT * FROM {}.{} LIMIT 0",
                quote_identifier(database)?,
                quote_identifier(table)?
            ),
        })
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Ok(sql) => f.write_str(&sql),
            Err(err) => write!(f, "<invalid statement: {}>", err),
        }
    }
}

/// Query surface of a Hive-compatible engine
pub trait Catalog {
    fn show_databases(&mut self) -> Result<Vec<String>, CatalogError>;

    fn show_tables(&mut self, database: &str) -> Result<Vec<String>, CatalogError>;

    fn describe_extended(
        &mut self,
        database: &str,
        table: &str,
    ) -> Result<Vec<MetadataRow>, CatalogError>;

    fn probe_columns(
        &mut self,
        database: &str,
        table: &str,
    ) -> Result<Vec<ProbeColumn>, CatalogError>;
}

#[derive(Debug, Clone, Deserialize)]
struct FixtureDocument {
    #[serde(default)]
    databases: Vec<FixtureDatabase>,
}

#[derive(Debug, Clone, Deserialize)]
struct FixtureDatabase {
    name: String,
    #[serde(default)]
    tables: Vec<FixtureTable>,
}

#[derive(Debug, Clone, Deserialize)]
struct FixtureTable {
    name: String,
    /// `DESCRIBE EXTENDED` rows
    #[serde(default)]
    describe: Vec<MetadataRow>,
    /// When set, `DESCRIBE EXTENDED` fails with this message
    #[serde(default)]
    describe_error: Option<String>,
    /// Columns reported by the probe query
    #[serde(default)]
    columns: Vec<ProbeColumn>,
    /// When set, the probe query fails with this message
    #[serde(default)]
    probe_error: Option<String>,
}

/// A [`Catalog`] answering from a fixture document
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    databases: Vec<FixtureDatabase>,
}

fn query_failed(statement: &Statement<'_>, message: &str) -> CatalogError {
    CatalogError::Query {
        statement: statement.to_string(),
        message: message.to_string(),
    }
}

impl FixtureCatalog {
    pub fn from_yaml_str(source: &str) -> Result<Self, CatalogError> {
        let document: FixtureDocument = serde_yaml::from_str(source)
            .map_err(|e| CatalogError::FixtureFormat(e.to_string()))?;
        Ok(Self {
            databases: document.databases,
        })
    }

    pub fn from_json_str(source: &str) -> Result<Self, CatalogError> {
        let document: FixtureDocument = serde_json::from_str(source)
            .map_err(|e| CatalogError::FixtureFormat(e.to_string()))?;
        Ok(Self {
            databases: document.databases,
        })
    }

    /// Load a `.json` fixture, or YAML for any other extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| CatalogError::FixtureIo {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_yaml_str(&source),
        }
    }

    fn database(&self, database: &str) -> Result<&FixtureDatabase, CatalogError> {
        self.databases
            .iter()
            .find(|db| db.name == database)
            .ok_or_else(|| CatalogError::UnknownDatabase(database.to_string()))
    }

    fn table(&self, database: &str, table: &str) -> Result<&FixtureTable, CatalogError> {
        self.database(database)?
            .tables
            .iter()
            .find(|t| t.name == table)
            .ok_or_else(|| CatalogError::UnknownTable {
                database: database.to_string(),
                table: table.to_string(),
            })
    }
}

impl Catalog for FixtureCatalog {
    fn show_databases(&mut self) -> Result<Vec<String>, CatalogError> {
        debug!(statement = %Statement::ShowDatabases, "executing");
        Ok(self.databases.iter().map(|db| db.name.clone()).collect())
    }

    fn show_tables(&mut self, database: &str) -> Result<Vec<String>, CatalogError> {
        let use_database = Statement::Use { database };
        debug!(statement = %use_database.render()?, "executing");
        debug!(statement = %Statement::ShowTables, "executing");
        Ok(self
            .database(database)?
            .tables
            .iter()
            .map(|t| t.name.clone())
            .collect())
    }

    fn describe_extended(
        &mut self,
        database: &str,
        table: &str,
    ) -> Result<Vec<MetadataRow>, CatalogError> {
        let statement = Statement::DescribeExtended { database, table };
        debug!(statement = %statement.render()?, "executing");
        let fixture = self.table(database, table)?;
        match &fixture.describe_error {
            Some(message) => Err(query_failed(&statement, message)),
            None => Ok(fixture.describe.clone()),
        }
    }

    fn probe_columns(
        &mut self,
        database: &str,
        table: &str,
    ) -> Result<Vec<ProbeColumn>, CatalogError> {
        let statement = Statement::Probe { database, table };
        debug!(statement = %statement.render()?, "executing");
        let fixture = self.table(database, table)?;
        match &fixture.probe_error {
            Some(message) => Err(query_failed(&statement, message)),
            None => Ok(fixture.columns.clone()),
        }
    }
}
