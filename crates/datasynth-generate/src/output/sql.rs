use std::io::Write;
use std::sync::OnceLock;

use regex::Regex;

use datasynth_core::Record;

use crate::errors::GenerationError;
use crate::output::{OutputFormat, RecordWriter};

pub const DEFAULT_TABLE: &str = "generated_data";

/// `CREATE TABLE` plus one `INSERT` per record.
///
/// Every column is `VARCHAR(255)` and every value is written as quoted text;
/// nested records use their display form. A key missing from a record is
/// written as an unquoted `NULL` rather than the text `'null'`.
#[derive(Debug, Clone)]
pub struct SqlWriter {
    table: String,
}

impl SqlWriter {
    pub fn new(table: impl Into<String>) -> Result<Self, GenerationError> {
        let table = table.into();
        if table.trim().is_empty() {
            return Err(GenerationError::InvalidArgument(
                "sql table name must not be blank".to_string(),
            ));
        }
        Ok(Self {
            table: sanitize_identifier(table.trim()),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

impl Default for SqlWriter {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl RecordWriter for SqlWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Sql
    }

    fn write_records(
        &self,
        records: &[Record],
        out: &mut dyn Write,
    ) -> Result<(), GenerationError> {
        let columns = collect_columns(records);
        let column_list = columns
            .iter()
            .map(|column| sanitize_identifier(column))
            .collect::<Vec<_>>();

        writeln!(out, "-- Generated data table")?;
        writeln!(out, "CREATE TABLE IF NOT EXISTS {} (", self.table)?;
        let definitions = column_list
            .iter()
            .map(|column| format!("    {column} VARCHAR(255)"))
            .collect::<Vec<_>>()
            .join(",\n");
        writeln!(out, "{definitions}")?;
        writeln!(out, ");")?;

        writeln!(out)?;
        writeln!(out, "-- Data inserts")?;
        let column_list = column_list.join(", ");
        for record in records {
            let values = columns
                .iter()
                .map(|column| match record.get(column) {
                    Some(value) => format!("'{}'", escape_sql(&value.to_string())),
                    None => "NULL".to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(
                out,
                "INSERT INTO {} ({column_list}) VALUES ({values});",
                self.table
            )?;
        }

        Ok(())
    }
}

/// Union of record keys in first-seen order.
fn collect_columns(records: &[Record]) -> Vec<&str> {
    let mut columns: Vec<&str> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.contains(&key) {
                columns.push(key);
            }
        }
    }
    columns
}

/// Replace every character outside `[a-zA-Z0-9_]` with `_`.
pub fn sanitize_identifier(name: &str) -> String {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    let invalid = INVALID.get_or_init(|| {
        Regex::new("[^a-zA-Z0-9_]").unwrap_or_else(|err| unreachable!("static regex: {err}"))
    });
    invalid.replace_all(name, "_").into_owned()
}

fn escape_sql(value: &str) -> String {
    value.replace('\'', "''")
}
