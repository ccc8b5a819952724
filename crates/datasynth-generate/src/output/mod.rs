//! Serializers for synthesized record sequences.
//!
//! The CSV writer silently skips an empty sequence; the JSON, SQL and XML
//! writers reject it with `InvalidArgument`.

pub mod csv;
pub mod json;
pub mod sql;
pub mod xml;

use std::fmt;
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use datasynth_core::Record;

use crate::errors::GenerationError;

pub use self::csv::CsvWriter;
pub use self::json::JsonWriter;
pub use self::sql::SqlWriter;
pub use self::xml::XmlWriter;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Csv,
    Json,
    Sql,
    Xml,
}

impl OutputFormat {
    pub const ALL: &'static [OutputFormat] = &[
        OutputFormat::Csv,
        OutputFormat::Json,
        OutputFormat::Sql,
        OutputFormat::Xml,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Sql => "sql",
            OutputFormat::Xml => "xml",
        }
    }

    pub fn extension(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .iter()
            .copied()
            .find(|format| format.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| GenerationError::InvalidArgument(format!("unknown output format '{value}'")))
    }
}

/// What a writer does with an empty record sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyPolicy {
    /// Produce nothing and succeed.
    Skip,
    /// Fail with `InvalidArgument`.
    Reject,
}

/// Writer-specific settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterOptions {
    pub csv_delimiter: char,
    pub sql_table: String,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            csv_delimiter: csv::DEFAULT_DELIMITER,
            sql_table: sql::DEFAULT_TABLE.to_string(),
        }
    }
}

/// Serializes a record sequence to one target format.
pub trait RecordWriter {
    fn format(&self) -> OutputFormat;

    fn empty_policy(&self) -> EmptyPolicy {
        EmptyPolicy::Reject
    }

    /// Serialize a non-empty sequence.
    fn write_records(&self, records: &[Record], out: &mut dyn Write)
    -> Result<(), GenerationError>;

    /// Serialize `records` to `out`, applying the empty-input policy.
    fn write_to(&self, records: &[Record], out: &mut dyn Write) -> Result<(), GenerationError> {
        if !accepts(self, records)? {
            return Ok(());
        }
        self.write_records(records, out)
    }

    /// Serialize `records` to a file, creating parent directories. Returns
    /// the number of bytes written. I/O failures surface as `Export`.
    fn export(&self, records: &[Record], path: &Path) -> Result<u64, GenerationError> {
        if !accepts(self, records)? {
            return Ok(0);
        }

        let format = self.format().as_str();
        let wrap = |source: std::io::Error| GenerationError::Export { format, source };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent).map_err(wrap)?;
        }

        let file = File::create(path).map_err(wrap)?;
        let mut counting = CountingWriter::new(BufWriter::new(file));
        self.write_records(records, &mut counting)
            .map_err(|err| match io_source(err) {
                Ok(source) => wrap(source),
                Err(other) => other,
            })?;
        counting.flush().map_err(wrap)?;

        let bytes = counting.bytes_written();
        info!(
            format,
            path = %path.display(),
            records = records.len(),
            bytes,
            "export written"
        );
        Ok(bytes)
    }
}

fn accepts<W: RecordWriter + ?Sized>(
    writer: &W,
    records: &[Record],
) -> Result<bool, GenerationError> {
    if !records.is_empty() {
        return Ok(true);
    }
    match writer.empty_policy() {
        EmptyPolicy::Skip => {
            debug!(format = %writer.format(), "no records to export");
            Ok(false)
        }
        EmptyPolicy::Reject => Err(GenerationError::InvalidArgument(format!(
            "{} export requires at least one record",
            writer.format()
        ))),
    }
}

/// Pull the underlying I/O error out of a writer failure, whichever
/// serializer reported it.
fn io_source(err: GenerationError) -> Result<std::io::Error, GenerationError> {
    match err {
        GenerationError::Io(source) => Ok(source),
        GenerationError::Csv(err) if err.is_io_error() => match err.into_kind() {
            ::csv::ErrorKind::Io(source) => Ok(source),
            kind => Ok(std::io::Error::other(format!("{kind:?}"))),
        },
        GenerationError::Json(err) if err.is_io() => Ok(std::io::Error::from(err)),
        other => Err(other),
    }
}

/// Build the writer for a format.
pub fn writer_for(
    format: OutputFormat,
    options: &WriterOptions,
) -> Result<Box<dyn RecordWriter>, GenerationError> {
    let writer: Box<dyn RecordWriter> = match format {
        OutputFormat::Csv => Box::new(CsvWriter::with_delimiter(options.csv_delimiter)?),
        OutputFormat::Json => Box::new(JsonWriter),
        OutputFormat::Sql => Box::new(SqlWriter::new(options.sql_table.clone())?),
        OutputFormat::Xml => Box::new(XmlWriter),
    };
    Ok(writer)
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formats_case_insensitively() {
        assert_eq!("CSV".parse::<OutputFormat>().ok(), Some(OutputFormat::Csv));
        assert_eq!("xml".parse::<OutputFormat>().ok(), Some(OutputFormat::Xml));
        assert!(matches!(
            "yaml".parse::<OutputFormat>(),
            Err(GenerationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn writer_for_matches_format() {
        let options = WriterOptions::default();
        for format in OutputFormat::ALL {
            let writer = writer_for(*format, &options).expect("writer");
            assert_eq!(writer.format(), *format);
        }
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let options = WriterOptions {
            csv_delimiter: '§',
            ..WriterOptions::default()
        };
        assert!(matches!(
            writer_for(OutputFormat::Csv, &options),
            Err(GenerationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn only_csv_skips_empty_input() {
        let options = WriterOptions::default();
        for format in OutputFormat::ALL {
            let writer = writer_for(*format, &options).expect("writer");
            let mut out = Vec::new();
            let result = writer.write_to(&[], &mut out);
            if *format == OutputFormat::Csv {
                assert!(result.is_ok());
                assert!(out.is_empty());
            } else {
                assert!(matches!(result, Err(GenerationError::InvalidArgument(_))));
            }
        }
    }

    #[test]
    fn serializer_io_failures_expose_their_source() {
        let denied = || std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");

        let csv_err = GenerationError::Csv(::csv::Error::from(denied()));
        let source = io_source(csv_err).expect("csv io source");
        assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);

        let json_err = GenerationError::Json(serde_json::Error::io(denied()));
        let source = io_source(json_err).expect("json io source");
        assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);

        let syntax = serde_json::from_str::<serde_json::Value>("{").expect_err("syntax error");
        assert!(matches!(
            io_source(GenerationError::Json(syntax)),
            Err(GenerationError::Json(_))
        ));
    }
}
