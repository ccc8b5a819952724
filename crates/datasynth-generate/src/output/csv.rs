use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use datasynth_core::Record;

use crate::errors::GenerationError;
use crate::output::{EmptyPolicy, OutputFormat, RecordWriter};

pub const DEFAULT_DELIMITER: char = ',';

/// Delimited text with a header row taken from the first record.
///
/// Nested records are flattened to their display form. Fields containing
/// the delimiter, a quote or a line break are quoted.
#[derive(Debug, Clone)]
pub struct CsvWriter {
    delimiter: u8,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER as u8,
        }
    }

    pub fn with_delimiter(delimiter: char) -> Result<Self, GenerationError> {
        let delimiter = u8::try_from(delimiter)
            .ok()
            .filter(|byte| byte.is_ascii() && *byte != b'"' && *byte != b'\n' && *byte != b'\r')
            .ok_or_else(|| {
                GenerationError::InvalidArgument(format!(
                    "csv delimiter must be a single ASCII character, got {delimiter:?}"
                ))
            })?;
        Ok(Self { delimiter })
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordWriter for CsvWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn empty_policy(&self) -> EmptyPolicy {
        EmptyPolicy::Skip
    }

    fn write_records(
        &self,
        records: &[Record],
        out: &mut dyn Write,
    ) -> Result<(), GenerationError> {
        let Some(first) = records.first() else {
            return Ok(());
        };

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(out);

        let header: Vec<&str> = first.keys().collect();
        writer.write_record(&header)?;

        for record in records {
            let row: Vec<String> = header
                .iter()
                .map(|key| record.get(key).map(ToString::to_string).unwrap_or_default())
                .collect();
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }
}
