use std::io::Write;

use datasynth_core::Record;

use crate::errors::GenerationError;
use crate::output::{OutputFormat, RecordWriter};

/// Pretty-printed JSON array; nested records stay nested.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl JsonWriter {
    /// Render records as a JSON string.
    pub fn to_json_string(&self, records: &[Record]) -> Result<String, GenerationError> {
        let mut out = Vec::new();
        self.write_to(records, &mut out)?;
        String::from_utf8(out).map_err(|err| {
            GenerationError::InvalidArgument(format!("json output is not utf-8: {err}"))
        })
    }
}

impl RecordWriter for JsonWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn write_records(
        &self,
        records: &[Record],
        out: &mut dyn Write,
    ) -> Result<(), GenerationError> {
        serde_json::to_writer_pretty(&mut *out, records)?;
        out.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use datasynth_core::Value;

    use super::*;

    #[test]
    fn preserves_nesting_and_order() {
        let mut address = Record::new();
        address.insert("zip", Value::Text("75001".to_string()));

        let mut record = Record::new();
        record.insert("name", Value::Text("a\"b<c>".to_string()));
        record.insert("age", Value::Integer(30));
        record.insert("address", Value::Record(address));

        let json = JsonWriter.to_json_string(&[record]).expect("json");
        let expected = r#"[
  {
    "name": "a\"b<c>",
    "age": 30,
    "address": {
      "zip": "75001"
    }
  }
]
"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            JsonWriter.to_json_string(&[]),
            Err(GenerationError::InvalidArgument(_))
        ));
    }
}
