use std::io::Write;

use quick_xml::escape::escape;

use datasynth_core::Record;

use crate::errors::GenerationError;
use crate::output::{OutputFormat, RecordWriter};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// `<dataset>` document with one `<record>` element per record and one child
/// element per key. Keys are used as element names after escaping, so keys
/// that are not valid XML names produce a document most parsers reject.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlWriter;

impl RecordWriter for XmlWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Xml
    }

    fn write_records(
        &self,
        records: &[Record],
        out: &mut dyn Write,
    ) -> Result<(), GenerationError> {
        writeln!(out, "{DECLARATION}")?;
        writeln!(out, "<dataset>")?;
        for record in records {
            writeln!(out, "  <record>")?;
            for (key, value) in record {
                let key = escape(key);
                let value = value.to_string();
                writeln!(out, "    <{key}>{}</{key}>", escape(value.as_str()))?;
            }
            writeln!(out, "  </record>")?;
        }
        writeln!(out, "</dataset>")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use datasynth_core::Value;

    use super::*;

    fn render(records: &[Record]) -> String {
        let mut out = Vec::new();
        XmlWriter.write_to(records, &mut out).expect("write xml");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn writes_declaration_and_records() {
        let mut record = Record::new();
        record.insert("name", Value::Text("Tom & \"Jerry\" <'cat'>".to_string()));
        record.insert("active", Value::Boolean(true));

        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<dataset>
  <record>
    <name>Tom &amp; &quot;Jerry&quot; &lt;&apos;cat&apos;&gt;</name>
    <active>true</active>
  </record>
</dataset>
";
        assert_eq!(render(&[record]), expected);
    }

    #[test]
    fn flattens_nested_records() {
        let mut address = Record::new();
        address.insert("street", Value::Text("main".to_string()));
        address.insert("zip", Value::Integer(42));
        let mut record = Record::new();
        record.insert("address", Value::Record(address));

        let xml = render(&[record.clone(), record]);
        assert_eq!(xml.matches("<record>").count(), 2);
        assert!(xml.contains("<address>{street=main, zip=42}</address>"));
    }

    #[test]
    fn empty_input_is_rejected() {
        let mut out = Vec::new();
        let result = XmlWriter.write_to(&[], &mut out);
        assert!(matches!(result, Err(GenerationError::InvalidArgument(_))));
        assert!(out.is_empty());
    }
}
