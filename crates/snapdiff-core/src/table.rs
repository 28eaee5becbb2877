//! Tabular view of a collection: one header row, one row per record.

use crate::errors::SnapDiffError;
use csv::{Terminator, WriterBuilder};
use crate::model::Collection;
use serde_json::Value;

/// Collection flattened to a header row plus value rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Render as delimited text with `delimiter` between cells and one line
    /// per row.
    ///
    /// Strings are written bare, null as an empty cell, and anything else as
    /// compact JSON. Cells holding the delimiter, a quote or a line break are
    /// quoted.
    ///
    /// # Errors
    ///
    /// - `TableRender`: the writer failed or produced invalid UTF-8
    pub fn render(&self, delimiter: u8) -> Result<String, SnapDiffError> {
        let mut writer = WriterBuilder::new()
            .delimiter(delimiter)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(cell_text))?;
        }

        let bytes = writer.into_inner().map_err(|e| SnapDiffError::TableRender {
            message: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|e| SnapDiffError::TableRender {
            message: e.to_string(),
        })
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build a [`Table`] whose columns are the fields of the first record.
///
/// Fields that later records lack become `null`; fields only later records
/// have are dropped.
///
/// # Errors
///
/// - `EmptyCollection`: there is no first record to take headers from
pub fn collection_to_table(collection: &Collection) -> Result<Table, SnapDiffError> {
    let first = collection
        .records()
        .first()
        .ok_or(SnapDiffError::EmptyCollection)?;
    let headers: Vec<String> = first.keys().cloned().collect();

    let rows = collection
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|h| record.get(h).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    Ok(Table { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headers_from_first_record() {
        let c: Collection =
            serde_json::from_str(r#"[{"ref":"A","qty":3},{"qty":5,"ref":"B","extra":true}]"#)
                .unwrap();
        let table = collection_to_table(&c).unwrap();
        assert_eq!(table.headers, vec!["ref", "qty"]);
        assert_eq!(table.rows[1], vec![json!("B"), json!(5)]);
    }

    #[test]
    fn test_missing_field_becomes_null() {
        let c: Collection = serde_json::from_str(r#"[{"ref":"A","qty":3},{"ref":"B"}]"#).unwrap();
        let table = collection_to_table(&c).unwrap();
        assert_eq!(table.rows[1][1], Value::Null);
        assert_eq!(table.render(b';').unwrap(), "ref;qty\nA;3\nB;\n");
    }

    #[test]
    fn test_render_quotes_delimiter_and_line_breaks() {
        let c: Collection =
            serde_json::from_str(r#"[{"ref":"A;B","name":"line1\nline2"},{"ref":"C","name":"say \"hi\""}]"#)
                .unwrap();
        let rendered = collection_to_table(&c).unwrap().render(b';').unwrap();

        assert_eq!(
            rendered,
            "ref;name\n\"A;B\";\"line1\nline2\"\nC;\"say \"\"hi\"\"\"\n"
        );

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_reader(rendered.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "A;B");
        assert_eq!(&rows[0][1], "line1\nline2");
        assert_eq!(&rows[1][1], "say \"hi\"");
    }

    #[test]
    fn test_render_non_string_cells_as_json() {
        let c: Collection =
            serde_json::from_str(r#"[{"ref":"A","price":{"amount":9.5},"active":true}]"#).unwrap();
        let rendered = collection_to_table(&c).unwrap().render(b',').unwrap();
        assert_eq!(rendered, "ref,price,active\nA,\"{\"\"amount\"\":9.5}\",true\n");
    }

    #[test]
    fn test_empty_collection_rejected() {
        let err = collection_to_table(&Collection::new()).unwrap_err();
        assert_eq!(err, SnapDiffError::EmptyCollection);
    }
}
