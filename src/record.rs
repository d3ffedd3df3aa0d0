//! Raw token records and the column schema
//!
//! A treebank line is a fixed sequence of tab-separated columns. The schema
//! is a constant; records are populated positionally from a split line, never
//! through a runtime-built column map.

/// Column order of the tabular format. The last two columns are carried by
/// the format but unused here.
pub const COLUMNS: [&str; 10] = [
    "ID", "FORM", "LEMMA", "CPOS", "FPOS", "MORPHO", "HEAD", "LABEL", "DEPS", "MISC",
];

/// One raw token line, split into its annotated columns.
///
/// All fields are kept as text; interpretation (head parsing, morphology
/// parsing, index remapping) happens in the assembler. `line_num` is the
/// physical 1-based line the record came from, for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub line_num: usize,
    pub id: String,
    pub form: String,
    pub lemma: String,
    pub cpos: String,
    pub fpos: String,
    pub morpho: String,
    pub head: String,
    pub label: String,
}

impl RawRecord {
    /// Build a record from a full set of columns, in schema order.
    ///
    /// The caller has already verified that `fields.len() == COLUMNS.len()`.
    /// DEPS and MISC are dropped.
    pub fn from_fields(line_num: usize, fields: &[&str]) -> Self {
        Self {
            line_num,
            id: fields[0].to_string(),
            form: fields[1].to_string(),
            lemma: fields[2].to_string(),
            cpos: fields[3].to_string(),
            fpos: fields[4].to_string(),
            morpho: fields[5].to_string(),
            head: fields[6].to_string(),
            label: fields[7].to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_positional() {
        let fields = vec![
            "1", "chat", "chat", "NOUN", "NC", "Gender=Masc", "2", "nsubj", "_", "_",
        ];
        let record = RawRecord::from_fields(7, &fields);

        assert_eq!(record.line_num, 7);
        assert_eq!(record.id, "1");
        assert_eq!(record.form, "chat");
        assert_eq!(record.lemma, "chat");
        assert_eq!(record.cpos, "NOUN");
        assert_eq!(record.fpos, "NC");
        assert_eq!(record.morpho, "Gender=Masc");
        assert_eq!(record.head, "2");
        assert_eq!(record.label, "nsubj");
    }

    #[test]
    fn test_schema_width() {
        assert_eq!(COLUMNS.len(), 10);
        assert_eq!(COLUMNS[6], "HEAD");
    }
}
