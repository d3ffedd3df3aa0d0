//! Tag lexicon extraction
//!
//! Ad hoc consumer of the tabular format: builds a word form to coarse-POS
//! mapping straight from the byte stream, without going through the sentence
//! assembler. Lines that are not valid UTF-8 are counted and dropped rather
//! than aborting the scan, since real corpora occasionally carry mojibake
//! from earlier encoding conversions.

use crate::reader::open_treebank;
use bstr::io::BufReadExt;
use rustc_hash::FxHashMap;
use std::io::{self, BufRead};
use std::path::Path;

/// Word form to observed coarse-POS tags, in order of first observation.
#[derive(Debug, Default)]
pub struct Lexicon {
    entries: FxHashMap<String, Vec<String>>,
    skipped_lines: usize,
}

impl Lexicon {
    /// Build a lexicon from a treebank file (plain or gzipped).
    pub fn from_file(path: &Path) -> io::Result<Self> {
        Self::from_reader(open_treebank(path)?)
    }

    /// Build a lexicon from a byte stream.
    pub fn from_reader<R: BufRead>(input: R) -> io::Result<Self> {
        let mut lexicon = Lexicon::default();
        for line in input.byte_lines() {
            lexicon.observe(&line?);
        }
        Ok(lexicon)
    }

    fn observe(&mut self, line: &[u8]) {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() || line[0] == b'#' {
            return;
        }
        let Ok(text) = std::str::from_utf8(line) else {
            self.skipped_lines += 1;
            return;
        };

        let mut fields = text.split('\t');
        let form = fields.nth(1); // FORM
        let tag = fields.nth(1); // CPOS
        if let (Some(form), Some(tag)) = (form, tag) {
            let tags = self.entries.entry(form.to_string()).or_default();
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
    }

    /// Tags observed for a word form.
    pub fn tags(&self, form: &str) -> Option<&[String]> {
        self.entries.get(form).map(Vec::as_slice)
    }

    /// Number of distinct word forms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lines dropped because they were not valid UTF-8.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(form, tags)| (form.as_str(), tags.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_collects_tags_per_form() {
        let text = "# sent_id = a\n\
            1\tchat\tchat\tNOUN\tNC\t_\t0\troot\t_\t_\n\
            \n\
            1\tchat\tchat\tVERB\tV\t_\t0\troot\t_\t_\n\
            2\tchat\tchat\tNOUN\tNC\t_\t1\tdep\t_\t_\n\
            \n";
        let lexicon = Lexicon::from_reader(Cursor::new(text)).unwrap();

        assert_eq!(lexicon.len(), 1);
        assert_eq!(
            lexicon.tags("chat"),
            Some(&["NOUN".to_string(), "VERB".to_string()][..])
        );
        assert_eq!(lexicon.skipped_lines(), 0);
    }

    #[test]
    fn test_invalid_utf8_line_skipped() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"1\tc\xffur\tcoeur\tNOUN\tNC\t_\t0\troot\t_\t_\n");
        bytes.extend_from_slice(b"1\tchien\tchien\tNOUN\tNC\t_\t0\troot\t_\t_\n");
        let lexicon = Lexicon::from_reader(Cursor::new(bytes)).unwrap();

        assert_eq!(lexicon.skipped_lines(), 1);
        assert_eq!(lexicon.tags("chien"), Some(&["NOUN".to_string()][..]));
        assert!(lexicon.tags("chat").is_none());
    }

    #[test]
    fn test_short_lines_ignored() {
        let text = "garbage\n\n1\tchat\tchat\tNOUN\tNC\t_\t0\troot\t_\t_\n";
        let lexicon = Lexicon::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(lexicon.len(), 1);
    }
}
