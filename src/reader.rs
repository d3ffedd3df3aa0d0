//! Tabular record reader
//!
//! Scans a line stream and emits one block of raw token records per
//! blank-line-terminated section, together with `# key = value` metadata and
//! the diagnostics produced while scanning. Multiword span headers are either
//! dropped (keeping the split tokenization) or merged with their two
//! sub-token lines into a single record.

use crate::diag::Diagnostic;
use crate::record::{COLUMNS, RawRecord};
use flate2::read::MultiGzDecoder;
use memchr::memmem;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines, Read};
use std::path::Path;

/// Error during treebank parsing
///
/// Structural errors are stream-fatal and carry the physical line number and
/// the raw content that triggered them.
#[derive(Debug)]
pub struct ParseError {
    pub line_num: usize,
    pub line: String,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line.is_empty() {
            write!(f, "Parse error at line {}: {}", self.line_num, self.message)
        } else {
            write!(
                f,
                "Parse error at line {}: {} in {:?}",
                self.line_num, self.message, self.line
            )
        }
    }
}

impl std::error::Error for ParseError {}

/// How to treat multiword span headers (ID of the form `X-Y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiword {
    /// Keep the split tokenization: drop the header, let the sub-token lines
    /// flow through as ordinary tokens.
    Keep,
    /// Fold the header and its two sub-token lines into one record whose form
    /// is the unsplit surface string and whose coarse POS is `POS1+POS2`.
    Merge,
}

/// Options shared by the reading pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    /// Stop after this many sentences, counted at blank lines.
    pub max_sentences: Option<usize>,
    /// Bracket each sentence with start/root sentinel positions.
    pub padded: bool,
    pub multiword: Multiword,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_sentences: None,
            padded: true,
            multiword: Multiword::Keep,
        }
    }
}

/// One blank-line-terminated section of the input.
#[derive(Debug, Default)]
pub struct Block {
    pub records: Vec<RawRecord>,
    /// `# key = value` lines, in order of first appearance.
    pub metadata: Vec<(String, String)>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Iterator over raw record blocks
///
/// One forward pass over the line stream; not restartable. Merging a
/// multiword span looks ahead by two lines.
pub struct BlockReader<R: BufRead> {
    lines: Lines<R>,
    line_num: usize,
    max_sentences: Option<usize>,
    multiword: Multiword,
    emitted: usize,
    done: bool,
}

/// Open a treebank file, transparently decompressing `.gz` paths.
pub fn open_treebank(path: &Path) -> io::Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path)?;
    let inner: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(BufReader::new(inner))
}

impl BlockReader<BufReader<Box<dyn Read>>> {
    /// Create a reader from a file path (plain or gzipped).
    pub fn from_file(
        path: &Path,
        max_sentences: Option<usize>,
        multiword: Multiword,
    ) -> io::Result<Self> {
        Ok(Self::new(open_treebank(path)?, max_sentences, multiword))
    }
}

impl BlockReader<BufReader<io::Cursor<String>>> {
    /// Create a reader from in-memory text.
    pub fn from_string(text: &str, max_sentences: Option<usize>, multiword: Multiword) -> Self {
        let cursor = io::Cursor::new(text.to_string());
        Self::new(BufReader::new(cursor), max_sentences, multiword)
    }
}

impl<R: BufRead> BlockReader<R> {
    pub fn new(input: R, max_sentences: Option<usize>, multiword: Multiword) -> Self {
        Self {
            lines: input.lines(),
            line_num: 0,
            max_sentences,
            multiword,
            emitted: 0,
            done: false,
        }
    }

    fn structural(&self, line: &str, message: String) -> ParseError {
        ParseError {
            line_num: self.line_num,
            line: line.to_string(),
            message,
        }
    }

    /// Parse one token line into the current block.
    fn parse_row(&mut self, line: &str, block: &mut Block) -> Result<(), ParseError> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != COLUMNS.len() {
            return Err(self.structural(
                line,
                format!("expected {} columns, found {}", COLUMNS.len(), fields.len()),
            ));
        }

        let id = fields[0];

        // Empty nodes (elided tokens) carry no surface form; skip them.
        if id.contains('.') {
            block.diagnostics.push(Diagnostic::EmptyNode {
                line_num: self.line_num,
            });
            return Ok(());
        }

        if id.contains('-') {
            return self.parse_span(&fields, line, block);
        }

        block
            .records
            .push(RawRecord::from_fields(self.line_num, &fields));
        Ok(())
    }

    /// Handle a multiword span header according to the configured mode.
    fn parse_span(
        &mut self,
        fields: &[&str],
        line: &str,
        block: &mut Block,
    ) -> Result<(), ParseError> {
        let id = fields[0];
        match self.multiword {
            Multiword::Keep => {
                // The sub-token lines carry all the annotation; the header is
                // only the unsplit surface form.
                block.diagnostics.push(Diagnostic::MultiwordSpan {
                    line_num: self.line_num,
                    id: id.to_string(),
                });
                Ok(())
            }
            Multiword::Merge => {
                if id.bytes().filter(|&b| b == b'-').count() != 1 {
                    return Err(self.structural(line, format!("malformed span id {:?}", id)));
                }

                let form = fields[1].to_string();
                let sub1 = self.next_row()?;
                let sub2 = self.next_row()?;

                let mut merged = sub1;
                merged.form = form;
                merged.cpos = format!("{}+{}", merged.cpos, sub2.cpos);
                block.records.push(merged);
                Ok(())
            }
        }
    }

    /// Pull the next line as a token record (span-merge lookahead).
    fn next_row(&mut self) -> Result<RawRecord, ParseError> {
        self.line_num += 1;
        match self.lines.next() {
            None => Err(ParseError {
                line_num: self.line_num,
                line: String::new(),
                message: "stream ended inside a multiword span".to_string(),
            }),
            Some(Err(e)) => Err(ParseError {
                line_num: self.line_num,
                line: String::new(),
                message: format!("IO error: {}", e),
            }),
            Some(Ok(line)) => {
                let trimmed = line.trim();
                let fields: Vec<&str> = trimmed.split('\t').collect();
                if fields.len() != COLUMNS.len() {
                    return Err(self.structural(
                        trimmed,
                        format!("expected {} columns, found {}", COLUMNS.len(), fields.len()),
                    ));
                }
                Ok(RawRecord::from_fields(self.line_num, &fields))
            }
        }
    }
}

impl<R: BufRead> Iterator for BlockReader<R> {
    type Item = Result<Block, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some(max) = self.max_sentences
            && self.emitted >= max
        {
            self.done = true;
            return None;
        }

        let mut block = Block::default();

        loop {
            self.line_num += 1;
            let line = match self.lines.next() {
                None => {
                    // EOF: a non-empty accumulator is the final block.
                    self.done = true;
                    if block.records.is_empty() {
                        return None;
                    }
                    return Some(Ok(block));
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(ParseError {
                        line_num: self.line_num,
                        line: String::new(),
                        message: format!("IO error: {}", e),
                    }));
                }
                Some(Ok(line)) => line,
            };

            if line.starts_with('#') {
                let trimmed = line.trim();
                if let Some(pos) = memmem::find(trimmed.as_bytes(), b" = ") {
                    let key = trimmed[1..pos].trim().to_string();
                    let value = trimmed[pos + 3..].to_string();
                    upsert(&mut block.metadata, key, value);
                }
                // Other # lines are comments.
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                // Sentence boundary.
                self.emitted += 1;
                if let Some(max) = self.max_sentences
                    && self.emitted >= max
                {
                    self.done = true;
                }
                return Some(Ok(block));
            }

            if let Err(e) = self.parse_row(trimmed, &mut block) {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}

fn upsert(metadata: &mut Vec<(String, String)>, key: String, value: String) {
    if let Some(entry) = metadata.iter_mut().find(|(k, _)| *k == key) {
        entry.1 = value;
    } else {
        metadata.push((key, value));
    }
}
