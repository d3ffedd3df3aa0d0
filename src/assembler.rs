//! Sentence assembler
//!
//! Turns raw record blocks into typed [`Sentence`] records: parses heads and
//! morphology, remaps root attachments, and applies the padding policy. A
//! sentence whose HEAD column does not parse is discarded with a diagnostic;
//! the stream continues with the next block.

use crate::diag::Diagnostic;
use crate::reader::{Block, BlockReader, ParseError, ReadOptions, open_treebank};
use crate::record::RawRecord;
use crate::sentence::{Features, ROOT, START, Sentence};
use memchr::memchr;
use rustc_hash::FxHashMap;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Iterator over assembled sentences.
pub struct SentenceReader<R: BufRead> {
    blocks: BlockReader<R>,
    padded: bool,
    /// Diagnostics of discarded sentences, waiting for a carrier.
    pending: Vec<Diagnostic>,
}

/// Read sentences from a line stream.
pub fn read<R: BufRead>(input: R, options: ReadOptions) -> SentenceReader<R> {
    SentenceReader {
        blocks: BlockReader::new(input, options.max_sentences, options.multiword),
        padded: options.padded,
        pending: Vec::new(),
    }
}

impl SentenceReader<BufReader<Box<dyn Read>>> {
    /// Read sentences from a file path (plain or gzipped).
    pub fn from_file(path: &Path, options: ReadOptions) -> io::Result<Self> {
        Ok(read(open_treebank(path)?, options))
    }
}

impl SentenceReader<BufReader<io::Cursor<String>>> {
    /// Read sentences from in-memory text.
    pub fn from_string(text: &str, options: ReadOptions) -> Self {
        read(
            BufReader::new(io::Cursor::new(text.to_string())),
            options,
        )
    }
}

impl<R: BufRead> SentenceReader<R> {
    /// Diagnostics produced after the last emitted sentence (for example by a
    /// discarded sentence at the end of the stream).
    pub fn take_pending_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.pending)
    }

    /// Assemble one block; `Ok(None)` means the sentence was discarded.
    fn assemble(&mut self, block: Block) -> Result<Option<Sentence>, ParseError> {
        let Block {
            records,
            metadata,
            mut diagnostics,
        } = block;
        let n = records.len();

        let words: Vec<String> = records.iter().map(|r| r.form.clone()).collect();
        if let Some(form) = words.iter().find(|w| w.contains(' ')) {
            diagnostics.push(Diagnostic::SpaceInForm { form: form.clone() });
        }

        // Heads first: a bad HEAD throws the whole sentence away, before any
        // structural check on the remaining columns.
        let mut raw_heads = Vec::with_capacity(n);
        for record in &records {
            match atoi::atoi::<usize>(record.head.as_bytes()) {
                Some(h) => raw_heads.push(h),
                None => {
                    diagnostics.push(Diagnostic::SentenceDiscarded { forms: words });
                    self.pending.append(&mut diagnostics);
                    return Ok(None);
                }
            }
        }

        // A raw head of 0 means "attached to root", i.e. position n + 1.
        let heads: Vec<usize> = raw_heads
            .into_iter()
            .map(|h| if h == 0 { n + 1 } else { h })
            .collect();

        let mut lemma = Vec::with_capacity(n);
        let mut cpos = Vec::with_capacity(n);
        let mut fpos = Vec::with_capacity(n);
        let mut morpho = Vec::with_capacity(n);
        let mut labels = Vec::with_capacity(n);
        for record in records {
            morpho.push(parse_morpho(&record)?);
            lemma.push(record.lemma);
            cpos.push(record.cpos);
            fpos.push(record.fpos);
            labels.push(Some(record.label));
        }

        let mut sentence = if self.padded {
            morpho.insert(0, Features::default());
            morpho.push(Features::default());

            let mut padded_heads = Vec::with_capacity(n + 2);
            padded_heads.push(None);
            padded_heads.extend(heads.into_iter().map(Some));
            padded_heads.push(None);

            let mut padded_labels = Vec::with_capacity(n + 2);
            padded_labels.push(None);
            padded_labels.append(&mut labels);
            padded_labels.push(None);

            Sentence {
                metadata,
                words: pad(words),
                lemma: pad(lemma),
                cpos: pad(cpos),
                fpos: pad(fpos),
                morpho,
                heads: padded_heads,
                labels: padded_labels,
                padded: true,
                diagnostics: Vec::new(),
            }
        } else {
            Sentence {
                metadata,
                words,
                lemma,
                cpos,
                fpos,
                morpho,
                heads: heads.into_iter().map(|h| Some(h - 1)).collect(),
                labels,
                padded: false,
                diagnostics: Vec::new(),
            }
        };

        let mut carried = std::mem::take(&mut self.pending);
        carried.append(&mut diagnostics);
        sentence.diagnostics = carried;
        Ok(Some(sentence))
    }
}

impl<R: BufRead> Iterator for SentenceReader<R> {
    type Item = Result<Sentence, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let block = match self.blocks.next()? {
                Ok(block) => block,
                Err(e) => return Some(Err(e)),
            };
            match self.assemble(block) {
                Ok(Some(sentence)) => return Some(Ok(sentence)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

fn pad(mut items: Vec<String>) -> Vec<String> {
    items.insert(0, START.to_string());
    items.push(ROOT.to_string());
    items
}

/// Parse a `key=value|key=value` morphology column; `_` means no features.
fn parse_morpho(record: &RawRecord) -> Result<Features, ParseError> {
    let mut features = Features::default();
    if record.morpho == "_" {
        return Ok(features);
    }
    for pair in record.morpho.split('|') {
        match memchr(b'=', pair.as_bytes()) {
            Some(pos) => {
                features.insert(pair[..pos].to_string(), pair[pos + 1..].to_string());
            }
            None => {
                return Err(ParseError {
                    line_num: record.line_num,
                    line: record.morpho.clone(),
                    message: format!("morphology entry {:?} has no '='", pair),
                });
            }
        }
    }
    Ok(features)
}

/// POS-projection view: each sentence reduced to its words and coarse POS
/// tags, optionally relabeled through a caller-supplied mapping. Preserves
/// the padding mode of its source.
pub struct PosProjection<R: BufRead> {
    sentences: SentenceReader<R>,
    remap: Option<FxHashMap<String, String>>,
}

/// Project a line stream down to `(words, coarse POS tags)` pairs.
pub fn project_pos<R: BufRead>(
    input: R,
    options: ReadOptions,
    remap: Option<FxHashMap<String, String>>,
) -> PosProjection<R> {
    PosProjection {
        sentences: read(input, options),
        remap,
    }
}

impl<R: BufRead> Iterator for PosProjection<R> {
    type Item = Result<(Vec<String>, Vec<String>), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let sentence = match self.sentences.next()? {
            Ok(sentence) => sentence,
            Err(e) => return Some(Err(e)),
        };
        let tags = sentence
            .cpos
            .into_iter()
            .map(|tag| match &self.remap {
                Some(map) => map.get(&tag).cloned().unwrap_or(tag),
                None => tag,
            })
            .collect();
        Some(Ok((sentence.words, tags)))
    }
}
