//! Corpus writer
//!
//! Serializes sentences back to the tabular text form. The writer is a lossy
//! inverse of the reader: morphology is always written as `_`, and only the
//! no-padding, empty-morphology case round-trips exactly. Input shape is not
//! re-validated; malformed sentences must be prevented upstream.

use crate::diag::Diagnostic;
use crate::sentence::Sentence;
use std::io::{self, Write};

/// Write sentences to `sink`, separated by one blank line each.
///
/// `padded` declares the layout of the input sentences; sentinel positions
/// are excluded from the output and a head pointing at the root sentinel is
/// rewritten to `0`. Returns the diagnostics produced while writing.
pub fn write_corpus<'a, W, I>(sink: &mut W, sentences: I, padded: bool) -> io::Result<Vec<Diagnostic>>
where
    W: Write,
    I: IntoIterator<Item = &'a Sentence>,
{
    let mut diagnostics = Vec::new();
    let mut lossy = false;
    for sentence in sentences {
        write_sentence(sink, sentence, padded, &mut diagnostics, &mut lossy)?;
    }
    Ok(diagnostics)
}

fn write_sentence<W: Write>(
    sink: &mut W,
    sentence: &Sentence,
    padded: bool,
    diagnostics: &mut Vec<Diagnostic>,
    lossy: &mut bool,
) -> io::Result<()> {
    let mut metadata: Vec<&(String, String)> = sentence.metadata.iter().collect();
    metadata.sort_by(|a, b| a.0.cmp(&b.0));
    for (key, value) in metadata {
        writeln!(sink, "# {} = {}", key, value)?;
    }

    // Range of real token positions in the parallel arrays.
    let (first, last) = if padded {
        (1, sentence.words.len().saturating_sub(1))
    } else {
        (0, sentence.words.len())
    };
    let n = last - first;
    // Index that means "attached to root" in this layout.
    let root = if padded { n + 1 } else { n };

    for (i, p) in (first..last).enumerate() {
        let head = match sentence.heads[p] {
            None => "_".to_string(),
            Some(h) if h == root => "0".to_string(),
            Some(h) if padded => h.to_string(),
            Some(h) => (h + 1).to_string(),
        };
        let label = sentence.labels[p].as_deref().unwrap_or("_");

        if !sentence.morpho[p].is_empty() && !*lossy {
            *lossy = true;
            diagnostics.push(Diagnostic::LossyMorphology);
        }

        writeln!(
            sink,
            "{}\t{}\t{}\t{}\t{}\t_\t{}\t{}\t_\t_",
            i + 1,
            sentence.words[p],
            sentence.lemma[p],
            sentence.cpos[p],
            sentence.fpos[p],
            head,
            label,
        )?;
    }
    writeln!(sink)?;
    Ok(())
}
