//! Treebank: tabular dependency treebank I/O
//!
//! Reads and writes corpora in the tab-separated dependency-annotation
//! format (one token per line, blank line between sentences, `#`-prefixed
//! metadata), and tests head assignments for projectivity.
//!
//! # Example
//!
//! ```
//! use treebank::{ReadOptions, SentenceReader};
//!
//! let text = "1\tCats\tcat\tNOUN\tNNS\t_\t2\tnsubj\t_\t_\n\
//!             2\tsleep\tsleep\tVERB\tVBP\t_\t0\troot\t_\t_\n\n";
//! let sentences: Vec<_> = SentenceReader::from_string(text, ReadOptions::default())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(sentences[0].len(), 2);
//! assert!(sentences[0].is_projective());
//! ```

pub mod assembler; // Raw blocks to typed sentences
pub mod diag; // Non-fatal diagnostics
pub mod lexicon; // Word form to tag-set extraction
pub mod projective; // Crossing-arc test
pub mod reader; // Line stream to raw record blocks
pub mod record; // Column schema and raw records
pub mod sentence; // Sentence data structures
pub mod writer; // Sentences back to text

// Re-exports for convenience
pub use assembler::{PosProjection, SentenceReader, project_pos, read};
pub use diag::Diagnostic;
pub use lexicon::Lexicon;
pub use projective::is_projective;
pub use reader::{Block, BlockReader, Multiword, ParseError, ReadOptions, open_treebank};
pub use record::RawRecord;
pub use sentence::{Features, Sentence, Token};
pub use writer::write_corpus;
