//! Non-fatal diagnostics
//!
//! Conditions worth reporting that do not stop the pipeline. Diagnostics are
//! explicit values carried alongside results, in production order; nothing is
//! written to a global channel behind the caller's back.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An elided-token row (ID containing `.`) was skipped.
    EmptyNode { line_num: usize },
    /// A multiword span header was dropped in tokenization-preserving mode.
    MultiwordSpan { line_num: usize, id: String },
    /// A word form contains an internal space.
    SpaceInForm { form: String },
    /// A sentence was discarded because a HEAD column did not parse.
    SentenceDiscarded { forms: Vec<String> },
    /// Morphological features were present but not serialized.
    LossyMorphology,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EmptyNode { line_num } => {
                write!(f, "empty node at line {} ignored", line_num)
            }
            Diagnostic::MultiwordSpan { line_num, id } => {
                write!(f, "multiword span {} at line {} dropped", id, line_num)
            }
            Diagnostic::SpaceInForm { form } => {
                write!(f, "space in word form {:?}", form)
            }
            Diagnostic::SentenceDiscarded { forms } => {
                write!(
                    f,
                    "unparsable head, ignoring sentence '{}'",
                    forms.join(" ")
                )
            }
            Diagnostic::LossyMorphology => {
                write!(f, "morphological features are not serialized")
            }
        }
    }
}
