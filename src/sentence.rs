//! Sentence records
//!
//! A `Sentence` holds the word sequence and its parallel annotation arrays,
//! either bracketed by start/root sentinel positions (padded) or stripped to
//! the real tokens with 0-based head indices. Sentences are immutable once
//! assembled.

use crate::diag::Diagnostic;
use rustc_hash::FxHashMap;

/// Morphological features of one token (`key=value|...` in the text form).
pub type Features = FxHashMap<String, String>;

/// Surface form of the synthetic start sentinel.
pub const START: &str = "<start>";
/// Surface form of the synthetic root sentinel.
pub const ROOT: &str = "ROOT";

/// One sentence of a treebank.
///
/// All parallel arrays share one length: the token count, plus two when
/// `padded` (index 0 is the start sentinel, `n + 1` the root sentinel).
/// Heads are `None` exactly at the sentinel positions; under padding a head
/// of `n + 1` means "attached to the root", without padding the same
/// attachment is the 0-based value `n`.
#[derive(Debug, Clone, Default)]
pub struct Sentence {
    /// `# key = value` metadata in order of first appearance.
    pub metadata: Vec<(String, String)>,
    pub words: Vec<String>,
    pub lemma: Vec<String>,
    pub cpos: Vec<String>,
    pub fpos: Vec<String>,
    pub morpho: Vec<Features>,
    pub heads: Vec<Option<usize>>,
    pub labels: Vec<Option<String>>,
    pub padded: bool,
    /// Diagnostics produced while reading this sentence, in production order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Borrowed view of one real token of a [`Sentence`].
#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
    pub form: &'a str,
    pub lemma: &'a str,
    pub cpos: &'a str,
    pub fpos: &'a str,
    pub morpho: &'a Features,
    pub head: Option<usize>,
    pub label: Option<&'a str>,
}

impl Sentence {
    /// Number of real tokens (sentinels excluded).
    pub fn len(&self) -> usize {
        if self.padded {
            self.words.len().saturating_sub(2)
        } else {
            self.words.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `index`-th real token, 0-based regardless of padding.
    pub fn token(&self, index: usize) -> Option<Token<'_>> {
        if index >= self.len() {
            return None;
        }
        let p = if self.padded { index + 1 } else { index };
        Some(Token {
            form: &self.words[p],
            lemma: &self.lemma[p],
            cpos: &self.cpos[p],
            fpos: &self.fpos[p],
            morpho: &self.morpho[p],
            head: self.heads[p],
            label: self.labels[p].as_deref(),
        })
    }

    /// Iterate over the real tokens.
    pub fn tokens(&self) -> impl Iterator<Item = Token<'_>> {
        (0..self.len()).filter_map(|i| self.token(i))
    }

    /// Whether the dependency arcs of this sentence are projective.
    pub fn is_projective(&self) -> bool {
        crate::projective::is_projective(&self.heads, self.padded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded_sentence() -> Sentence {
        Sentence {
            metadata: Vec::new(),
            words: vec![
                START.to_string(),
                "chat".to_string(),
                "dort".to_string(),
                ROOT.to_string(),
            ],
            lemma: vec![
                START.to_string(),
                "chat".to_string(),
                "dormir".to_string(),
                ROOT.to_string(),
            ],
            cpos: vec![
                START.to_string(),
                "NOUN".to_string(),
                "VERB".to_string(),
                ROOT.to_string(),
            ],
            fpos: vec![
                START.to_string(),
                "NC".to_string(),
                "V".to_string(),
                ROOT.to_string(),
            ],
            morpho: vec![Features::default(); 4],
            heads: vec![None, Some(2), Some(3), None],
            labels: vec![
                None,
                Some("nsubj".to_string()),
                Some("root".to_string()),
                None,
            ],
            padded: true,
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_len_excludes_sentinels() {
        let sentence = padded_sentence();
        assert_eq!(sentence.len(), 2);
        assert!(!sentence.is_empty());
    }

    #[test]
    fn test_token_view_skips_start_sentinel() {
        let sentence = padded_sentence();
        let token = sentence.token(0).unwrap();
        assert_eq!(token.form, "chat");
        assert_eq!(token.lemma, "chat");
        assert_eq!(token.head, Some(2));
        assert_eq!(token.label, Some("nsubj"));
        assert!(sentence.token(2).is_none());
    }

    #[test]
    fn test_tokens_iterator() {
        let sentence = padded_sentence();
        let forms: Vec<&str> = sentence.tokens().map(|t| t.form).collect();
        assert_eq!(forms, vec!["chat", "dort"]);
    }
}
