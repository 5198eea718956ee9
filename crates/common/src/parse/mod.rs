//! Parse data model and the parser seam
//!
//! The pipeline treats syntactic parsing as an external capability: input is
//! a raw sentence, output is an ordered sequence of tokens with lemma,
//! part-of-speech, and head/dependency-relation attributes. Head references
//! are arena indices, never pointers, and the tree invariant (single root,
//! in-range heads, no cycles) is validated when a parse result is ingested.

mod heuristic;

pub use heuristic::HeuristicParser;

use crate::errors::{QaError, Result};
use serde::{Deserialize, Serialize};

/// Part-of-speech tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Numeral,
    Preposition,
    Conjunction,
    Particle,
    Punctuation,
    Other,
}

/// Dependency relation of a token to its head
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DepRel {
    Root,
    Subject,
    Object,
    Complement,
    Modifier,
    Determiner,
    Other,
}

/// A single token as produced by the parser. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Surface form as it appeared in the sentence
    pub surface: String,

    /// Normalized lemma (lowercased)
    pub lemma: String,

    /// Part-of-speech tag
    pub pos: PosTag,

    /// Dependency relation to the head token
    pub rel: DepRel,

    /// Arena index of the head token; None only for the root
    pub head: Option<usize>,
}

impl Token {
    pub fn new(
        surface: impl Into<String>,
        lemma: impl Into<String>,
        pos: PosTag,
        rel: DepRel,
        head: Option<usize>,
    ) -> Self {
        Self {
            surface: surface.into(),
            lemma: lemma.into(),
            pos,
            rel,
            head,
        }
    }

    /// Punctuation never participates in lexical overlap
    pub fn is_lexical(&self) -> bool {
        self.pos != PosTag::Punctuation
    }
}

/// An ordered arena of tokens forming a validated dependency tree
#[derive(Debug, Clone)]
pub struct ParsedSentence {
    tokens: Vec<Token>,
    root: usize,
}

impl ParsedSentence {
    /// Ingest a parser result, validating the tree invariant:
    /// exactly one root, all heads in range, no self-references, no cycles.
    pub fn new(tokens: Vec<Token>) -> Result<Self> {
        if tokens.is_empty() {
            return Err(QaError::parsing("empty token sequence"));
        }

        let mut root = None;
        for (idx, token) in tokens.iter().enumerate() {
            match token.head {
                None => {
                    if root.is_some() {
                        return Err(QaError::parsing(format!(
                            "multiple roots: {} and {}",
                            root.unwrap(),
                            idx
                        )));
                    }
                    root = Some(idx);
                }
                Some(head) => {
                    if head >= tokens.len() {
                        return Err(QaError::parsing(format!(
                            "head {} out of range for token {}",
                            head, idx
                        )));
                    }
                    if head == idx {
                        return Err(QaError::parsing(format!(
                            "token {} is its own head",
                            idx
                        )));
                    }
                }
            }
        }

        let root = root.ok_or_else(|| QaError::parsing("no root token"))?;

        // Every head chain must terminate at the root within len steps
        for start in 0..tokens.len() {
            let mut cursor = start;
            let mut steps = 0;
            while let Some(head) = tokens[cursor].head {
                cursor = head;
                steps += 1;
                if steps > tokens.len() {
                    return Err(QaError::parsing(format!(
                        "cycle in head chain starting at token {}",
                        start
                    )));
                }
            }
        }

        Ok(Self { tokens, root })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, idx: usize) -> &Token {
        &self.tokens[idx]
    }

    /// Index of the root token
    pub fn root(&self) -> usize {
        self.root
    }

    /// Direct dependents of the token at `idx`, in sentence order
    pub fn children(&self, idx: usize) -> Vec<usize> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.head == Some(idx))
            .map(|(i, _)| i)
            .collect()
    }

    /// All indices in the subtree rooted at `idx` (inclusive), in
    /// sentence order
    pub fn subtree(&self, idx: usize) -> Vec<usize> {
        let mut members = vec![idx];
        let mut frontier = vec![idx];
        while let Some(node) = frontier.pop() {
            for child in self.children(node) {
                members.push(child);
                frontier.push(child);
            }
        }
        members.sort_unstable();
        members
    }

    /// Render a set of token indices back to surface text: tokens in
    /// original order, whitespace-joined. Interior punctuation stays in
    /// place; edge trimming is the caller's concern.
    pub fn render(&self, indices: &[usize]) -> String {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable();
        sorted
            .into_iter()
            .map(|i| self.tokens[i].surface.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The parser capability seam. External morphological parsers implement
/// this; [`HeuristicParser`] is the built-in deterministic stand-in.
pub trait SentenceParser: Send + Sync {
    /// Parse a single sentence into a validated dependency tree
    fn parse(&self, sentence: &str) -> Result<ParsedSentence>;

    /// Whether the parser's underlying resources are loaded
    fn ready(&self) -> bool {
        true
    }

    /// Release underlying resources. Idempotent.
    fn release(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(surface: &str, rel: DepRel, head: Option<usize>) -> Token {
        Token::new(surface, surface.to_lowercase(), PosTag::Noun, rel, head)
    }

    #[test]
    fn test_valid_tree() {
        let sentence = ParsedSentence::new(vec![
            tok("ships", DepRel::Subject, Some(1)),
            tok("sink", DepRel::Root, None),
            tok("sometimes", DepRel::Modifier, Some(1)),
        ])
        .unwrap();
        assert_eq!(sentence.root(), 1);
        assert_eq!(sentence.children(1), vec![0, 2]);
        assert_eq!(sentence.subtree(1), vec![0, 1, 2]);
    }

    #[test]
    fn test_rejects_two_roots() {
        let result = ParsedSentence::new(vec![
            tok("a", DepRel::Root, None),
            tok("b", DepRel::Root, None),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_out_of_range_head() {
        let result = ParsedSentence::new(vec![
            tok("a", DepRel::Root, None),
            tok("b", DepRel::Other, Some(7)),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_cycle() {
        let result = ParsedSentence::new(vec![
            tok("a", DepRel::Root, None),
            tok("b", DepRel::Other, Some(2)),
            tok("c", DepRel::Other, Some(1)),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_self_reference() {
        let result = ParsedSentence::new(vec![tok("a", DepRel::Root, Some(0))]);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_keeps_sentence_order() {
        let sentence = ParsedSentence::new(vec![
            tok("the", DepRel::Determiner, Some(1)),
            tok("ship", DepRel::Subject, Some(2)),
            tok("sank", DepRel::Root, None),
        ])
        .unwrap();
        assert_eq!(sentence.render(&[2, 0, 1]), "the ship sank");
    }

    #[test]
    fn test_render_keeps_interior_punctuation() {
        let sentence = ParsedSentence::new(vec![
            tok("Belfast", DepRel::Root, None),
            Token::new(",", ",", PosTag::Punctuation, DepRel::Other, Some(0)),
            tok("Ireland", DepRel::Modifier, Some(0)),
        ])
        .unwrap();
        assert_eq!(sentence.render(&[0, 1, 2]), "Belfast , Ireland");
    }
}
