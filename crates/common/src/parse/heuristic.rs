//! Deterministic heuristic parser
//!
//! A closed-vocabulary, suffix-driven dependency parser. It is not a
//! replacement for a real morphological parser behind the
//! [`SentenceParser`](super::SentenceParser) seam; it exists so the pipeline
//! has a deterministic parser for tests and degraded operation, the same way
//! a mock provider ships next to the live one.

use super::{DepRel, ParsedSentence, PosTag, SentenceParser, Token};
use crate::errors::{QaError, Result};

const COPULAS: &[&str] = &["is", "are", "was", "were", "am", "be", "been", "being"];
const AUXILIARIES: &[&str] = &[
    "do", "does", "did", "done", "has", "have", "had", "will", "would", "can", "could",
    "should", "may", "might",
];
const IRREGULAR_VERBS: &[&str] = &[
    "sank", "sunk", "sink", "became", "become", "went", "go", "built", "build", "made",
    "make", "struck", "strike", "took", "take", "won", "wrote", "write",
];
const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "of", "to", "from", "by", "with", "for", "into", "after", "before",
    "during", "near", "under", "over", "about",
];
const DETERMINERS: &[&str] = &["the", "a", "an", "this", "that", "these", "those"];
const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor"];
const WH_WORDS: &[&str] = &["who", "whom", "whose", "what", "when", "where", "why", "how", "which"];
const PRONOUNS: &[&str] = &["he", "she", "it", "they", "we", "i", "you", "him", "her", "them"];

/// Lemma normalization for the closed verb vocabulary
fn lemma_of(lower: &str) -> String {
    match lower {
        "is" | "are" | "was" | "were" | "am" | "been" | "being" => "be".to_string(),
        "did" | "does" | "done" => "do".to_string(),
        "has" | "had" => "have".to_string(),
        "sank" | "sunk" => "sink".to_string(),
        "became" => "become".to_string(),
        "went" => "go".to_string(),
        "built" => "build".to_string(),
        "made" => "make".to_string(),
        "struck" => "strike".to_string(),
        "took" => "take".to_string(),
        "wrote" => "write".to_string(),
        "won" => "win".to_string(),
        other => other.strip_suffix("'s").unwrap_or(other).to_string(),
    }
}

/// Rule-based deterministic sentence parser
#[derive(Debug, Default)]
pub struct HeuristicParser;

impl HeuristicParser {
    pub fn new() -> Self {
        Self
    }

    fn classify(&self, surface: &str, lower: &str, sentence_initial: bool) -> PosTag {
        if surface.chars().all(|c| !c.is_alphanumeric()) {
            return PosTag::Punctuation;
        }
        if surface.chars().any(|c| c.is_ascii_digit())
            && surface.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | ':' | '/'))
        {
            return PosTag::Numeral;
        }
        if WH_WORDS.contains(&lower) || PRONOUNS.contains(&lower) {
            return PosTag::Pronoun;
        }
        if COPULAS.contains(&lower) || AUXILIARIES.contains(&lower) || IRREGULAR_VERBS.contains(&lower) {
            return PosTag::Verb;
        }
        if PREPOSITIONS.contains(&lower) {
            return PosTag::Preposition;
        }
        if DETERMINERS.contains(&lower) {
            return PosTag::Particle;
        }
        if CONJUNCTIONS.contains(&lower) {
            return PosTag::Conjunction;
        }
        if lower.len() > 3 && lower.ends_with("ed") {
            return PosTag::Verb;
        }
        if lower.len() > 4 && lower.ends_with("ing") {
            return PosTag::Verb;
        }
        if lower.len() > 3 && lower.ends_with("ly") {
            return PosTag::Adverb;
        }
        if !sentence_initial && surface.chars().next().is_some_and(|c| c.is_uppercase()) {
            return PosTag::ProperNoun;
        }
        PosTag::Noun
    }
}

impl SentenceParser for HeuristicParser {
    fn parse(&self, sentence: &str) -> Result<ParsedSentence> {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        if words.is_empty() {
            return Err(QaError::parsing("blank sentence"));
        }

        // Pass 1: surface/lemma/pos
        let mut partial: Vec<(String, String, PosTag)> = Vec::with_capacity(words.len());
        for (i, raw) in words.iter().enumerate() {
            let surface: String = raw
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_string();
            if surface.is_empty() {
                partial.push((raw.to_string(), raw.to_string(), PosTag::Punctuation));
                continue;
            }
            let lower = surface.to_lowercase();
            let pos = self.classify(&surface, &lower, i == 0);
            partial.push((surface, lemma_of(&lower), pos));
        }

        if partial.iter().all(|(_, _, pos)| *pos == PosTag::Punctuation) {
            return Err(QaError::parsing("sentence contains no lexical tokens"));
        }

        // Pass 2: pick the root - first verb, else first lexical token
        let root = partial
            .iter()
            .position(|(_, _, pos)| *pos == PosTag::Verb)
            .unwrap_or_else(|| {
                partial
                    .iter()
                    .position(|(_, _, pos)| *pos != PosTag::Punctuation)
                    .unwrap_or(0)
            });

        let root_is_copula = COPULAS.contains(&partial[root].1.as_str()) || partial[root].1 == "be";

        let noun_like = |pos: PosTag| {
            matches!(pos, PosTag::Noun | PosTag::ProperNoun | PosTag::Pronoun)
        };

        // A proper-noun run attaches its tail to the run head
        let run_start = |idx: usize| -> Option<usize> {
            if partial[idx].2 != PosTag::ProperNoun || idx == 0 {
                return None;
            }
            if partial[idx - 1].2 != PosTag::ProperNoun {
                return None;
            }
            let mut start = idx - 1;
            while start > 0 && partial[start - 1].2 == PosTag::ProperNoun {
                start -= 1;
            }
            Some(start)
        };

        let subject = (0..root)
            .find(|&i| noun_like(partial[i].2) && run_start(i).is_none());
        let predicate_noun = ((root + 1)..partial.len())
            .find(|&i| noun_like(partial[i].2) && run_start(i).is_none());

        // Pass 3: head/relation assignment
        let mut tokens = Vec::with_capacity(partial.len());
        for (idx, (surface, lemma, pos)) in partial.iter().enumerate() {
            let (head, rel) = if idx == root {
                (None, DepRel::Root)
            } else if let Some(start) = run_start(idx) {
                (Some(start), DepRel::Modifier)
            } else if Some(idx) == subject {
                (Some(root), DepRel::Subject)
            } else if Some(idx) == predicate_noun {
                let rel = if root_is_copula {
                    DepRel::Complement
                } else {
                    DepRel::Object
                };
                (Some(root), rel)
            } else if *pos == PosTag::Particle {
                // Determiner leans on the next noun-like token
                let target = ((idx + 1)..partial.len())
                    .find(|&i| noun_like(partial[i].2) || partial[i].2 == PosTag::Numeral);
                (Some(target.unwrap_or(root)), DepRel::Determiner)
            } else if idx > root && predicate_noun.is_some_and(|p| idx > p) {
                // Right periphery hangs off the predicate noun
                (Some(predicate_noun.unwrap()), DepRel::Modifier)
            } else {
                let rel = match pos {
                    PosTag::Numeral | PosTag::Preposition | PosTag::Adverb => DepRel::Modifier,
                    _ => DepRel::Other,
                };
                (Some(root), rel)
            };

            tokens.push(Token::new(surface.clone(), lemma.clone(), *pos, rel, head));
        }

        ParsedSentence::new(tokens)
    }
}
