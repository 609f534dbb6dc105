//! Lexical database access: vocabulary enumeration and synonym lookup.

use derive_more::{Display, Error};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Lexicon error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Lexicon error: {} at {}:{}", message, file, line)]
pub struct LexiconError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LexiconError {
    /// Creates a new lexicon error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for LexiconError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for LexiconError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Parse error: {}", err))
    }
}

/// One sense of a word: the set of lemmas (alternate words) for that sense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meaning {
    lemmas: BTreeSet<String>,
}

impl Meaning {
    /// Creates a meaning from its lemma set. Lemmas are case-folded to lowercase.
    pub fn new(lemmas: impl IntoIterator<Item = String>) -> Self {
        Self {
            lemmas: lemmas.into_iter().map(|l| l.to_lowercase()).collect(),
        }
    }

    /// Returns the lemma set for this meaning.
    pub fn lemmas(&self) -> &BTreeSet<String> {
        &self.lemmas
    }
}

/// Source of vocabulary and word meanings.
///
/// The category generator is generic over this trait so tests can supply
/// a controlled vocabulary.
pub trait LexicalSource {
    /// Enumerates the full vocabulary.
    fn words(&self) -> &[String];

    /// Returns the meanings of a word, or an empty slice for unknown words.
    fn meanings_of(&self, word: &str) -> &[Meaning];
}

/// Raw on-disk lexicon shape: word mapped to a list of meanings, each
/// meaning a list of lemmas.
type RawLexicon = BTreeMap<String, Vec<BTreeSet<String>>>;

/// JSON-backed lexical database.
///
/// Words and lemmas are case-folded to lowercase on construction, and the
/// vocabulary is kept sorted so draws depend only on contents and seed.
#[derive(Debug, Clone)]
pub struct Lexicon {
    words: Vec<String>,
    meanings: HashMap<String, Vec<Meaning>>,
}

/// Default vocabulary bundled into the binary.
const BUILTIN_LEXICON: &str = include_str!("../data/lexicon.json");

impl Lexicon {
    /// Builds a lexicon from (word, meanings) entries.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, Vec<BTreeSet<String>>)>,
    ) -> Self {
        let mut meanings: HashMap<String, Vec<Meaning>> = HashMap::new();
        for (word, senses) in entries {
            let word = word.to_lowercase();
            meanings
                .entry(word)
                .or_default()
                .extend(senses.into_iter().map(Meaning::new));
        }
        let mut words: Vec<String> = meanings.keys().cloned().collect();
        words.sort();
        Self { words, meanings }
    }

    /// Parses a lexicon from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError`] if the text is not a valid lexicon document.
    pub fn from_json(text: &str) -> Result<Self, LexiconError> {
        let raw: RawLexicon = serde_json::from_str(text)?;
        Ok(Self::from_entries(raw))
    }

    /// Loads a lexicon from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        debug!("Loading lexicon");
        let text = std::fs::read_to_string(path.as_ref())?;
        let lexicon = Self::from_json(&text)?;
        info!(words = lexicon.words.len(), "Lexicon loaded");
        Ok(lexicon)
    }

    /// Returns the vocabulary bundled into the binary.
    pub fn builtin() -> Self {
        // The embedded asset is validated by the test suite.
        Self::from_json(BUILTIN_LEXICON).expect("built-in lexicon parses")
    }

    /// Number of words in the vocabulary.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl LexicalSource for Lexicon {
    fn words(&self) -> &[String] {
        &self.words
    }

    fn meanings_of(&self, word: &str) -> &[Meaning] {
        self.meanings.get(word).map(Vec::as_slice).unwrap_or(&[])
    }
}
