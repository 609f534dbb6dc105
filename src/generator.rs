//! Category generation by rejection sampling from the lexicon.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, trace};

use crate::lexicon::LexicalSource;

/// A connecting word paired with a fixed-size set of clue words that are
/// synonyms of it.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct Category {
    /// The hidden word all clues relate to.
    connection: String,
    /// The displayed clue words. Never contains the connection.
    clues: BTreeSet<String>,
}

/// Progress event emitted once per generation attempt. Purely observational;
/// the console maps these to the loading ticks shown while a puzzle builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A drawn word had too few synonyms and was discarded.
    Rejected,
    /// A generated category repeated a connection already in the batch.
    Duplicate,
    /// A category was accepted into the batch.
    Accepted,
}

/// Errors that can occur during category generation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GeneratorError {
    /// The attempt budget ran out before the acceptance criterion was met.
    #[display("category generation gave up after {attempts} attempts")]
    AttemptsExhausted {
        /// Number of attempts made before giving up.
        attempts: u32,
    },
    /// The lexicon has no words to draw from.
    #[display("lexicon vocabulary is empty")]
    EmptyVocabulary,
}

/// Generates puzzle categories from a lexical source.
///
/// Each category is produced by rejection sampling: draw a random word,
/// pool the lemmas of all its meanings, and accept only if enough distinct
/// synonyms remain. A vocabulary too sparse for the requested synonym count
/// would otherwise loop forever, so the loop carries an explicit attempt
/// budget and fails with [`GeneratorError::AttemptsExhausted`] instead.
#[derive(Debug, Clone)]
pub struct CategoryGenerator<'a, L: LexicalSource> {
    lexicon: &'a L,
    max_attempts: u32,
}

impl<'a, L: LexicalSource> CategoryGenerator<'a, L> {
    /// Creates a generator over the given lexicon with an attempt budget.
    pub fn new(lexicon: &'a L, max_attempts: u32) -> Self {
        Self {
            lexicon,
            max_attempts,
        }
    }

    /// Generates one category whose clues are `required_synonym_count`
    /// synonyms of a randomly drawn connection word.
    ///
    /// The candidate synonym pool is sorted before sampling so the result is
    /// a function of the pool contents and the RNG state, never of incidental
    /// iteration order. The `observer` receives a [`Tick::Rejected`] for each
    /// discarded draw.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::EmptyVocabulary`] if the lexicon has no
    /// words, or [`GeneratorError::AttemptsExhausted`] if the attempt budget
    /// runs out.
    #[instrument(skip(self, rng, observer), fields(required = required_synonym_count))]
    pub fn generate_category(
        &self,
        required_synonym_count: usize,
        rng: &mut impl Rng,
        observer: &mut dyn FnMut(Tick),
    ) -> Result<Category, GeneratorError> {
        let vocabulary = self.lexicon.words();
        if vocabulary.is_empty() {
            return Err(GeneratorError::EmptyVocabulary);
        }

        for attempt in 1..=self.max_attempts {
            let connection = vocabulary
                .choose(rng)
                .expect("vocabulary is non-empty")
                .to_lowercase();

            // Pool the lemmas of every meaning into one candidate set. The
            // connection itself never counts as its own synonym.
            let mut candidates: BTreeSet<String> = self
                .lexicon
                .meanings_of(&connection)
                .iter()
                .flat_map(|meaning| meaning.lemmas().iter().cloned())
                .collect();
            candidates.remove(&connection);

            if candidates.len() < required_synonym_count {
                trace!(attempt, word = %connection, candidates = candidates.len(), "Draw rejected");
                observer(Tick::Rejected);
                continue;
            }

            // Sort-then-sample: BTreeSet iteration is lexicographic, so the
            // ordered pool is deterministic for a given set of contents.
            let ordered: Vec<String> = candidates.into_iter().collect();
            let clues: BTreeSet<String> =
                rand::seq::index::sample(rng, ordered.len(), required_synonym_count)
                    .iter()
                    .map(|i| ordered[i].clone())
                    .collect();

            debug!(attempt, connection = %connection, "Category generated");
            return Ok(Category::new(connection, clues));
        }

        Err(GeneratorError::AttemptsExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Generates a batch of categories with pairwise distinct connections.
    ///
    /// Clues may repeat across categories in the same batch. The `observer`
    /// receives a [`Tick::Duplicate`] for each category discarded because
    /// its connection was already taken, and a [`Tick::Accepted`] for each
    /// admission.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] if the underlying category generation
    /// fails or the duplicate-rejection budget runs out.
    #[instrument(skip(self, rng, observer))]
    pub fn generate_batch(
        &self,
        num_categories: usize,
        clues_per_category: usize,
        rng: &mut impl Rng,
        observer: &mut dyn FnMut(Tick),
    ) -> Result<Vec<Category>, GeneratorError> {
        let mut batch: Vec<Category> = Vec::with_capacity(num_categories);
        let mut attempts = 0;

        while batch.len() < num_categories {
            attempts += 1;
            if attempts > self.max_attempts {
                return Err(GeneratorError::AttemptsExhausted {
                    attempts: self.max_attempts,
                });
            }

            let category = self.generate_category(clues_per_category, rng, observer)?;

            if batch
                .iter()
                .any(|existing| existing.connection() == category.connection())
            {
                trace!(connection = %category.connection(), "Duplicate connection discarded");
                observer(Tick::Duplicate);
                continue;
            }

            observer(Tick::Accepted);
            batch.push(category);
        }

        info!(categories = batch.len(), clues_per_category, "Batch generated");
        Ok(batch)
    }
}
