//! Tests for the lexical database.

use std::collections::BTreeSet;
use std::fs;
use synogrid::{LexicalSource, Lexicon};
use tempfile::tempdir;

fn set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn test_builtin_lexicon_parses_and_is_usable() {
    let lexicon = Lexicon::builtin();
    assert!(!lexicon.is_empty());
    assert!(!lexicon.meanings_of("fast").is_empty());
    for word in lexicon.words() {
        assert_eq!(word, &word.to_lowercase());
    }
}

#[test]
fn test_words_and_lemmas_case_folded() {
    let lexicon = Lexicon::from_entries(vec![(
        "FAST".to_string(),
        vec![set(&["Quick", "SPEEDY"])],
    )]);

    assert_eq!(lexicon.words(), ["fast"]);
    let meanings = lexicon.meanings_of("fast");
    assert_eq!(meanings.len(), 1);
    assert_eq!(*meanings[0].lemmas(), set(&["quick", "speedy"]));
}

#[test]
fn test_unknown_word_has_no_meanings() {
    let lexicon = Lexicon::builtin();
    assert!(lexicon.meanings_of("zzgrxq").is_empty());
}

#[test]
fn test_vocabulary_is_sorted() {
    let lexicon = Lexicon::from_entries(vec![
        ("zebra".to_string(), vec![]),
        ("apple".to_string(), vec![]),
        ("mango".to_string(), vec![]),
    ]);
    assert_eq!(lexicon.words(), ["apple", "mango", "zebra"]);
}

#[test]
fn test_from_json_rejects_malformed_text() {
    let result = Lexicon::from_json("not a lexicon");
    assert!(result.is_err());
}

#[test]
fn test_from_path_round_trip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("lexicon.json");
    fs::write(&path, r#"{"fast": [["quick", "speedy"]]}"#).expect("Write failed");

    let lexicon = Lexicon::from_path(&path).expect("Load failed");
    assert_eq!(lexicon.len(), 1);
    assert_eq!(*lexicon.meanings_of("fast")[0].lemmas(), set(&["quick", "speedy"]));
}

#[test]
fn test_from_path_missing_file_is_an_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    assert!(Lexicon::from_path(dir.path().join("absent.json")).is_err());
}
