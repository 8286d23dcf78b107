//! Loading the full lexicon from disk.

use std::fs;
use std::path::Path;

use protoframe_lexicon::{Lexicon, LexiconError, LexiconPaths};

fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

fn fixture(dir: &Path) -> LexiconPaths {
    LexiconPaths {
        lexical_units: write(
            dir,
            "lus.tsv",
            "Commerce_buy\tbuy\nCommerce_buy\tpurchase\nCommerce_sell\tsell\n",
        ),
        corpus_lemmas: write(
            dir,
            "lemmas.tsv",
            "s1\tbuy\tbuy%2:40:00::\ns1\tsell\tsell%2:40:00::\ns2\tpurchase\tpurchase%2:40:00::\n\ns3\tdog\tdog%1:05:00::\n",
        ),
        sense_versions: write(dir, "wn30-31.map", "02084071-n 02086723-n\n"),
        sense_names: write(dir, "offsets.tsv", "02084071-n\tdog.n.01\n"),
        hypernyms: write(
            dir,
            "hypernyms.tsv",
            "dog.n.01\tcanine.n.02\ncanine.n.02\tanimal.n.01\n",
        ),
        frame_vectors: Some(write(
            dir,
            "vectors.txt",
            "Commerce_buy 1 0\nCommerce_sell 1 1\n",
        )),
    }
}

#[test]
fn loads_every_table() {
    let dir = tempfile::tempdir().unwrap();
    let lexicon = Lexicon::load(&fixture(dir.path())).unwrap();

    assert_eq!(lexicon.lexical_units("Commerce_buy").unwrap().len(), 2);
    assert_eq!(lexicon.sentence_count(), 3);
    assert_eq!(lexicon.map_sense_version("02086723-n"), Some("02084071-n"));
    assert_eq!(lexicon.sense_name("02084071-n"), Some("dog.n.01"));
    assert_eq!(lexicon.taxonomy().depth("dog.n.01"), 2);
    assert_eq!(lexicon.frame_vectors().unwrap().len(), 2);
}

#[test]
fn malformed_table_aborts_loading() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = fixture(dir.path());
    paths.sense_names = write(dir.path(), "offsets.tsv", "02084071-n\tdog.n.01\nbroken-line\n");

    match Lexicon::load(&paths) {
        Err(LexiconError::Malformed { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected malformed error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn missing_table_aborts_loading() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = fixture(dir.path());
    paths.hypernyms = dir.path().join("absent.tsv");
    assert!(matches!(Lexicon::load(&paths), Err(LexiconError::Io { .. })));
}

#[test]
fn vectors_are_optional() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = fixture(dir.path());
    paths.frame_vectors = None;
    let lexicon = Lexicon::load(&paths).unwrap();
    assert!(lexicon.frame_vectors().is_none());
}
