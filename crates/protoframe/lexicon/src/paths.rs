//! Locations of the static tables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// File paths for every table the lexicon loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconPaths {
    /// `frame<TAB>lexical_unit`
    pub lexical_units: PathBuf,
    /// `sentence_id<TAB>lemma<TAB>sense`
    pub corpus_lemmas: PathBuf,
    /// `old_id<SPACE>new_id`
    pub sense_versions: PathBuf,
    /// `offset<TAB>name`
    pub sense_names: PathBuf,
    /// `name<TAB>hypernym_name`
    pub hypernyms: PathBuf,
    /// Optional frame-type embedding table.
    #[serde(default)]
    pub frame_vectors: Option<PathBuf>,
}

impl Default for LexiconPaths {
    fn default() -> Self {
        let root = PathBuf::from("resource");
        Self {
            lexical_units: root.join("fsimilarity/frame_lexical_units.tsv"),
            corpus_lemmas: root.join("fsimilarity/semcor3.0_lemmas.tsv"),
            sense_versions: root.join("mapping/wn30-31.map"),
            sense_names: root.join("fsimilarity/wordnet_offsets.tsv"),
            hypernyms: root.join("fsimilarity/wordnet_hypernyms.tsv"),
            frame_vectors: None,
        }
    }
}

impl LexiconPaths {
    /// Resolve every path relative to `root`.
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let defaults = Self::default();
        let rebase = |p: PathBuf| match p.strip_prefix("resource") {
            Ok(rest) => root.join(rest),
            Err(_) => root.join(&p),
        };
        Self {
            lexical_units: rebase(defaults.lexical_units),
            corpus_lemmas: rebase(defaults.corpus_lemmas),
            sense_versions: rebase(defaults.sense_versions),
            sense_names: rebase(defaults.sense_names),
            hypernyms: rebase(defaults.hypernyms),
            frame_vectors: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_rebases_defaults() {
        let paths = LexiconPaths::under("/data");
        assert_eq!(
            paths.lexical_units,
            PathBuf::from("/data/fsimilarity/frame_lexical_units.tsv")
        );
        assert_eq!(paths.sense_versions, PathBuf::from("/data/mapping/wn30-31.map"));
        assert!(paths.frame_vectors.is_none());
    }
}
