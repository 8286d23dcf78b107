//! The loaded lexicon and its builder.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::info;

use crate::error::LexiconResult;
use crate::paths::LexiconPaths;
use crate::reader::{for_each_line, split_fields, Separator};
use crate::taxonomy::Taxonomy;
use crate::vectors::VectorTable;

/// Immutable lookup tables for frame and sense similarity.
///
/// Shared read-only across matrix workers.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    lexical_units: HashMap<String, Vec<String>>,
    lemma_sentences: HashMap<String, Vec<String>>,
    sentence_lemmas: HashMap<String, Vec<String>>,
    sense_versions: HashMap<String, String>,
    sense_names: HashMap<String, String>,
    taxonomy: Taxonomy,
    frame_vectors: Option<VectorTable>,
}

impl Lexicon {
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::default()
    }

    /// Load every table named in `paths`. Any malformed table aborts.
    pub fn load(paths: &LexiconPaths) -> LexiconResult<Self> {
        let mut builder = Self::builder();

        info!(path = %paths.lexical_units.display(), "reading frame lexical units");
        load_pairs(&paths.lexical_units, Separator::Tab, |frame, lu| {
            builder.lexical_unit(frame, lu);
        })?;

        info!(path = %paths.corpus_lemmas.display(), "reading corpus lemmas");
        for_each_line(&paths.corpus_lemmas, |line_no, line| {
            let f = split_fields(&paths.corpus_lemmas, line_no, line, Separator::Tab, 3)?;
            builder.corpus_lemma(f[0], f[1]);
            Ok(())
        })?;

        info!(path = %paths.sense_versions.display(), "reading sense version mapping");
        load_pairs(&paths.sense_versions, Separator::Space, |old, new| {
            builder.sense_version(old, new);
        })?;

        info!(path = %paths.sense_names.display(), "reading sense names");
        load_pairs(&paths.sense_names, Separator::Tab, |offset, name| {
            builder.sense_name(offset, name);
        })?;

        info!(path = %paths.hypernyms.display(), "reading sense hypernyms");
        load_pairs(&paths.hypernyms, Separator::Tab, |child, parent| {
            builder.hypernym(child, parent);
        })?;

        if let Some(vectors) = &paths.frame_vectors {
            info!(path = %vectors.display(), "loading frame vectors");
            builder.frame_vectors(VectorTable::load(vectors)?);
        }

        let lexicon = builder.build()?;
        info!(
            frames = lexicon.lexical_units.len(),
            sentences = lexicon.sentence_count(),
            senses = lexicon.sense_names.len(),
            taxonomy = lexicon.taxonomy.len(),
            "lexicon ready"
        );
        Ok(lexicon)
    }

    /// Lexical units evoking a frame type.
    pub fn lexical_units(&self, frame: &str) -> Option<&[String]> {
        self.lexical_units.get(frame).map(Vec::as_slice)
    }

    /// Corpus sentences in which a lemma occurs.
    pub fn sentences_for(&self, lemma: &str) -> Option<&[String]> {
        self.lemma_sentences.get(lemma).map(Vec::as_slice)
    }

    /// Lemmas occurring in a corpus sentence.
    pub fn lemmas_in(&self, sentence: &str) -> Option<&[String]> {
        self.sentence_lemmas.get(sentence).map(Vec::as_slice)
    }

    /// Number of distinct corpus sentences.
    pub fn sentence_count(&self) -> usize {
        self.sentence_lemmas.len()
    }

    /// Union of the sentences in which any lexical unit of `frame` occurs.
    pub fn frame_contexts(&self, frame: &str) -> Option<HashSet<&str>> {
        let lus = self.lexical_units(frame)?;
        Some(
            lus.iter()
                .filter_map(|lu| self.sentences_for(lu))
                .flatten()
                .map(String::as_str)
                .collect(),
        )
    }

    /// Map a sense id from the newer inventory version to the older one.
    pub fn map_sense_version(&self, new_id: &str) -> Option<&str> {
        self.sense_versions.get(new_id).map(String::as_str)
    }

    /// Canonical name of a sense offset (e.g. `dog.n.01`).
    pub fn sense_name(&self, offset: &str) -> Option<&str> {
        self.sense_names.get(offset).map(String::as_str)
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn frame_vectors(&self) -> Option<&VectorTable> {
        self.frame_vectors.as_ref()
    }
}

fn load_pairs<F>(path: &Path, sep: Separator, mut f: F) -> LexiconResult<usize>
where
    F: FnMut(&str, &str),
{
    for_each_line(path, |line_no, line| {
        let fields = split_fields(path, line_no, line, sep, 2)?;
        f(fields[0], fields[1]);
        Ok(())
    })
}

/// Incremental construction of a [`Lexicon`].
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    lexical_units: HashMap<String, Vec<String>>,
    lemma_sentences: HashMap<String, Vec<String>>,
    sentence_lemmas: HashMap<String, Vec<String>>,
    sense_versions: HashMap<String, String>,
    sense_names: HashMap<String, String>,
    hypernyms: Vec<(String, String)>,
    frame_vectors: Option<VectorTable>,
}

impl LexiconBuilder {
    pub fn lexical_unit(&mut self, frame: &str, lexical_unit: &str) -> &mut Self {
        self.lexical_units
            .entry(frame.to_string())
            .or_default()
            .push(lexical_unit.to_string());
        self
    }

    pub fn corpus_lemma(&mut self, sentence: &str, lemma: &str) -> &mut Self {
        self.sentence_lemmas
            .entry(sentence.to_string())
            .or_default()
            .push(lemma.to_string());
        self.lemma_sentences
            .entry(lemma.to_string())
            .or_default()
            .push(sentence.to_string());
        self
    }

    /// Record that `new_id` corresponds to `old_id`.
    pub fn sense_version(&mut self, old_id: &str, new_id: &str) -> &mut Self {
        self.sense_versions
            .insert(new_id.to_string(), old_id.to_string());
        self
    }

    pub fn sense_name(&mut self, offset: &str, name: &str) -> &mut Self {
        self.sense_names.insert(offset.to_string(), name.to_string());
        self
    }

    pub fn hypernym(&mut self, child: &str, parent: &str) -> &mut Self {
        self.hypernyms.push((child.to_string(), parent.to_string()));
        self
    }

    pub fn frame_vectors(&mut self, table: VectorTable) -> &mut Self {
        self.frame_vectors = Some(table);
        self
    }

    pub fn build(self) -> LexiconResult<Lexicon> {
        Ok(Lexicon {
            lexical_units: self.lexical_units,
            lemma_sentences: self.lemma_sentences,
            sentence_lemmas: self.sentence_lemmas,
            sense_versions: self.sense_versions,
            sense_names: self.sense_names,
            taxonomy: Taxonomy::from_edges(self.hypernyms)?,
            frame_vectors: self.frame_vectors,
        })
    }
}
