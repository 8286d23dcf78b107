//! Frame-validity gates.
//!
//! A validator sees an instance as its lowercased frame type plus a
//! lowercased role → concept key map, and answers keep or drop. Instances
//! it rejects never reach prototype selection.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use protoframe_lexicon::{
    for_each_line, split_fields, Lexicon, LexiconError, LexiconResult, Separator, VectorTable,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CurationError, CurationResult};

pub trait FrameValidator: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_valid(&self, frame_type: &str, roles: &BTreeMap<String, String>) -> bool;
}

// ── Accept all ─────────────────────────────────────────────────────────

/// Keeps every instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl FrameValidator for AcceptAll {
    fn name(&self) -> &'static str {
        "none"
    }

    fn is_valid(&self, _frame_type: &str, _roles: &BTreeMap<String, String>) -> bool {
        true
    }
}

// ── Core elements ──────────────────────────────────────────────────────

/// Valid when enough of the frame type's core elements are filled.
///
/// Frame types that are unknown or declare no core element are invalid.
#[derive(Debug, Clone)]
pub struct CoreElementValidator {
    cores: HashMap<String, HashSet<String>>,
    threshold: f64,
}

impl CoreElementValidator {
    pub fn new(threshold: f64) -> Self {
        Self {
            cores: HashMap::new(),
            threshold,
        }
    }

    /// Load `frame_type<TAB>element<TAB>core_type` annotations. Only
    /// `Core` and `Core-Unexpressed` elements count.
    pub fn load(path: &Path, threshold: f64) -> LexiconResult<Self> {
        let mut validator = Self::new(threshold);
        for_each_line(path, |line_no, line| {
            let f = split_fields(path, line_no, line, Separator::Tab, 3)?;
            validator.element(f[0], f[1], f[2]);
            Ok(())
        })?;
        info!(path = %path.display(), frame_types = validator.cores.len(), "loaded core element annotations");
        Ok(validator)
    }

    /// Record one annotated element of a frame type.
    pub fn element(&mut self, frame_type: &str, element: &str, core_type: &str) -> &mut Self {
        let cores = self.cores.entry(frame_type.to_lowercase()).or_default();
        if core_type == "Core" || core_type == "Core-Unexpressed" {
            cores.insert(element.to_lowercase());
        }
        self
    }
}

impl FrameValidator for CoreElementValidator {
    fn name(&self) -> &'static str {
        "core"
    }

    fn is_valid(&self, frame_type: &str, roles: &BTreeMap<String, String>) -> bool {
        let cores = match self.cores.get(frame_type) {
            Some(c) if !c.is_empty() => c,
            _ => return false,
        };
        let present = roles.keys().filter(|r| cores.contains(*r)).count();
        present as f64 / cores.len() as f64 >= self.threshold
    }
}

// ── Synset annotations ─────────────────────────────────────────────────

/// Valid when at least one filler's sense is annotated for its role.
pub struct SynsetValidator {
    // frame type -> role -> annotated sense offsets
    annotations: HashMap<String, HashMap<String, HashSet<String>>>,
    lexicon: Arc<Lexicon>,
}

impl SynsetValidator {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            annotations: HashMap::new(),
            lexicon,
        }
    }

    /// Load `frame_type<TAB>element<TAB>lemma_synset` annotations, where
    /// `lemma_synset` looks like `dog_102084071`.
    pub fn load(path: &Path, lexicon: Arc<Lexicon>) -> CurationResult<Self> {
        let pattern = lemma_synset_pattern()?;
        let mut validator = Self::new(lexicon);
        for_each_line(path, |line_no, line| {
            let f = split_fields(path, line_no, line, Separator::Tab, 3)?;
            let offset = pattern
                .captures(f[2])
                .and_then(|c| c.get(2))
                .map(|m| drop_first(m.as_str()))
                .ok_or_else(|| LexiconError::Malformed {
                    path: path.to_path_buf(),
                    line: line_no,
                    reason: format!("not a lemma_synset token: {}", f[2]),
                })?;
            validator.annotate(f[0], f[1], offset);
            Ok(())
        })?;
        info!(path = %path.display(), frame_types = validator.annotations.len(), "loaded synset annotations");
        Ok(validator)
    }

    /// Mark `offset` (an older-inventory sense offset without POS suffix)
    /// as a plausible filler of `element` in `frame_type`.
    pub fn annotate(&mut self, frame_type: &str, element: &str, offset: &str) -> &mut Self {
        self.annotations
            .entry(frame_type.to_lowercase())
            .or_default()
            .entry(element.to_lowercase())
            .or_default()
            .insert(offset.to_string());
        self
    }
}

impl FrameValidator for SynsetValidator {
    fn name(&self) -> &'static str {
        "synset"
    }

    fn is_valid(&self, frame_type: &str, roles: &BTreeMap<String, String>) -> bool {
        let Some(by_role) = self.annotations.get(frame_type) else {
            return false;
        };
        roles.iter().any(|(role, key)| {
            let (Some(annotated), Some(old)) = (by_role.get(role), self.lexicon.map_sense_version(key)) else {
                return false;
            };
            annotated.contains(drop_suffix(old, 2))
        })
    }
}

fn lemma_synset_pattern() -> Result<Regex, regex::Error> {
    Regex::new(r"^(.+)_(\d+)")
}

fn drop_first(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.as_str()
}

fn drop_suffix(s: &str, n: usize) -> &str {
    match s.char_indices().rev().nth(n.saturating_sub(1)) {
        Some((idx, _)) if n > 0 => &s[..idx],
        _ if n == 0 => s,
        _ => "",
    }
}

// ── Embeddings ─────────────────────────────────────────────────────────

/// Valid when roles and their fillers' lemmas are close in a word
/// embedding space on average.
pub struct EmbeddingValidator {
    vectors: VectorTable,
    lexicon: Arc<Lexicon>,
    threshold: f64,
}

impl EmbeddingValidator {
    pub fn new(vectors: VectorTable, lexicon: Arc<Lexicon>, threshold: f64) -> Self {
        Self {
            vectors,
            lexicon,
            threshold,
        }
    }

    pub fn load(path: &Path, lexicon: Arc<Lexicon>, threshold: f64) -> LexiconResult<Self> {
        Ok(Self::new(VectorTable::load(path)?, lexicon, threshold))
    }

    /// `dog.n.01` → `dog`, through the sense version map and sense names.
    fn filler_lemma<'a>(&'a self, key: &str) -> Option<&'a str> {
        let old = self.lexicon.map_sense_version(key)?;
        let name = self.lexicon.sense_name(old)?;
        name.split('.').next()
    }
}

impl FrameValidator for EmbeddingValidator {
    fn name(&self) -> &'static str {
        "embeddings"
    }

    /// Pairs outside the vocabulary are ignored; an instance with no
    /// scorable pair is valid.
    fn is_valid(&self, _frame_type: &str, roles: &BTreeMap<String, String>) -> bool {
        let scores: Vec<f64> = roles
            .iter()
            .filter_map(|(role, key)| {
                let lemma = self.filler_lemma(key)?;
                self.vectors.similarity(role, lemma)
            })
            .collect();
        if scores.is_empty() {
            return true;
        }
        scores.iter().sum::<f64>() / scores.len() as f64 > self.threshold
    }
}

// ── Configuration ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidatorKind {
    Core,
    Synset,
    Embeddings,
    None,
}

impl ValidatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorKind::Core => "core",
            ValidatorKind::Synset => "synset",
            ValidatorKind::Embeddings => "embeddings",
            ValidatorKind::None => "none",
        }
    }

    pub fn needs_lexicon(&self) -> bool {
        matches!(self, ValidatorKind::Synset | ValidatorKind::Embeddings)
    }
}

impl std::str::FromStr for ValidatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "core" => Ok(ValidatorKind::Core),
            "synset" => Ok(ValidatorKind::Synset),
            "embeddings" => Ok(ValidatorKind::Embeddings),
            "none" => Ok(ValidatorKind::None),
            other => Err(format!("unknown validator: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    #[serde(default = "default_kind")]
    pub kind: ValidatorKind,

    /// Minimum fraction of core elements an instance must fill.
    #[serde(default = "default_core_threshold")]
    pub core_threshold: f64,

    /// Average role/filler cosine an instance must exceed.
    #[serde(default = "default_embedding_threshold")]
    pub embedding_threshold: f64,

    #[serde(default = "default_core_annotations")]
    pub core_annotations: PathBuf,

    #[serde(default = "default_synset_annotations")]
    pub synset_annotations: PathBuf,

    #[serde(default = "default_word_vectors")]
    pub word_vectors: PathBuf,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            core_threshold: default_core_threshold(),
            embedding_threshold: default_embedding_threshold(),
            core_annotations: default_core_annotations(),
            synset_annotations: default_synset_annotations(),
            word_vectors: default_word_vectors(),
        }
    }
}

fn default_kind() -> ValidatorKind {
    ValidatorKind::None
}

fn default_core_threshold() -> f64 {
    0.75
}

fn default_embedding_threshold() -> f64 {
    0.7
}

fn default_core_annotations() -> PathBuf {
    PathBuf::from("resource/frames/core_elements.tsv")
}

fn default_synset_annotations() -> PathBuf {
    PathBuf::from("resource/frames/element_synsets.tsv")
}

fn default_word_vectors() -> PathBuf {
    PathBuf::from("resource/embeddings/word_vectors.txt")
}

/// Build the configured validator, loading its annotation tables.
pub fn build_validator(
    config: &ValidatorConfig,
    lexicon: Option<Arc<Lexicon>>,
) -> CurationResult<Box<dyn FrameValidator>> {
    let lexicon = || lexicon.clone().ok_or(CurationError::LexiconRequired(config.kind.as_str()));

    Ok(match config.kind {
        ValidatorKind::None => Box::new(AcceptAll),
        ValidatorKind::Core => Box::new(CoreElementValidator::load(
            &config.core_annotations,
            config.core_threshold,
        )?),
        ValidatorKind::Synset => Box::new(SynsetValidator::load(
            &config.synset_annotations,
            lexicon()?,
        )?),
        ValidatorKind::Embeddings => Box::new(EmbeddingValidator::load(
            &config.word_vectors,
            lexicon()?,
            config.embedding_threshold,
        )?),
    })
}
