//! Dense embedding tables.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::error::{LexiconError, LexiconResult};
use crate::reader::for_each_line;

/// Word → vector table read from whitespace-separated text
/// (`word v1 v2 ... vn`). All vectors share one dimension.
#[derive(Debug, Clone, Default)]
pub struct VectorTable {
    vectors: HashMap<String, Vec<f64>>,
    dimension: usize,
}

impl VectorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a text embedding file.
    pub fn load(path: &Path) -> LexiconResult<Self> {
        let mut table = Self::new();
        for_each_line(path, |line_no, line| {
            let mut parts = line.split_whitespace();
            let word = parts.next().unwrap_or_default();
            let values = parts
                .map(|v| {
                    v.parse::<f64>().map_err(|e| LexiconError::InvalidVector {
                        path: path.to_path_buf(),
                        line: line_no,
                        reason: format!("{}: {}", v, e),
                    })
                })
                .collect::<LexiconResult<Vec<f64>>>()?;
            table
                .insert(word, values)
                .map_err(|reason| LexiconError::InvalidVector {
                    path: path.to_path_buf(),
                    line: line_no,
                    reason,
                })
        })?;
        info!(path = %path.display(), words = table.len(), dimension = table.dimension, "loaded vector table");
        Ok(table)
    }

    /// Add a vector. The first vector fixes the table dimension.
    pub fn insert(&mut self, word: impl Into<String>, vector: Vec<f64>) -> Result<(), String> {
        if vector.is_empty() {
            return Err("vector has no components".into());
        }
        if self.dimension == 0 {
            self.dimension = vector.len();
        } else if vector.len() != self.dimension {
            return Err(format!(
                "dimension {} does not match table dimension {}",
                vector.len(),
                self.dimension
            ));
        }
        self.vectors.insert(word.into(), vector);
        Ok(())
    }

    pub fn get(&self, word: &str) -> Option<&[f64]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    /// Cosine similarity between two stored words, if both are present.
    pub fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        Some(cosine_similarity(self.get(a)?, self.get(b)?))
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Cosine similarity of two equal-length vectors. Zero vectors give 0.0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let (mut dot, mut na, mut nb) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}
