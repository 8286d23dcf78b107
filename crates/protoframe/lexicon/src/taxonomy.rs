//! Sense hypernym hierarchy.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{LexiconError, LexiconResult};

/// Hypernym hierarchy over sense names, with multiple inheritance.
///
/// Depths are precomputed at construction: a root has depth 0 and every
/// other node is one deeper than its deepest hypernym. Names that never
/// appear in the table behave as isolated roots.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    parents: HashMap<String, Vec<String>>,
    depths: HashMap<String, usize>,
}

impl Taxonomy {
    /// Build from `(child, hypernym)` edges. Cycles are rejected.
    pub fn from_edges<I>(edges: I) -> LexiconResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut parents: HashMap<String, Vec<String>> = HashMap::new();
        for (child, parent) in edges {
            parents.entry(parent.clone()).or_default();
            let entry = parents.entry(child).or_default();
            if !entry.contains(&parent) {
                entry.push(parent);
            }
        }

        let mut depths = HashMap::with_capacity(parents.len());
        let mut visiting = HashSet::new();
        let mut nodes: Vec<&String> = parents.keys().collect();
        nodes.sort();
        for node in nodes {
            longest_path(node, &parents, &mut depths, &mut visiting)?;
        }

        Ok(Self { parents, depths })
    }

    /// Whether the name occurs in the hierarchy.
    pub fn contains(&self, node: &str) -> bool {
        self.parents.contains_key(node)
    }

    /// Direct hypernyms of a node.
    pub fn parents(&self, node: &str) -> &[String] {
        self.parents.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Longest hypernym path length to a root (roots and unknown names: 0).
    pub fn depth(&self, node: &str) -> usize {
        self.depths.get(node).copied().unwrap_or(0)
    }

    /// Every ancestor of `node` (including itself) with its shortest
    /// hypernym-path distance from `node`.
    pub fn ancestors<'a>(&'a self, node: &'a str) -> HashMap<&'a str, usize> {
        let mut dist: HashMap<&'a str, usize> = HashMap::new();
        let mut queue = VecDeque::new();
        dist.insert(node, 0);
        queue.push_back(node);
        while let Some(current) = queue.pop_front() {
            let d = dist[current];
            for parent in self.parents(current) {
                if !dist.contains_key(parent.as_str()) {
                    dist.insert(parent.as_str(), d + 1);
                    queue.push_back(parent.as_str());
                }
            }
        }
        dist
    }

    /// Number of distinct names in the hierarchy.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

fn longest_path(
    node: &str,
    parents: &HashMap<String, Vec<String>>,
    depths: &mut HashMap<String, usize>,
    visiting: &mut HashSet<String>,
) -> LexiconResult<usize> {
    if let Some(&d) = depths.get(node) {
        return Ok(d);
    }
    if !visiting.insert(node.to_string()) {
        return Err(LexiconError::TaxonomyCycle(node.to_string()));
    }

    let mut depth = 0;
    if let Some(ps) = parents.get(node) {
        for parent in ps {
            depth = depth.max(longest_path(parent, parents, depths, visiting)? + 1);
        }
    }

    visiting.remove(node);
    depths.insert(node.to_string(), depth);
    Ok(depth)
}
