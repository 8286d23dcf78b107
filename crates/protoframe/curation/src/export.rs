//! Rendering selected prototypes as text and triples.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use protoframe_lexicon::{for_each_line, split_fields, LexiconError, LexiconResult, Separator};
use protoframe_types::{PrototypeRecord, Prototypes};
use serde::Deserialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify};
use tabled::{Table, Tabled};
use tracing::info;

use crate::error::{CurationError, CurationResult};

const FE_NAMESPACE: &str = "http://framebase.org/fe/";
const FRAME_NAMESPACE: &str = "http://framebase.org/frame/";

/// Human label and linked-data target of one concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptEntry {
    pub label: String,
    pub target: String,
}

/// Concept key → label and resource id.
#[derive(Debug, Clone, Default)]
pub struct ConceptCatalog {
    entries: HashMap<String, ConceptEntry>,
}

impl ConceptCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `concept_key<TAB>label<TAB>target_id` lines.
    pub fn load(path: &Path) -> LexiconResult<Self> {
        let mut catalog = Self::new();
        for_each_line(path, |line_no, line| {
            let f = split_fields(path, line_no, line, Separator::Tab, 3)?;
            catalog.insert(f[0], f[1], f[2]);
            Ok(())
        })?;
        info!(path = %path.display(), concepts = catalog.len(), "loaded concept catalog");
        Ok(catalog)
    }

    pub fn insert(&mut self, key: &str, label: &str, target: &str) -> &mut Self {
        self.entries.insert(
            key.to_string(),
            ConceptEntry {
                label: label.to_string(),
                target: target.to_string(),
            },
        );
        self
    }

    pub fn get(&self, key: &str) -> Option<&ConceptEntry> {
        self.entries.get(key)
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.get(key).map(|e| e.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resource URI of a target id: BabelNet for `s00…` ids, DBpedia otherwise.
pub fn resource_uri(target: &str) -> String {
    if target.starts_with("s00") {
        format!("http://babelnet.org/rdf/{}", target)
    } else {
        format!("http://dbpedia.org/resource/{}", target)
    }
}

/// `In frame COMMERCE_BUY 'car' is the 'goods' and 'ann' is the 'buyer'`.
///
/// Fillers without a label are left out.
pub fn verbalize(record: &PrototypeRecord, catalog: &ConceptCatalog) -> String {
    let parts: Vec<String> = record
        .elements
        .iter()
        .filter_map(|(role, key)| {
            catalog
                .label(key)
                .map(|label| format!("'{}' is the '{}'", label, role))
        })
        .collect();
    format!("In frame {} {}", record.frame_type.to_uppercase(), parts.join(" and "))
}

/// One `<subject> <predicate> <object>` statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    fn new(subject: String, predicate: String, object: String) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> <{}>", self.subject, self.predicate, self.object)
    }
}

/// Triples of one prototype, with URIs and with plain labels, index
/// aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameTriples {
    pub uris: Vec<Triple>,
    pub labels: Vec<Triple>,
}

/// One `filler roleOf frame` triple per element whose filler is in the
/// catalog.
pub fn triples(record: &PrototypeRecord, catalog: &ConceptCatalog) -> FrameTriples {
    let mut out = FrameTriples::default();
    for (role, key) in &record.elements {
        let Some(entry) = catalog.get(key) else {
            continue;
        };
        out.uris.push(Triple::new(
            resource_uri(&entry.target),
            format!("{}{}Of", FE_NAMESPACE, title_case(role)),
            format!("{}{}", FRAME_NAMESPACE, record.frame_type),
        ));
        out.labels.push(Triple::new(
            entry.label.clone(),
            format!("{}Of", role),
            record.frame_type.to_lowercase(),
        ));
    }
    out
}

/// Uppercase every letter that follows a non-letter, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut boundary = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(c);
            boundary = true;
        }
    }
    out
}

/// Distinct frame types, roles, and fillers across a set of triples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetStatistics {
    pub frame_types: usize,
    pub frame_elements: usize,
    pub fillers: usize,
    pub relations: usize,
}

impl DatasetStatistics {
    pub fn from_triples<'a, I>(triples: I) -> Self
    where
        I: IntoIterator<Item = &'a Triple>,
    {
        let mut types = HashSet::new();
        let mut elements = HashSet::new();
        let mut fillers = HashSet::new();
        let mut relations = 0;
        for t in triples {
            fillers.insert(t.subject.as_str());
            elements.insert(t.predicate.as_str());
            types.insert(t.object.as_str());
            relations += 1;
        }
        Self {
            frame_types: types.len(),
            frame_elements: elements.len(),
            fillers: fillers.len(),
            relations,
        }
    }
}

#[derive(Tabled)]
struct StatisticsRow {
    #[tabled(rename = "Item")]
    item: &'static str,
    #[tabled(rename = "Amount")]
    amount: usize,
}

impl DatasetStatistics {
    /// Two-column `Item | Amount` table, amounts right aligned.
    pub fn table(&self) -> Table {
        let rows = [
            ("Frame types", self.frame_types),
            ("Frame elements", self.frame_elements),
            ("Frame elements fillers", self.fillers),
            ("Relations", self.relations),
        ]
        .map(|(item, amount)| StatisticsRow { item, amount });

        let mut table = Table::new(rows);
        table.with(Modify::new(Columns::single(1)).with(Alignment::right()));
        table
    }
}

impl fmt::Display for DatasetStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

// ── Relation selection ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum SeedFile {
    /// `{"dining table": {"dbpedia_uri": "http://dbpedia.org/resource/Table"}}`
    Described(HashMap<String, SeedEntry>),
    /// `["dining table", "http://dbpedia.org/resource/Chair"]`
    Listed(Vec<String>),
}

#[derive(Deserialize)]
struct SeedEntry {
    #[serde(default)]
    dbpedia_uri: Option<String>,
}

/// Objects of interest. A triple is kept when its filler is one of them,
/// by resource URI or by label.
#[derive(Debug, Clone, Default)]
pub struct SeedObjects {
    uris: HashSet<String>,
    names: HashSet<String>,
}

impl SeedObjects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON object of `name -> {"dbpedia_uri": uri}` or a JSON list
    /// of names and URIs. Spaces in names become underscores.
    pub fn load(path: &Path) -> CurationResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: SeedFile =
            serde_json::from_str(&raw).map_err(|source| CurationError::Seeds {
                path: path.to_path_buf(),
                source,
            })?;

        let mut seeds = Self::new();
        match file {
            SeedFile::Described(entries) => {
                for (name, entry) in entries {
                    seeds.name(&name);
                    if let Some(uri) = entry.dbpedia_uri {
                        seeds.uri(&uri);
                    }
                }
            }
            SeedFile::Listed(items) => {
                for item in items {
                    if item.starts_with("http://") || item.starts_with("https://") {
                        seeds.uri(&item);
                    } else {
                        seeds.name(&item);
                    }
                }
            }
        }
        info!(
            path = %path.display(),
            uris = seeds.uris.len(),
            names = seeds.names.len(),
            "loaded seed objects"
        );
        Ok(seeds)
    }

    pub fn name(&mut self, name: &str) -> &mut Self {
        self.names.insert(name.replace(' ', "_"));
        self
    }

    pub fn uri(&mut self, uri: &str) -> &mut Self {
        self.uris.insert(uri.to_string());
        self
    }

    /// Whether the filler of a triple pair is a seed object.
    pub fn matches(&self, uri: &Triple, label: &Triple) -> bool {
        self.uris.contains(&uri.subject) || self.names.contains(&label.subject)
    }
}

/// Triples and sentences kept for output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationSelection {
    pub uris: Vec<Triple>,
    /// Label forms, index aligned with `uris`.
    pub labels: Vec<Triple>,
    /// Prototype ids that contributed at least one triple, in key order.
    pub frames: Vec<String>,
    /// Verbalization of each kept prototype.
    pub sentences: Vec<String>,
}

/// Collect the triples of every prototype, keeping only those whose filler
/// is a seed object when `seeds` is given.
///
/// A URI triple is kept once, at its first occurrence. A prototype that
/// adds no new triple is left out of the sentences.
pub fn select_relations(
    prototypes: &Prototypes,
    catalog: &ConceptCatalog,
    seeds: Option<&SeedObjects>,
) -> RelationSelection {
    let mut out = RelationSelection::default();
    let mut seen = HashSet::new();

    for (id, record) in prototypes {
        let FrameTriples { uris, labels } = triples(record, catalog);
        let mut kept = false;
        for (uri, label) in uris.into_iter().zip(labels) {
            if seeds.map_or(true, |s| s.matches(&uri, &label)) && seen.insert(uri.clone()) {
                out.uris.push(uri);
                out.labels.push(label);
                kept = true;
            }
        }
        if kept {
            out.frames.push(id.clone());
            out.sentences.push(verbalize(record, catalog));
        }
    }

    info!(
        prototypes = prototypes.len(),
        kept = out.frames.len(),
        relations = out.uris.len(),
        "selected relations"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record() -> PrototypeRecord {
        let mut elements = BTreeMap::new();
        elements.insert("buyer".to_string(), "s00001n".to_string());
        elements.insert("goods".to_string(), "s00002n".to_string());
        elements.insert("place".to_string(), "s00003n".to_string());
        PrototypeRecord {
            frame_type: "Commerce_buy".into(),
            elements,
        }
    }

    fn catalog() -> ConceptCatalog {
        let mut c = ConceptCatalog::new();
        c.insert("s00001n", "person", "Person")
            .insert("s00002n", "car", "s00002n");
        c
    }

    #[test]
    fn uri_namespaces() {
        assert_eq!(resource_uri("s00002n"), "http://babelnet.org/rdf/s00002n");
        assert_eq!(resource_uri("Person"), "http://dbpedia.org/resource/Person");
    }

    #[test]
    fn verbalization_skips_unlabelled_fillers() {
        assert_eq!(
            verbalize(&record(), &catalog()),
            "In frame COMMERCE_BUY 'person' is the 'buyer' and 'car' is the 'goods'"
        );
        assert_eq!(
            verbalize(&record(), &ConceptCatalog::new()),
            "In frame COMMERCE_BUY "
        );
    }

    #[test]
    fn triples_in_both_forms() {
        let t = triples(&record(), &catalog());
        assert_eq!(t.uris.len(), 2);
        assert_eq!(
            t.uris[0].to_string(),
            "<http://dbpedia.org/resource/Person> <http://framebase.org/fe/BuyerOf> <http://framebase.org/frame/Commerce_buy>"
        );
        assert_eq!(t.labels[1].to_string(), "<car> <goodsOf> <commerce_buy>");
    }

    #[test]
    fn title_case_follows_word_boundaries() {
        assert_eq!(title_case("goods"), "Goods");
        assert_eq!(title_case("body_part"), "Body_Part");
        assert_eq!(title_case("mANNER"), "Manner");
    }

    #[test]
    fn statistics_count_distinct_parts() {
        let t = triples(&record(), &catalog());
        let stats = DatasetStatistics::from_triples(&t.uris);
        assert_eq!(
            stats,
            DatasetStatistics {
                frame_types: 1,
                frame_elements: 2,
                fillers: 2,
                relations: 2,
            }
        );

        let rendered = stats.to_string();
        assert!(rendered.contains("| Item"));
        assert!(rendered.contains("Amount"));
        let relations = rendered
            .lines()
            .find(|l| l.contains("Relations"))
            .unwrap();
        assert!(relations.trim_end().ends_with("2 |"), "{}", relations);
        let fillers = rendered
            .lines()
            .find(|l| l.contains("Frame elements fillers"))
            .unwrap();
        assert!(fillers.starts_with("| Frame elements fillers"));
    }

    fn prototypes() -> Prototypes {
        let mut other = BTreeMap::new();
        other.insert("buyer".to_string(), "s00001n".to_string());
        other.insert("goods".to_string(), "s00004n".to_string());
        let mut out = Prototypes::new();
        out.insert("fi_1".into(), record());
        out.insert(
            "fi_2".into(),
            PrototypeRecord {
                frame_type: "Commerce_buy".into(),
                elements: other,
            },
        );
        out
    }

    #[test]
    fn relations_without_seeds_drop_repeats() {
        let mut c = catalog();
        c.insert("s00004n", "bread", "Bread");
        let selection = select_relations(&prototypes(), &c, None);
        // fi_2 repeats the buyer triple but adds its goods
        assert_eq!(selection.uris.len(), 3);
        assert_eq!(selection.labels.len(), 3);
        assert_eq!(selection.frames, vec!["fi_1", "fi_2"]);

        // nothing new from fi_2 when its goods are unknown
        let selection = select_relations(&prototypes(), &catalog(), None);
        assert_eq!(selection.uris.len(), 2);
        assert_eq!(selection.frames, vec!["fi_1"]);
        assert_eq!(selection.sentences.len(), 1);
    }

    #[test]
    fn relations_keep_seed_fillers_by_uri_or_label() {
        let mut c = catalog();
        c.insert("s00004n", "bread", "Bread");

        let mut by_label = SeedObjects::new();
        by_label.name("car");
        let selection = select_relations(&prototypes(), &c, Some(&by_label));
        assert_eq!(selection.frames, vec!["fi_1"]);
        assert_eq!(selection.labels[0].to_string(), "<car> <goodsOf> <commerce_buy>");

        let mut by_uri = SeedObjects::new();
        by_uri.uri("http://dbpedia.org/resource/Bread");
        let selection = select_relations(&prototypes(), &c, Some(&by_uri));
        assert_eq!(selection.frames, vec!["fi_2"]);
        assert_eq!(
            selection.sentences,
            vec!["In frame COMMERCE_BUY 'person' is the 'buyer' and 'bread' is the 'goods'"]
        );
    }

    #[test]
    fn seed_names_use_underscores() {
        let mut seeds = SeedObjects::new();
        seeds.name("dining table");
        let label = Triple::new("dining_table".into(), "placeOf".into(), "x".into());
        let uri = Triple::new("http://example.org/t".into(), "p".into(), "o".into());
        assert!(seeds.matches(&uri, &label));
    }
}
