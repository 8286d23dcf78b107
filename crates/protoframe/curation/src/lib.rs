//! # protoframe-curation
//!
//! The stages around prototype selection: frame-validity gates in front,
//! per-frame-type search in the middle, text and triple rendering behind.
//!
//! ```text
//! instances ─► filter_instances(validator) ─► FrameGroups
//!           ─► PrototypeSearch(selector, min_group_size) ─► Prototypes
//!           ─► select_relations(ConceptCatalog, SeedObjects) ─► triples, sentences
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod export;
pub mod filter;
pub mod search;
pub mod validator;

pub use error::{CurationError, CurationResult};
pub use export::{
    resource_uri, select_relations, triples, verbalize, ConceptCatalog, ConceptEntry,
    DatasetStatistics, FrameTriples, RelationSelection, SeedObjects, Triple,
};
pub use filter::filter_instances;
pub use search::PrototypeSearch;
pub use validator::{
    build_validator, AcceptAll, CoreElementValidator, EmbeddingValidator, FrameValidator,
    SynsetValidator, ValidatorConfig, ValidatorKind,
};
