//! # protoframe-lexicon
//!
//! The lexical statistics provider: every static lookup table the
//! similarity engine reads, loaded once and immutable afterwards.
//!
//! | Table                | Line format                         |
//! |----------------------|-------------------------------------|
//! | frame lexical units  | `frame<TAB>lexical_unit`            |
//! | corpus lemmas        | `sentence_id<TAB>lemma<TAB>sense`   |
//! | sense versions       | `old_id<SPACE>new_id`               |
//! | sense names          | `offset<TAB>name`                   |
//! | sense hypernyms      | `name<TAB>hypernym_name`            |
//! | frame vectors        | `frame v1 v2 ... vn`                |
//!
//! Malformed input is fatal: [`Lexicon::load`] returns a [`LexiconError`]
//! naming the file and line, and no partially loaded lexicon escapes.

#![deny(unsafe_code)]

pub mod error;
pub mod lexicon;
pub mod paths;
pub mod reader;
pub mod taxonomy;
pub mod vectors;

pub use error::{LexiconError, LexiconResult};
pub use lexicon::{Lexicon, LexiconBuilder};
pub use paths::LexiconPaths;
pub use reader::{for_each_line, split_fields, Separator};
pub use taxonomy::Taxonomy;
pub use vectors::{cosine_similarity, VectorTable};
