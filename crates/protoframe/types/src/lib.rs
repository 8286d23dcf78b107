//! # protoframe-types
//!
//! Shared data model for prototype selection over annotated frame instances.
//!
//! A frame instance is one role-filler record extracted from text: a frame
//! type (e.g. `Commerce_buy`) plus an ordered list of frame elements, each
//! pairing a role (`Buyer`) with an opaque concept identifier
//! (`<http://babelnet.org/rdf/s00046516n>`).
//!
//! ## Key Types
//!
//! - [`FrameElement`] / [`FrameInstance`]: immutable input records
//! - [`FrameGroups`]: instances grouped by frame type, in a fixed order
//! - [`CanonicalSignature`]: order-independent structural identity
//! - [`PrototypeRecord`] / [`Prototypes`]: selected output, keyed by frame id

#![deny(unsafe_code)]

pub mod frame;
pub mod group;
pub mod prototype;
pub mod signature;

pub use frame::{concept_key, FrameElement, FrameInstance};
pub use group::FrameGroups;
pub use prototype::{PrototypeRecord, Prototypes};
pub use signature::CanonicalSignature;
