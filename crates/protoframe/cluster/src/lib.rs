//! # protoframe-cluster
//!
//! Reduces a group of frame instances of one frame type to a handful of
//! representative prototypes.
//!
//! ## Strategies
//!
//! | Strategy       | Needs matrix | Prototypes                                   |
//! |----------------|--------------|----------------------------------------------|
//! | `frequency`    | no           | first member of each top-K signature group   |
//! | `hierarchical` | yes          | medoid of each flat cluster above a min size |
//! | `partitional`  | yes          | k-medoids output medoids                     |
//!
//! `frequency` is the default binding. All three implement
//! [`PrototypeSelector`] and produce the same [`Prototypes`] shape.
//!
//! [`Prototypes`]: protoframe_types::Prototypes

#![deny(unsafe_code)]

pub mod cluster;
pub mod config;
pub mod error;
pub mod kmedoids;
pub mod linkage;
pub mod medoid;
pub mod strategy;

pub use cluster::Cluster;
pub use config::{SelectionConfig, StrategyKind};
pub use error::{ClusterError, ClusterResult};
pub use kmedoids::{k_medoids, KMedoids};
pub use linkage::{average_linkage, Dendrogram, Merge};
pub use medoid::find_medoid;
pub use strategy::{
    build_selector, cluster_count, FrequencySelector, HierarchicalSelector, PartitionalSelector,
    PrototypeSelector,
};
