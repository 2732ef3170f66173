//! Artifact dependency graph
//!
//! Built on cargo_metadata + petgraph. The release engine only needs the
//! root node and a stoppable reachability walk.

pub mod artifact_graph;

pub use artifact_graph::{ArtifactGraph, Traversal, Visit};
