//! Artifact dependency graph built from cargo_metadata resolve data + petgraph
//!
//! ## Graph Structure
//!
//! - **Directed Graph**: `A → B` means "A depends on B"
//! - **Root**: the package being released
//! - **Nodes**: resolved packages reachable from the root (one per package id)
//! - **Edges**: normal dependencies, plus build dependencies of non-root
//!   packages. The root's own build dependencies are plugins and live outside
//!   the graph; dev-dependencies never ship and are skipped.
//!
//! Cargo's resolver never produces cycles among normal dependencies, but the
//! traversal does not rely on that: it keeps a visited set and visits each
//! node's out-edges exactly once.

use crate::release::version::ReleaseVersion;
use cargo_metadata::{DependencyKind, Metadata, Package, PackageId};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

/// A resolved package in the graph
#[derive(Debug, Clone)]
pub struct ArtifactNode {
  /// Stable identity (cargo package id)
  pub id: String,
  pub name: String,
  pub version: ReleaseVersion,
}

impl ArtifactNode {
  pub fn new(id: impl Into<String>, name: impl Into<String>, version: ReleaseVersion) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      version,
    }
  }

  /// `name@version`
  pub fn coordinate(&self) -> String {
    format!("{}@{}", self.name, self.version)
  }
}

/// Dependency edge kinds kept in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
  Normal,
  Build,
}

/// "depends on" edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyEdge {
  pub kind: EdgeKind,
  /// Declared `optional = true` by the origin package
  pub optional: bool,
}

#[cfg(test)]
impl DependencyEdge {
  pub fn normal() -> Self {
    Self {
      kind: EdgeKind::Normal,
      optional: false,
    }
  }
}

/// Visitor verdict after seeing an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
  Continue,
  Stop,
}

/// How a traversal ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
  /// Every reachable edge was visited
  Completed,
  /// The visitor returned [`Visit::Stop`]
  Stopped,
}

/// Rooted artifact dependency graph
#[derive(Debug, Clone)]
pub struct ArtifactGraph {
  graph: DiGraph<ArtifactNode, DependencyEdge>,
  root: NodeIndex,
  /// Index: package id → node index
  id_to_node: HashMap<String, NodeIndex>,
}

impl ArtifactGraph {
  /// Create a graph holding only its root
  pub fn new(root: ArtifactNode) -> Self {
    let mut graph = DiGraph::new();
    let mut id_to_node = HashMap::new();
    let id = root.id.clone();
    let root = graph.add_node(root);
    id_to_node.insert(id, root);
    Self {
      graph,
      root,
      id_to_node,
    }
  }

  /// Add a node, returning the existing index if the id is already present
  pub fn add_node(&mut self, node: ArtifactNode) -> NodeIndex {
    if let Some(idx) = self.id_to_node.get(&node.id) {
      return *idx;
    }
    let id = node.id.clone();
    let idx = self.graph.add_node(node);
    self.id_to_node.insert(id, idx);
    idx
  }

  pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: DependencyEdge) {
    self.graph.add_edge(from, to, edge);
  }

  pub fn root(&self) -> NodeIndex {
    self.root
  }

  pub fn find(&self, id: &str) -> Option<NodeIndex> {
    self.id_to_node.get(id).copied()
  }

  /// Number of dependencies (nodes other than the root)
  pub fn dependency_count(&self) -> usize {
    self.graph.node_count().saturating_sub(1)
  }

  pub fn edge_count(&self) -> usize {
    self.graph.edge_count()
  }

  /// Walk every edge reachable from `from`.
  ///
  /// The visitor receives `(origin, destination, edge, depth)` where `depth` is
  /// the destination's distance from `from` along the walk (1 for direct
  /// dependencies). Each node's out-edges are expanded once, so cyclic graphs
  /// terminate. Optional edges are skipped, and not followed, unless
  /// `include_optional` is set. Returning [`Visit::Stop`] ends the walk
  /// immediately.
  pub fn traverse<F>(&self, from: NodeIndex, include_optional: bool, mut visitor: F) -> Traversal
  where
    F: FnMut(&ArtifactNode, &ArtifactNode, &DependencyEdge, usize) -> Visit,
  {
    let mut visited = HashSet::new();
    let mut stack = vec![(from, 0usize)];
    visited.insert(from);

    while let Some((node_idx, depth)) = stack.pop() {
      let origin = &self.graph[node_idx];

      for edge in self.graph.edges_directed(node_idx, Direction::Outgoing) {
        let weight = edge.weight();
        if weight.optional && !include_optional {
          continue;
        }

        let target = edge.target();
        if visitor(origin, &self.graph[target], weight, depth + 1) == Visit::Stop {
          return Traversal::Stopped;
        }

        if visited.insert(target) {
          stack.push((target, depth + 1));
        }
      }
    }

    Traversal::Completed
  }

  /// Build the graph for `root_id` from cargo metadata.
  ///
  /// Returns `None` when the metadata has no resolve data or the root has no
  /// artifact dependencies at all.
  pub fn from_metadata(metadata: &Metadata, root_id: &PackageId) -> Option<Self> {
    let resolve = metadata.resolve.as_ref()?;

    let packages: HashMap<&PackageId, &Package> = metadata.packages.iter().map(|p| (&p.id, p)).collect();
    let nodes: HashMap<&PackageId, &cargo_metadata::Node> = resolve.nodes.iter().map(|n| (&n.id, n)).collect();

    let root_pkg = packages.get(root_id)?;
    let mut graph = Self::new(artifact_node(root_pkg));

    let mut queue = vec![root_id];
    let mut expanded = HashSet::new();

    while let Some(pkg_id) = queue.pop() {
      if !expanded.insert(pkg_id) {
        continue;
      }
      let (Some(pkg), Some(resolved)) = (packages.get(pkg_id), nodes.get(pkg_id)) else {
        continue;
      };
      let is_root = pkg_id == root_id;
      let Some(from_idx) = graph.find(&pkg_id.repr) else {
        continue;
      };

      for dep in &resolved.deps {
        let Some(dep_pkg) = packages.get(&dep.pkg) else {
          continue;
        };

        let Some(kind) = edge_kind(&dep.dep_kinds, is_root) else {
          continue;
        };

        let dep_name = dep_pkg.name.to_string();
        let declared: Vec<_> = pkg.dependencies.iter().filter(|d| d.name == dep_name).collect();
        let optional = !declared.is_empty() && declared.iter().all(|d| d.optional);

        let to_idx = graph.add_node(artifact_node(dep_pkg));
        graph.add_edge(from_idx, to_idx, DependencyEdge { kind, optional });
        queue.push(&dep.pkg);
      }
    }

    if graph.edge_count() == 0 { None } else { Some(graph) }
  }
}

fn artifact_node(pkg: &Package) -> ArtifactNode {
  ArtifactNode::new(
    pkg.id.repr.clone(),
    pkg.name.to_string(),
    ReleaseVersion::new(pkg.version.clone()),
  )
}

/// Pick the graph edge kind for a resolved dependency, or None to skip it
fn edge_kind(kinds: &[cargo_metadata::DepKindInfo], is_root: bool) -> Option<EdgeKind> {
  // Older cargo versions omit dep_kinds; treat as a normal dependency
  if kinds.is_empty() {
    return Some(EdgeKind::Normal);
  }
  if kinds.iter().any(|k| k.kind == DependencyKind::Normal) {
    return Some(EdgeKind::Normal);
  }
  if !is_root && kinds.iter().any(|k| k.kind == DependencyKind::Build) {
    return Some(EdgeKind::Build);
  }
  None
}
