//! Search nodes and the arena that owns them.
//!
//! Nodes form a tree: each child records the [`NodeId`] of its parent, which
//! is only followed when a solution path is rebuilt. The [`SearchTree`] owns
//! every node, so no reference counting is needed.

use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::ptr;

use crate::error::SearchError;
use crate::puzzle::{Direction, DirectionSet};
use crate::state::PuzzleState;

/// Index of a node inside its [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A state plus the bookkeeping needed to expand it and trace it back
#[derive(Debug, Clone)]
pub struct SearchNode {
    state: PuzzleState,
    parent: Option<NodeId>,
    /// Move that led here from the parent
    direction: Option<Direction>,
    /// Directions not yet turned into children
    unexplored: DirectionSet,
    depth: usize,
}

impl SearchNode {
    /// A root node, with no parent.
    pub fn root(state: PuzzleState) -> Self {
        Self {
            unexplored: state.legal_moves(),
            state,
            parent: None,
            direction: None,
            depth: 0,
        }
    }

    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Number of moves from the root
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn unexplored(&self) -> DirectionSet {
        self.unexplored
    }

    pub fn has_next_child(&self) -> bool {
        !self.unexplored.is_empty()
    }

    /// Consume one unexplored direction and build the child it leads to.
    ///
    /// `id` must be this node's own id in the tree; it becomes the child's parent.
    pub fn next_child(&mut self, id: NodeId) -> Result<SearchNode, SearchError> {
        let direction = self.unexplored.pop_first().ok_or(SearchError::NoNextChild)?;
        let mut state = self.state;
        state.apply_move(direction);
        Ok(SearchNode {
            unexplored: state.legal_moves(),
            state,
            parent: Some(id),
            direction: Some(direction),
            depth: self.depth + 1,
        })
    }
}

/// Nodes compare by state alone, so two paths reaching the same
/// configuration are the same node. Comparing a node with itself is `false`.
impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        !ptr::eq(self, other) && self.state == other.state
    }
}

impl Hash for SearchNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.state.hash(state);
    }
}

impl Display for SearchNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.direction {
            Some(direction) if self.parent.is_some() => write!(f, "{direction} {}", self.state),
            _ => write!(f, "{}", self.state),
        }
    }
}

/// Owner of every node created during a search
#[derive(Debug, Clone, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Draw the next child of the node at `id`.
    pub fn next_child(&mut self, id: NodeId) -> Result<SearchNode, SearchError> {
        self.nodes[id.0].next_child(id)
    }

    /// The nodes from the root down to `id`, root first.
    pub fn lineage(&self, id: NodeId) -> Vec<&SearchNode> {
        let mut nodes = Vec::with_capacity(self[id].depth() + 1);
        let mut current = Some(id);
        while let Some(id) = current {
            let node = &self[id];
            nodes.push(node);
            current = node.parent();
        }
        nodes.reverse();
        nodes
    }
}

impl Index<NodeId> for SearchTree {
    type Output = SearchNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}
