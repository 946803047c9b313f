//! Breadth-first search over the implicit graph of puzzle states.
//!
//! The frontier is a FIFO queue and every state is marked visited when it is
//! enqueued, so each state is discovered once, at its minimum depth. The
//! first goal to reach the head of the queue is therefore a shortest solution.

use std::collections::{HashSet, VecDeque};
use std::fmt::{self, Display, Formatter};

use log::{debug, trace};
use serde::Serialize;
use smallvec::SmallVec;

use crate::node::{NodeId, SearchNode, SearchTree};
use crate::puzzle::Direction;
use crate::state::PuzzleState;

/// One move of a solution and the state it produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub direction: Direction,
    pub state: PuzzleState,
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.direction, self.state)
    }
}

/// Steps of a solution, start to goal
pub type Path = SmallVec<[Step; 32]>;

/// A path from a start state to a goal state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    start: PuzzleState,
    steps: Path,
}

impl Solution {
    /// Walk parent links from `goal` back to the root of `tree`.
    pub fn from_node(tree: &SearchTree, goal: NodeId) -> Self {
        let mut steps = Path::new();
        let mut current = &tree[goal];
        while let (Some(parent), Some(direction)) = (current.parent(), current.direction()) {
            steps.push(Step {
                direction,
                state: *current.state(),
            });
            current = &tree[parent];
        }
        steps.reverse();
        Self {
            start: *current.state(),
            steps,
        }
    }

    pub fn start(&self) -> &PuzzleState {
        &self.start
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The final state of the path.
    pub fn goal(&self) -> &PuzzleState {
        self.steps.last().map_or(&self.start, |step| &step.state)
    }

    /// Number of moves
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when the start state is already a goal.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.steps.iter().map(|step| step.direction)
    }
}

/// One line per state: the start, then `<DIRECTION> <state>` for each move.
impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)?;
        for step in &self.steps {
            write!(f, "\n{step}")?;
        }
        Ok(())
    }
}

/// Counters collected during a search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes removed from the frontier and expanded
    pub nodes_expanded: usize,
    /// Distinct states ever enqueued, the start included
    pub states_visited: usize,
}

/// Result of a search: the explored tree and, if one was found, the goal node
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    tree: SearchTree,
    goal: Option<NodeId>,
    stats: SearchStats,
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        self.goal.is_some()
    }

    /// The goal node, or `None` when no goal is reachable.
    pub fn goal(&self) -> Option<&SearchNode> {
        self.goal.map(|id| &self.tree[id])
    }

    pub fn goal_id(&self) -> Option<NodeId> {
        self.goal
    }

    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The nodes from the start down to the goal.
    pub fn path_nodes(&self) -> Option<Vec<&SearchNode>> {
        self.goal.map(|id| self.tree.lineage(id))
    }

    pub fn solution(&self) -> Option<Solution> {
        self.goal.map(|id| Solution::from_node(&self.tree, id))
    }
}

/// Find a shortest sequence of moves from `start` to any goal state.
///
/// Exhausting the reachable states without meeting a goal is a normal
/// outcome, reported as an unsolved [`SearchOutcome`].
pub fn breadth_first_search(start: PuzzleState) -> SearchOutcome {
    debug!("starting breadth-first search from {start}");

    let mut tree = SearchTree::new();
    let root = tree.insert(SearchNode::root(start));
    let mut frontier = VecDeque::from([root]);
    let mut visited = HashSet::from([start]);
    let mut stats = SearchStats::default();

    while let Some(&selected) = frontier.front() {
        // Goal test happens at the head of the queue, before removal.
        if tree[selected].state().is_goal() {
            stats.states_visited = visited.len();
            debug!(
                "goal {} found at depth {} ({} expanded, {} visited)",
                tree[selected].state(),
                tree[selected].depth(),
                stats.nodes_expanded,
                stats.states_visited
            );
            return SearchOutcome {
                tree,
                goal: Some(selected),
                stats,
            };
        }

        frontier.pop_front();
        stats.nodes_expanded += 1;
        trace!("expanding {}", tree[selected]);

        while let Ok(child) = tree.next_child(selected) {
            if visited.insert(*child.state()) {
                frontier.push_back(tree.insert(child));
            }
        }
    }

    stats.states_visited = visited.len();
    debug!(
        "search exhausted without reaching a goal ({} expanded, {} visited)",
        stats.nodes_expanded, stats.states_visited
    );
    SearchOutcome {
        tree,
        goal: None,
        stats,
    }
}
