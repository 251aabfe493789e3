//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec and
//! referenced by NodeId indices, so parent links are plain indices and
//! never participate in ownership.

use game_core::PlayerId;

use crate::config::ActionPolicy;
use crate::node::{NodeId, SearchNode};

/// MCTS tree with arena-based node storage.
///
/// The whole tree is built fresh for one decision and dropped afterwards;
/// nothing survives across searches.
#[derive(Debug)]
pub struct SearchTree<S, A> {
    /// Arena storing all nodes
    nodes: Vec<SearchNode<S, A>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S, A: Clone + PartialEq> SearchTree<S, A> {
    /// Create a new tree holding only the given root node.
    pub fn new(root_node: SearchNode<S, A>) -> Self {
        Self {
            nodes: vec![root_node],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<S, A> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<S, A> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: SearchNode<S, A>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Select the best child of a node using UCT.
    ///
    /// `identity` is the player the search optimizes for; when the node is a
    /// decision point for any other player, children are scored on inverted
    /// win rates. Returns None if the node has no children.
    pub fn select_child(
        &self,
        node_id: NodeId,
        exploration: f64,
        identity: PlayerId,
    ) -> Option<NodeId> {
        let node = self.get(node_id);
        let invert = node.to_move != identity;
        // Pre-compute the log once instead of per-child comparison
        let parent_visits_ln = (node.visits.max(1) as f64).ln();

        node.children
            .iter()
            .max_by(|(_, id_a), (_, id_b)| {
                let score_a = self.get(*id_a).uct_score(parent_visits_ln, exploration, invert);
                let score_b = self.get(*id_b).uct_score(parent_visits_ln, exploration, invert);
                score_a
                    .partial_cmp(&score_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(_, id)| *id)
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(
        &mut self,
        parent_id: NodeId,
        action: A,
        state: S,
        to_move: PlayerId,
        terminal: bool,
        untried_actions: Vec<A>,
    ) -> NodeId {
        let child = SearchNode::new_child(
            parent_id,
            action.clone(),
            state,
            to_move,
            terminal,
            untried_actions,
        );
        let child_id = self.allocate(child);

        // Add to parent's children
        self.get_mut(parent_id).children.push((action, child_id));

        child_id
    }

    /// Backpropagate an outcome score from a leaf to the root.
    ///
    /// Every node on the path gets one more visit and the same score; the
    /// score is always from the searching identity's perspective, and
    /// opponent turns are handled at selection time instead of by per-ply
    /// negation.
    pub fn backpropagate(&mut self, leaf_id: NodeId, score: f64) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visits += 1;
            node.wins += score;
            current_id = node.parent;
        }
    }

    /// Pick the final action from the root according to the given policy.
    ///
    /// Returns None only when the root has no children, which cannot happen
    /// after at least one simulation on a non-terminal root.
    pub fn best_action(&self, policy: ActionPolicy) -> Option<A> {
        match policy {
            ActionPolicy::MaxVisits => self.most_visited_action().map(|(action, _)| action),
            ActionPolicy::Blended { k } => self
                .blended_action(k)
                .or_else(|| self.most_visited_action().map(|(action, _)| action)),
        }
    }

    /// The root action with the highest visit count, with its count.
    fn most_visited_action(&self) -> Option<(A, u32)> {
        let root = self.get(self.root);
        root.children
            .iter()
            .map(|(action, id)| (action.clone(), self.get(*id).visits))
            .max_by_key(|(_, visits)| *visits)
    }

    /// The root action maximizing `win_rate + k * sqrt(visits)` among
    /// visited children; None when no child has been visited.
    fn blended_action(&self, k: f64) -> Option<A> {
        let root = self.get(self.root);
        root.children
            .iter()
            .filter(|(_, id)| self.get(*id).visits > 0)
            .max_by(|(_, id_a), (_, id_b)| {
                let a = self.get(*id_a);
                let b = self.get(*id_b);
                let score_a = a.win_rate() + k * (a.visits as f64).sqrt();
                let score_b = b.win_rate() + k * (b.visits as f64).sqrt();
                score_a
                    .partial_cmp(&score_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(action, _)| action.clone())
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_value: root.win_rate(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|(_, id)| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub max_depth: u32,
}
