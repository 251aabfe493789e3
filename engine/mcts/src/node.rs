//! MCTS tree node representation.
//!
//! Each node represents a game state reached by taking an action from the
//! parent. Nodes store visit statistics used for UCT selection and the
//! final action choice.

use game_core::PlayerId;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
///
/// Generic over the game's state and action types; the search never looks
/// inside either, it only threads them through the `Board` collaborator.
#[derive(Debug, Clone)]
pub struct SearchNode<S, A> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action that led to this node from the parent (None for root)
    pub action: Option<A>,

    /// Game state at this node
    pub state: S,

    /// Player to move at this state, captured at creation.
    /// Selection compares this against the searching identity to decide
    /// whether a child's win rate must be inverted.
    pub to_move: PlayerId,

    /// Whether the game has ended at this state
    pub terminal: bool,

    /// Legal actions not yet expanded into children.
    /// Together with the children's actions this always equals the full
    /// legal-action set at creation time.
    pub untried_actions: Vec<A>,

    /// Children: Vec of (action, NodeId) pairs, at most one per action.
    pub children: Vec<(A, NodeId)>,

    /// Number of simulations whose backpropagation passed through this node
    pub visits: u32,

    /// Accumulated outcome score for the searching identity.
    /// Fractional because draws credit 0.5.
    pub wins: f64,
}

impl<S, A> SearchNode<S, A> {
    /// Create a new root node.
    pub fn new_root(state: S, to_move: PlayerId, untried_actions: Vec<A>) -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            state,
            to_move,
            terminal: false,
            untried_actions,
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
        }
    }

    /// Create a new child node.
    pub fn new_child(
        parent: NodeId,
        action: A,
        state: S,
        to_move: PlayerId,
        terminal: bool,
        untried_actions: Vec<A>,
    ) -> Self {
        Self {
            parent,
            action: Some(action),
            state,
            to_move,
            terminal,
            untried_actions,
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
        }
    }

    /// Mean outcome score, from the searching identity's perspective.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    /// Calculate the UCT score for child selection.
    /// UCT(c) = rate + C * sqrt(ln(N_parent) / N(c))
    ///
    /// Unvisited nodes score infinity, so every child is tried once before
    /// any is revisited. `invert` flips the win rate to `1 - rate` when the
    /// parent is an opponent decision point: wins are bookkept for the
    /// searching identity, and the opponent prefers moves that are bad
    /// for it.
    ///
    /// Note: takes pre-computed ln(parent_visits) to avoid redundant log
    /// calls when comparing multiple children.
    #[inline]
    pub fn uct_score(&self, parent_visits_ln: f64, exploration: f64, invert: bool) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }

        let mut rate = self.win_rate();
        if invert {
            rate = 1.0 - rate;
        }
        rate + exploration * (parent_visits_ln / self.visits as f64).sqrt()
    }

    /// Check if every legal action at this node has been expanded.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_actions.is_empty()
    }

    /// Check if this node is eligible for expansion.
    #[inline]
    pub fn is_expandable(&self) -> bool {
        !self.terminal && !self.untried_actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node: SearchNode<u8, u8> = SearchNode::new_root(7, PlayerId(1), vec![0, 1, 2]);

        assert!(node.parent.is_none());
        assert!(node.action.is_none());
        assert_eq!(node.visits, 0);
        assert!(node.wins.abs() < 1e-12);
        assert!(!node.terminal);
        assert!(node.children.is_empty());
        assert_eq!(node.untried_actions, vec![0, 1, 2]);
        assert!(node.is_expandable());
    }

    #[test]
    fn test_win_rate() {
        let mut node: SearchNode<u8, u8> = SearchNode::new_root(0, PlayerId(1), vec![]);

        // Unvisited
        assert!(node.win_rate().abs() < 1e-12);

        // After visits
        node.visits = 4;
        node.wins = 2.0;
        assert!((node.win_rate() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_uct_unvisited_is_infinite() {
        let node: SearchNode<u8, u8> = SearchNode::new_root(0, PlayerId(1), vec![]);
        assert_eq!(node.uct_score(100.0_f64.ln(), 1.4, false), f64::INFINITY);
        assert_eq!(node.uct_score(100.0_f64.ln(), 1.4, true), f64::INFINITY);
    }

    #[test]
    fn test_uct_score() {
        let mut node: SearchNode<u8, u8> = SearchNode::new_root(0, PlayerId(1), vec![]);
        node.visits = 10;
        node.wins = 7.0;

        let parent_visits_ln = 100.0_f64.ln();
        let exploration = std::f64::consts::SQRT_2;

        // UCT = 0.7 + sqrt(2) * sqrt(ln(100) / 10)
        let expected = 0.7 + exploration * (parent_visits_ln / 10.0).sqrt();
        let score = node.uct_score(parent_visits_ln, exploration, false);
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_uct_score_inverted_for_opponent() {
        let mut node: SearchNode<u8, u8> = SearchNode::new_root(0, PlayerId(1), vec![]);
        node.visits = 10;
        node.wins = 7.0;

        let parent_visits_ln = 100.0_f64.ln();
        let plain = node.uct_score(parent_visits_ln, 0.0, false);
        let inverted = node.uct_score(parent_visits_ln, 0.0, true);

        assert!((plain - 0.7).abs() < 1e-9);
        assert!((inverted - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_expandability() {
        let mut node: SearchNode<u8, u8> = SearchNode::new_root(0, PlayerId(1), vec![3]);
        assert!(node.is_expandable());
        assert!(!node.is_fully_expanded());

        node.untried_actions.clear();
        assert!(!node.is_expandable());
        assert!(node.is_fully_expanded());

        // Terminal nodes are never expandable
        let mut terminal: SearchNode<u8, u8> = SearchNode::new_root(0, PlayerId(1), vec![3]);
        terminal.terminal = true;
        assert!(!terminal.is_expandable());
    }
}
