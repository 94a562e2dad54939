//! Search tree nodes and the arena that owns them.
//!
//! Nodes live in one `Vec` and point at each other by `NodeId`, so parent
//! links never form an ownership cycle. The arena is dropped at the end of
//! every search.

use azul_engine::{
    index_to_action, is_terminal, valid_action_mask, Action, ActionId, ActionMask, GameState,
    PlayerIdx,
};
use rand::Rng;

/// Index into the node arena.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The root is always the first node allocated.
    pub const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Node in the search tree.
#[derive(Clone, Debug)]
pub struct Node {
    pub state: GameState,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,

    pub visits: u32,
    /// Sum of rewards from the point of view of `player`
    pub reward: f64,

    /// Action that led here from the parent (None at the root)
    pub action: Option<Action>,
    /// Player who took `action` (None at the root)
    pub player: Option<PlayerIdx>,

    /// Legal actions not yet expanded into children
    untried: ActionMask,
    untried_count: usize,
}

impl Node {
    fn new(
        state: GameState,
        parent: Option<NodeId>,
        action: Option<Action>,
        player: Option<PlayerIdx>,
    ) -> Self {
        let untried = valid_action_mask(&state);
        let untried_count = untried.iter().filter(|&&b| b).count();
        Node {
            state,
            parent,
            children: Vec::new(),
            visits: 0,
            reward: 0.0,
            action,
            player,
            untried,
            untried_count,
        }
    }

    pub fn is_terminal(&self) -> bool {
        is_terminal(&self.state)
    }

    pub fn has_untried(&self) -> bool {
        self.untried_count > 0
    }

    pub fn untried_count(&self) -> usize {
        self.untried_count
    }

    /// Mean reward; 0 for an unvisited node.
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward / self.visits as f64
        }
    }

    /// UCB1 score seen from the parent: `w/n + c * sqrt(2 ln N / n)`.
    /// Unvisited nodes score infinity.
    pub fn ucb1(&self, parent_visits: u32, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let n = self.visits as f64;
        let ln_parent = (parent_visits.max(1) as f64).ln();
        self.win_rate() + exploration * (2.0 * ln_parent / n).sqrt()
    }

    /// Remove one untried action chosen uniformly at random.
    pub fn take_untried<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Action> {
        if self.untried_count == 0 {
            return None;
        }
        let pick = rng.random_range(0..self.untried_count);
        let id: ActionId = self
            .untried
            .iter()
            .enumerate()
            .filter(|(_, &open)| open)
            .map(|(id, _)| id)
            .nth(pick)?;
        self.untried[id] = false;
        self.untried_count -= 1;
        index_to_action(id)
    }
}

/// Arena-allocated search tree.
#[derive(Clone, Debug)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    /// Tree holding only a root for `state`.
    pub fn new(state: GameState) -> Self {
        SearchTree {
            nodes: vec![Node::new(state, None, None, None)],
        }
    }

    #[inline]
    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a child reached from `parent` by `action`, taken by `player`.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        action: Action,
        player: PlayerIdx,
        state: GameState,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes
            .push(Node::new(state, Some(parent), Some(action), Some(player)));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Child of `id` with the highest UCB1 score; the first maximum wins.
    pub fn select_child(&self, id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.get(id);
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &node.children {
            let score = self.get(child).ucb1(node.visits, exploration);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((child, score));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Add one visit and the per-player reward to every node from `leaf` up
    /// to the root.
    pub fn backpropagate(&mut self, leaf: NodeId, reward_for: impl Fn(PlayerIdx) -> f64) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            if let Some(player) = node.player {
                node.reward += reward_for(player);
            }
            current = node.parent;
        }
    }

    /// Root children in expansion order.
    pub fn root_children(&self) -> impl Iterator<Item = &Node> + '_ {
        self.root().children.iter().map(move |&id| self.get(id))
    }
}
