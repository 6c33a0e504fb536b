use phalanx_core::{Blackboard, SoldierId, TickContext};

use crate::node::Node;
use crate::world::TacticalWorld;

/// A named, compiled tree. Share it between soldiers with `Arc<BehaviorTree>`.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorTree {
    name: String,
    root: Node,
}

impl BehaviorTree {
    pub fn new(name: impl Into<String>, root: Node) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn run<W>(
        &self,
        ctx: &TickContext,
        agent: SoldierId,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> bool
    where
        W: TacticalWorld + ?Sized,
    {
        self.root.run(ctx, agent, world, blackboard)
    }
}
