use phalanx_core::{Blackboard, SoldierId, TickContext};
use serde_json::Value;

use crate::error::NodeError;
use crate::leaf::Leaf;
use crate::trace::{emit as trace_emit, TraceEvent};
use crate::world::TacticalWorld;

/// Control-flow node types a definition may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Composite {
    /// First child that succeeds wins.
    Selector,
    /// Every child must succeed, in order.
    Sequence,
    /// Negates its single child.
    Invert,
    /// Runs its single child for its side effects and succeeds regardless.
    AlwaysTrue,
}

impl Composite {
    pub const ALL: [Composite; 4] = [
        Composite::Selector,
        Composite::Sequence,
        Composite::Invert,
        Composite::AlwaysTrue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Composite::Selector => "Selector",
            Composite::Sequence => "Sequence",
            Composite::Invert => "Invert",
            Composite::AlwaysTrue => "AlwaysTrue",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn build(self, children: Vec<Node>) -> Result<Node, NodeError> {
        match self {
            Composite::Selector => Ok(Node::Selector(children)),
            Composite::Sequence => Ok(Node::Sequence(children)),
            Composite::Invert => Node::invert(children),
            Composite::AlwaysTrue => Node::always_true(children),
        }
    }
}

/// A compiled behavior-tree node.
///
/// Nodes hold no per-soldier state: the acting soldier is passed to every [`run`](Node::run), so a
/// single tree can drive any number of soldiers.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Selector(Vec<Node>),
    Sequence(Vec<Node>),
    Invert(Box<Node>),
    AlwaysTrue(Box<Node>),
    Leaf(Leaf),
}

impl Node {
    pub fn invert(children: Vec<Node>) -> Result<Self, NodeError> {
        single_child(Composite::Invert, children).map(|c| Node::Invert(Box::new(c)))
    }

    pub fn always_true(children: Vec<Node>) -> Result<Self, NodeError> {
        single_child(Composite::AlwaysTrue, children).map(|c| Node::AlwaysTrue(Box::new(c)))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Node::Selector(_) => Composite::Selector.name(),
            Node::Sequence(_) => Composite::Sequence.name(),
            Node::Invert(_) => Composite::Invert.name(),
            Node::AlwaysTrue(_) => Composite::AlwaysTrue.name(),
            Node::Leaf(leaf) => leaf.name(),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Selector(children) | Node::Sequence(children) => children,
            Node::Invert(child) | Node::AlwaysTrue(child) => core::slice::from_ref(&**child),
            Node::Leaf(_) => &[],
        }
    }

    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Node::depth).max().unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Node::node_count).sum::<usize>()
    }

    /// Evaluate this node for `agent`. `false` is ordinary control flow, never a fault.
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
        let success = match self {
            Node::Selector(children) => children
                .iter()
                .any(|child| child.run(ctx, agent, world, blackboard)),
            Node::Sequence(children) => children
                .iter()
                .all(|child| child.run(ctx, agent, world, blackboard)),
            Node::Invert(child) => !child.run(ctx, agent, world, blackboard),
            Node::AlwaysTrue(child) => {
                let _ = child.run(ctx, agent, world, blackboard);
                true
            }
            Node::Leaf(leaf) => leaf.run(ctx, agent, world, blackboard),
        };

        trace_emit(
            blackboard,
            TraceEvent {
                tick: ctx.tick,
                agent,
                node: self.name(),
                success,
            },
        );
        success
    }

    /// The nested definition this node would be loaded from.
    pub fn to_definition(&self) -> Value {
        match self {
            Node::Leaf(leaf) => Value::String(leaf.name().to_string()),
            other => {
                let mut items = vec![Value::String(other.name().to_string())];
                items.extend(other.children().iter().map(Node::to_definition));
                Value::Array(items)
            }
        }
    }
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Node::Leaf(leaf)
    }
}

fn single_child(composite: Composite, mut children: Vec<Node>) -> Result<Node, NodeError> {
    if children.len() != 1 {
        return Err(NodeError::ChildCount {
            composite: composite.name(),
            found: children.len(),
        });
    }
    Ok(children.remove(0))
}
