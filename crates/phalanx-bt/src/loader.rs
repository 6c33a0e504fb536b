//! Tree definitions.
//!
//! A definition is nested JSON:
//! - a list is a composite: `["Selector", child, child, ...]`
//! - a string is a leaf (`"Attack"`), a childless composite, or the name of another definition
//!   that gets spliced in as a subtree
//!
//! ```json
//! ["Selector",
//!     ["Sequence", "TargetEnemy", "engage"],
//!     ["Sequence", "TakeFormationWaypoint", "ArriveWaypoint"]]
//! ```
//!
//! Node type names win over definition names. Every structural problem is reported at load time;
//! a loaded tree never fails for structural reasons while running.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::error::TreeLoadError;
use crate::leaf::Leaf;
use crate::node::{Composite, Node};
use crate::tree::BehaviorTree;

/// Where named definitions come from.
#[derive(Debug, Clone)]
pub enum TreeSource {
    /// `<dir>/<name>.json`
    Dir(PathBuf),
    /// In-memory definitions keyed by name.
    Memory(BTreeMap<String, String>),
}

impl TreeSource {
    pub fn dir(path: impl Into<PathBuf>) -> Self {
        TreeSource::Dir(path.into())
    }

    pub fn memory<I, N, D>(definitions: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<String>,
    {
        TreeSource::Memory(
            definitions
                .into_iter()
                .map(|(n, d)| (n.into(), d.into()))
                .collect(),
        )
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        match self {
            TreeSource::Dir(dir) => dir.join(format!("{name}.json")),
            TreeSource::Memory(_) => PathBuf::from(format!("<memory>/{name}")),
        }
    }

    fn read(&self, name: &str) -> Result<String, TreeLoadError> {
        match self {
            TreeSource::Dir(_) => {
                let path = self.path_for(name);
                read_file(name, &path)
            }
            TreeSource::Memory(definitions) => {
                definitions
                    .get(name)
                    .cloned()
                    .ok_or_else(|| TreeLoadError::NotFound {
                        name: name.to_string(),
                        path: self.path_for(name),
                    })
            }
        }
    }
}

fn read_file(name: &str, path: &Path) -> Result<String, TreeLoadError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(TreeLoadError::NotFound {
            name: name.to_string(),
            path: path.to_path_buf(),
        }),
        Err(source) => Err(TreeLoadError::Io {
            name: name.to_string(),
            source,
        }),
    }
}

/// Loads and caches trees by name.
///
/// Compiled definitions are cached, so a subtree referenced from several trees is parsed once and
/// a tree requested twice is the same `Arc`.
#[derive(Debug)]
pub struct TreeLoader {
    source: TreeSource,
    compiled: BTreeMap<String, Node>,
    trees: BTreeMap<String, Arc<BehaviorTree>>,
}

impl TreeLoader {
    pub fn new(source: TreeSource) -> Self {
        Self {
            source,
            compiled: BTreeMap::new(),
            trees: BTreeMap::new(),
        }
    }

    pub fn source(&self) -> &TreeSource {
        &self.source
    }

    pub fn load(&mut self, name: &str) -> Result<Arc<BehaviorTree>, TreeLoadError> {
        if let Some(tree) = self.trees.get(name) {
            return Ok(Arc::clone(tree));
        }
        let mut stack = Vec::new();
        let root = self.load_definition(name, &mut stack)?;
        let tree = Arc::new(BehaviorTree::new(name, root));
        tracing::debug!(
            tree = name,
            nodes = tree.node_count(),
            depth = tree.depth(),
            "loaded behavior tree"
        );
        self.trees.insert(name.to_string(), Arc::clone(&tree));
        Ok(tree)
    }

    /// Compile an inline definition without registering it under a name.
    pub fn compile(&mut self, name: &str, definition: &Value) -> Result<Node, TreeLoadError> {
        let mut stack = vec![name.to_string()];
        self.build(name, definition, &mut stack)
    }

    fn load_definition(
        &mut self,
        name: &str,
        stack: &mut Vec<String>,
    ) -> Result<Node, TreeLoadError> {
        if let Some(node) = self.compiled.get(name) {
            return Ok(node.clone());
        }
        if stack.iter().any(|n| n == name) {
            let mut chain = stack.clone();
            chain.push(name.to_string());
            return Err(TreeLoadError::Cycle {
                chain: chain.join(" -> "),
            });
        }

        let text = self.source.read(name)?;
        let value: Value = serde_json::from_str(&text).map_err(|source| TreeLoadError::Parse {
            name: name.to_string(),
            source,
        })?;

        stack.push(name.to_string());
        let built = self.build(name, &value, stack);
        stack.pop();
        let node = built?;

        self.compiled.insert(name.to_string(), node.clone());
        Ok(node)
    }

    fn build(
        &mut self,
        name: &str,
        value: &Value,
        stack: &mut Vec<String>,
    ) -> Result<Node, TreeLoadError> {
        match value {
            Value::String(token) => self.resolve_token(name, token, stack),
            Value::Array(items) => {
                let Some((head, rest)) = items.split_first() else {
                    return Err(malformed(name, "empty list"));
                };
                let Value::String(kind) = head else {
                    return Err(malformed(
                        name,
                        format!("a list must start with a composite name, found {}", describe(head)),
                    ));
                };
                let Some(composite) = Composite::from_name(kind) else {
                    return Err(TreeLoadError::UnknownComposite {
                        name: name.to_string(),
                        composite: kind.clone(),
                    });
                };
                let children = rest
                    .iter()
                    .map(|child| self.build(name, child, stack))
                    .collect::<Result<Vec<_>, _>>()?;
                composite
                    .build(children)
                    .map_err(|source| TreeLoadError::Structure {
                        name: name.to_string(),
                        source,
                    })
            }
            other => Err(malformed(
                name,
                format!("expected a node name or a list, found {}", describe(other)),
            )),
        }
    }

    fn resolve_token(
        &mut self,
        name: &str,
        token: &str,
        stack: &mut Vec<String>,
    ) -> Result<Node, TreeLoadError> {
        if let Some(leaf) = Leaf::from_name(token) {
            return Ok(Node::Leaf(leaf));
        }
        if let Some(composite) = Composite::from_name(token) {
            return composite
                .build(Vec::new())
                .map_err(|source| TreeLoadError::Structure {
                    name: name.to_string(),
                    source,
                });
        }

        match self.load_definition(token, stack) {
            Ok(node) => {
                tracing::debug!(tree = name, subtree = token, "spliced subtree");
                Ok(node)
            }
            Err(TreeLoadError::NotFound { .. }) => Err(TreeLoadError::Unresolved {
                name: name.to_string(),
                token: token.to_string(),
            }),
            Err(err) => Err(err),
        }
    }
}

fn malformed(name: &str, reason: impl Into<String>) -> TreeLoadError {
    TreeLoadError::Malformed {
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
