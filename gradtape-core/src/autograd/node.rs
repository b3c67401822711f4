use crate::error::GradTapeError;
use crate::value::Value;

/// The inputs or outputs of one recorded operation.
///
/// Multi-input and multi-output primitives use `Composite`, which may nest.
/// `Skip` marks a position that needs no gradient (a non-differentiable
/// argument); every traversal steps over it silently.
#[derive(Debug, Clone)]
pub enum Node {
    Leaf(Value),
    Composite(Vec<Node>),
    Skip,
}

impl Node {
    /// Calls `f` on every value in the structure, depth-first, left to right.
    pub fn for_each_leaf<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a Value),
    {
        match self {
            Node::Leaf(v) => f(v),
            Node::Composite(children) => {
                for child in children {
                    child.for_each_leaf(f);
                }
            }
            Node::Skip => {}
        }
    }

    /// Returns true if `f` holds for every value in the structure.
    pub fn all_leaves<F>(&self, f: &mut F) -> bool
    where
        F: FnMut(&Value) -> bool,
    {
        match self {
            Node::Leaf(v) => f(v),
            Node::Composite(children) => children.iter().all(|child| child.all_leaves(f)),
            Node::Skip => true,
        }
    }

    /// Collects the values in the structure, in order, duplicates included.
    pub fn leaves(&self) -> Vec<&Value> {
        let mut out = Vec::new();
        self.for_each_leaf(&mut |v| out.push(v));
        out
    }

    /// Returns the single value of a leaf.
    ///
    /// # Errors
    /// `NotAValue` for composites and skipped positions.
    pub fn as_value(&self) -> Result<&Value, GradTapeError> {
        match self {
            Node::Leaf(v) => Ok(v),
            Node::Composite(children) => Err(GradTapeError::NotAValue(format!(
                "a composite of {} entries",
                children.len()
            ))),
            Node::Skip => Err(GradTapeError::NotAValue("a skipped position".to_string())),
        }
    }

    /// Returns the children of a composite.
    pub fn as_composite(&self) -> Option<&[Node]> {
        match self {
            Node::Composite(children) => Some(children),
            _ => None,
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::Leaf(value)
    }
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        Node::Leaf(value.clone())
    }
}

impl From<Option<Value>> for Node {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Node::Skip, Node::Leaf)
    }
}

impl From<Vec<Node>> for Node {
    fn from(children: Vec<Node>) -> Self {
        Node::Composite(children)
    }
}

impl From<Vec<Value>> for Node {
    fn from(values: Vec<Value>) -> Self {
        Node::Composite(values.into_iter().map(Node::Leaf).collect())
    }
}
