use crate::autograd::backward_op::BackwardOp;
use crate::autograd::node::Node;
use crate::error::GradTapeError;
use crate::value::Value;
use std::collections::HashMap;
use std::rc::Rc;

/// One recorded obligation: `owner` contributed to `result`, and applying
/// `grad_func` to the gradient of `result` yields a contribution to the
/// gradient of `owner`.
#[derive(Debug)]
pub struct GradRecord {
    grad_func: Rc<dyn BackwardOp>,
    result: Node,
    owner: Node,
}

impl GradRecord {
    pub fn result(&self) -> &Node {
        &self.result
    }

    pub fn owner(&self) -> &Node {
        &self.owner
    }
}

/// Records derivative functions during a forward pass and replays them in
/// reverse to compute gradients.
///
/// A tape serves one forward/backward cycle. After a traversal fails the tape
/// is partially consumed and must be discarded.
#[derive(Debug, Default)]
pub struct Tape {
    /// Accumulated gradient per value. Absent means not computed yet.
    grads: HashMap<Value, Value>,
    /// Records whose owner contains the key and that are not consumed yet.
    grad_records: HashMap<Value, Vec<Rc<GradRecord>>>,
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `grad_func` for every value inside `owner`.
    ///
    /// Must be called during the forward pass, once per operation and
    /// differentiable input, in forward order. `Skip` positions of `owner`
    /// receive nothing. A value that occurs several times in one owner holds
    /// the record once.
    ///
    /// # Errors
    /// `UnsupportedOperation` if a value appears in both `owner` and `result`;
    /// such a record could never be finalized.
    pub fn add_partial_derivative<B>(
        &mut self,
        grad_func: B,
        owner: Node,
        result: Node,
    ) -> Result<(), GradTapeError>
    where
        B: BackwardOp + 'static,
    {
        let result_leaves = result.leaves();
        if owner.leaves().iter().any(|leaf| result_leaves.contains(leaf)) {
            return Err(GradTapeError::UnsupportedOperation(format!(
                "derivative func {:?} lists a value as both owner and result",
                grad_func
            )));
        }
        let record = Rc::new(GradRecord {
            grad_func: Rc::new(grad_func),
            result,
            owner,
        });
        log::trace!("Recording derivative func {:?}", record.grad_func);
        let grad_records = &mut self.grad_records;
        record.owner.for_each_leaf(&mut |value| {
            let records = grad_records.entry(value.clone()).or_default();
            if !records.iter().any(|r| Rc::ptr_eq(r, &record)) {
                records.push(Rc::clone(&record));
            }
        });
        Ok(())
    }

    /// Seeds the gradient of every value in `target` with ones.
    pub fn set_gradient_target(&mut self, target: &Node) -> Result<(), GradTapeError> {
        for value in target.leaves() {
            self.grads.insert(value.clone(), value.ones_like()?);
        }
        Ok(())
    }

    /// Computes the gradient of the seeded target(s) with respect to `origin`.
    ///
    /// Walks the recorded graph with an explicit stack. A value is finalized
    /// only once every consumer of it has pushed its contribution, which keeps
    /// diamond-shaped graphs correct without a precomputed topological order.
    /// Values with no path to a seeded target get a zero gradient.
    pub fn get_gradient(&mut self, origin: &Value) -> Result<Value, GradTapeError> {
        let mut stack = vec![origin.clone()];
        while let Some(current) = stack.last().cloned() {
            if self.is_gradable(&current) {
                stack.pop();
                self.cached_gradient(&current)?;
                let records = self.grad_records.get(&current).cloned().unwrap_or_default();
                for record in &records {
                    log::debug!("Calling derivative func {:?}", record.grad_func);
                    let grad_output = self.cached_gradient_node(&record.result)?;
                    let grad = record.grad_func.backward(&grad_output)?;
                    self.accumulate(&record.owner, grad)?;
                }
                for record in &records {
                    self.remove_record(record);
                }
            } else if let Some(records) = self.grad_records.get(&current) {
                for record in records {
                    record
                        .result
                        .for_each_leaf(&mut |value| stack.push(value.clone()));
                }
            }
        }
        self.cached_gradient(origin)
    }

    /// Number of unconsumed records owned (in part) by `value`.
    pub fn pending_records(&self, value: &Value) -> usize {
        self.grad_records.get(value).map_or(0, Vec::len)
    }

    /// Returns the cached gradient of `value` without initializing it.
    pub fn cached(&self, value: &Value) -> Option<&Value> {
        self.grads.get(value)
    }

    fn has_pending(&self, value: &Value) -> bool {
        self.pending_records(value) != 0
    }

    /// True when every consumer of `value` already holds a final gradient,
    /// i.e. none of the values in its records' results has pending records.
    fn is_gradable(&self, value: &Value) -> bool {
        self.grad_records.get(value).map_or(true, |records| {
            records
                .iter()
                .all(|record| record.result.all_leaves(&mut |leaf| !self.has_pending(leaf)))
        })
    }

    /// Returns the gradient of `value`, allocating a zero of the same kind,
    /// shape, dtype and device on first access.
    fn cached_gradient(&mut self, value: &Value) -> Result<Value, GradTapeError> {
        if let Some(grad) = self.grads.get(value) {
            return Ok(grad.clone());
        }
        let zero = value.zeros_like()?;
        self.grads.insert(value.clone(), zero.clone());
        Ok(zero)
    }

    fn cached_gradient_node(&mut self, node: &Node) -> Result<Node, GradTapeError> {
        match node {
            Node::Leaf(value) => Ok(Node::Leaf(self.cached_gradient(value)?)),
            Node::Composite(children) => children
                .iter()
                .map(|child| self.cached_gradient_node(child))
                .collect::<Result<Vec<_>, _>>()
                .map(Node::Composite),
            Node::Skip => Ok(Node::Skip),
        }
    }

    /// Adds `contribution` into the gradients of the values in `owner`.
    ///
    /// The whole structure is checked before anything is added, so a
    /// mismatch leaves no half-applied contribution behind.
    fn accumulate(&mut self, owner: &Node, contribution: Node) -> Result<(), GradTapeError> {
        if let Err(err) = check_congruent(owner, &contribution) {
            log::error!("Number of gradients does not match: {}", err);
            return Err(err);
        }
        self.add_gradient(owner, contribution)
    }

    fn add_gradient(&mut self, owner: &Node, contribution: Node) -> Result<(), GradTapeError> {
        match (owner, contribution) {
            (Node::Skip, _) | (_, Node::Skip) => Ok(()),
            (Node::Leaf(value), Node::Leaf(grad)) => {
                let current = self.cached_gradient(value)?;
                let summed = current.add(&grad)?;
                self.grads.insert(value.clone(), summed);
                Ok(())
            }
            (Node::Composite(owners), Node::Composite(grads)) => {
                for (sub_owner, sub_grad) in owners.iter().zip(grads) {
                    self.add_gradient(sub_owner, sub_grad)?;
                }
                Ok(())
            }
            (owner, contribution) => check_congruent(owner, &contribution),
        }
    }

    fn remove_record(&mut self, record: &Rc<GradRecord>) {
        for value in record.owner.leaves() {
            if let Some(records) = self.grad_records.get_mut(value) {
                records.retain(|r| !Rc::ptr_eq(r, record));
                if records.is_empty() {
                    self.grad_records.remove(value);
                }
            }
        }
    }
}

fn node_len(node: &Node) -> usize {
    node.as_composite().map_or(1, <[Node]>::len)
}

fn check_congruent(owner: &Node, contribution: &Node) -> Result<(), GradTapeError> {
    match (owner, contribution) {
        (Node::Skip, _) | (_, Node::Skip) | (Node::Leaf(_), Node::Leaf(_)) => Ok(()),
        (Node::Composite(owners), Node::Composite(grads)) => {
            if owners.len() != grads.len() {
                return Err(GradTapeError::StructureMismatch {
                    expected: owners.len(),
                    actual: grads.len(),
                });
            }
            owners
                .iter()
                .zip(grads)
                .try_for_each(|(o, g)| check_congruent(o, g))
        }
        (owner, contribution) => Err(GradTapeError::StructureMismatch {
            expected: node_len(owner),
            actual: node_len(contribution),
        }),
    }
}

#[cfg(test)]
#[path = "tape_test.rs"]
mod tests;
