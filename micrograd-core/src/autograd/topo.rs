//! Reverse-topological traversal and the backward driver.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use super::impls::scalar::{Value, ValueRef};

/// Returns every node reachable from `root` in depth-first post-order.
///
/// Each node appears exactly once and strictly after all of its operands, so `root`
/// is always last. A leaf root yields a one-element order.
#[must_use]
pub fn topological_order(root: &ValueRef) -> Vec<ValueRef> {
    let mut topo = Vec::new();
    let mut visited: HashSet<*const RefCell<Value>> = HashSet::new();
    // Explicit stack instead of recursion so long chains cannot exhaust the call stack.
    // `true` marks a node whose operands have already been scheduled.
    let mut stack = vec![(root.clone(), false)];

    while let Some((v, expanded)) = stack.pop() {
        if expanded {
            topo.push(v);
            continue;
        }
        if !visited.insert(Rc::as_ptr(&v.0)) {
            continue;
        }
        let operands = v.0.borrow().operands.clone();
        stack.push((v, true));
        // reversed so operands are visited in their stored order
        for operand in operands.into_iter().rev() {
            stack.push((operand, false));
        }
    }
    topo
}

/// Seeds `root` with gradient 1 and fires every node's local rule exactly once,
/// consumers before their operands.
pub(crate) fn backward(root: &ValueRef) {
    let topo = topological_order(root);
    log::trace!("backward over {} nodes", topo.len());

    root.set_grad(1.0);
    for v in topo.iter().rev() {
        let node = v.0.borrow();
        node.op.backward(node.data, node.grad, &node.operands);
    }
}
