//! Scalar autograd: computation graph of single float values with backpropagation.

use crate::autograd::{topo, Exp, Op, Pow, ScalarNode, Tanh};
use std::cell::RefCell;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::rc::Rc;

/// Internal scalar node: forward value, gradient, and graph edges for backprop.
pub(crate) struct Value {
    /// Forward pass value.
    pub(crate) data: f64,
    /// Gradient of the backward root with respect to this node; accumulated during backward.
    pub(crate) grad: f64,
    /// How `data` was derived.
    pub(crate) op: Op,
    /// Operand nodes, in the order `op`'s local rule expects.
    pub(crate) operands: Vec<ValueRef>,
}

impl Drop for Value {
    /// Frees the operand subgraph with a worklist so long chains do not recurse
    /// once per node.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.operands);
        while let Some(node) = pending.pop() {
            if let Ok(cell) = Rc::try_unwrap(node.0) {
                let mut value = cell.into_inner();
                pending.append(&mut value.operands);
            }
        }
    }
}

/// Handle to a scalar node in the autograd computation graph.
///
/// Wraps the node state in `Rc<RefCell<_>>` so that a node can be shared by every
/// consumer that lists it as an operand and gradients can be accumulated during
/// backward. Cloning a `ValueRef` clones the handle, not the node.
///
/// # Example
///
/// ```
/// use micrograd_core::autograd::{ScalarNode, Tanh, ValueRef};
///
/// let a = ValueRef::new(2.0);
/// let b = ValueRef::new(-3.0);
/// let d = &(&a * &b) + 10.0;
/// assert_eq!(d.data(), 4.0);
/// d.backward();
/// assert_eq!(a.grad(), -3.0);
/// assert_eq!(b.grad(), 2.0);
///
/// let t = (&a).tanh();
/// assert!(t.data() < 1.0);
/// ```
#[derive(Clone)]
pub struct ValueRef(pub(crate) Rc<RefCell<Value>>);

impl ValueRef {
    /// Creates a leaf node (no operands) with the given value and zero gradient.
    #[must_use]
    pub fn new(data: f64) -> Self {
        ValueRef::new_with_graph(data, Op::Leaf, Vec::new())
    }

    /// Creates a node that remembers its op and operands for backprop.
    fn new_with_graph(data: f64, op: Op, operands: Vec<ValueRef>) -> Self {
        debug_assert_eq!(operands.len(), op.arity(), "{op:?} arity");
        ValueRef(Rc::new(RefCell::new(Value {
            data,
            grad: 0.0,
            op,
            operands,
        })))
    }

    /// The operation that produced this node.
    #[must_use]
    pub fn op(&self) -> Op {
        self.0.borrow().op
    }

    /// Handles to this node's operands, in order.
    #[must_use]
    pub fn operands(&self) -> Vec<ValueRef> {
        self.0.borrow().operands.clone()
    }

    /// True for inputs, parameters and literal constants.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.op() == Op::Leaf
    }

    /// True if both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &ValueRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Overwrites this node's gradient.
    pub fn set_grad(&self, g: f64) {
        self.0.borrow_mut().grad = g;
    }

    /// Adds to this node's gradient (for accumulation when a value is used multiple times).
    pub(crate) fn add_grad(&self, g: f64) {
        self.0.borrow_mut().grad += g;
    }

    /// Overwrites the forward value of a leaf, e.g. an optimizer step on a parameter.
    ///
    /// Nodes already built on top of this leaf keep their old cached values; rebuild
    /// the graph to see the update.
    pub fn set_data(&self, data: f64) {
        debug_assert!(self.is_leaf(), "set_data on a non-leaf node");
        self.0.borrow_mut().data = data;
    }
}

impl ScalarNode for ValueRef {
    fn data(&self) -> f64 {
        self.0.borrow().data
    }

    fn grad(&self) -> f64 {
        self.0.borrow().grad
    }

    fn backward(&self) {
        topo::backward(self);
    }

    fn zero_grad(&self) {
        self.set_grad(0.0);
    }
}

impl fmt::Display for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0.borrow();
        match v.op {
            Op::Leaf => write!(f, "Value(data={:.4}, grad={:.4})", v.data, v.grad),
            op => write!(
                f,
                "Value(data={:.4}, grad={:.4}, op={op})",
                v.data, v.grad
            ),
        }
    }
}

impl fmt::Debug for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0.borrow();
        f.debug_struct("ValueRef")
            .field("data", &v.data)
            .field("grad", &v.grad)
            .field("op", &v.op)
            .field("operands", &v.operands.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Primitives: x + y, x * y, x.pow(y), x.exp(), x.tanh()
// -----------------------------------------------------------------------------

impl Add for &ValueRef {
    type Output = ValueRef;

    fn add(self, rhs: Self) -> ValueRef {
        ValueRef::new_with_graph(
            self.data() + rhs.data(),
            Op::Add,
            vec![self.clone(), rhs.clone()],
        )
    }
}

impl Mul for &ValueRef {
    type Output = ValueRef;

    fn mul(self, rhs: Self) -> ValueRef {
        ValueRef::new_with_graph(
            self.data() * rhs.data(),
            Op::Mul,
            vec![self.clone(), rhs.clone()],
        )
    }
}

impl Pow<f64> for &ValueRef {
    type Output = ValueRef;

    fn pow(self, exp: f64) -> ValueRef {
        ValueRef::new_with_graph(
            self.data().powf(exp),
            Op::Pow,
            vec![self.clone(), ValueRef::new(exp)],
        )
    }
}

impl Exp for &ValueRef {
    type Output = ValueRef;

    fn exp(self) -> ValueRef {
        ValueRef::new_with_graph(self.data().exp(), Op::Exp, vec![self.clone()])
    }
}

impl Tanh for &ValueRef {
    type Output = ValueRef;

    fn tanh(self) -> ValueRef {
        ValueRef::new_with_graph(self.data().tanh(), Op::Tanh, vec![self.clone()])
    }
}

// -----------------------------------------------------------------------------
// Derived ops: -x, x - y, x / y (compositions only, no backward rule of their own)
// -----------------------------------------------------------------------------

impl Neg for &ValueRef {
    type Output = ValueRef;

    fn neg(self) -> ValueRef {
        self * -1.0
    }
}

impl Sub for &ValueRef {
    type Output = ValueRef;

    fn sub(self, rhs: Self) -> ValueRef {
        self + &(-rhs)
    }
}

impl Div for &ValueRef {
    type Output = ValueRef;

    fn div(self, rhs: Self) -> ValueRef {
        self * &rhs.pow(-1.0)
    }
}

impl Neg for ValueRef {
    type Output = ValueRef;

    fn neg(self) -> ValueRef {
        -&self
    }
}

// -----------------------------------------------------------------------------
// Scalar promotion: literals become fresh leaf constants
// -----------------------------------------------------------------------------

impl Add<f64> for &ValueRef {
    type Output = ValueRef;

    fn add(self, rhs: f64) -> ValueRef {
        self + &ValueRef::new(rhs)
    }
}

impl Add<&ValueRef> for f64 {
    type Output = ValueRef;

    fn add(self, rhs: &ValueRef) -> ValueRef {
        rhs + self
    }
}

impl Mul<f64> for &ValueRef {
    type Output = ValueRef;

    fn mul(self, rhs: f64) -> ValueRef {
        self * &ValueRef::new(rhs)
    }
}

impl Mul<&ValueRef> for f64 {
    type Output = ValueRef;

    fn mul(self, rhs: &ValueRef) -> ValueRef {
        rhs * self
    }
}

impl Sub<f64> for &ValueRef {
    type Output = ValueRef;

    fn sub(self, rhs: f64) -> ValueRef {
        self + (-rhs)
    }
}

impl Sub<&ValueRef> for f64 {
    type Output = ValueRef;

    fn sub(self, rhs: &ValueRef) -> ValueRef {
        self + &(-rhs)
    }
}

impl Div<f64> for &ValueRef {
    type Output = ValueRef;

    fn div(self, rhs: f64) -> ValueRef {
        self * (1.0 / rhs)
    }
}

impl Div<&ValueRef> for f64 {
    type Output = ValueRef;

    fn div(self, rhs: &ValueRef) -> ValueRef {
        self * &rhs.pow(-1.0)
    }
}

// -----------------------------------------------------------------------------
// Owned operands forward to the by-reference impls
// -----------------------------------------------------------------------------

macro_rules! forward_owned_binop {
    ($($imp:ident :: $method:ident),* $(,)?) => {$(
        impl $imp<ValueRef> for ValueRef {
            type Output = ValueRef;

            fn $method(self, rhs: ValueRef) -> ValueRef {
                (&self).$method(&rhs)
            }
        }

        impl $imp<&ValueRef> for ValueRef {
            type Output = ValueRef;

            fn $method(self, rhs: &ValueRef) -> ValueRef {
                (&self).$method(rhs)
            }
        }

        impl $imp<ValueRef> for &ValueRef {
            type Output = ValueRef;

            fn $method(self, rhs: ValueRef) -> ValueRef {
                self.$method(&rhs)
            }
        }

        impl $imp<f64> for ValueRef {
            type Output = ValueRef;

            fn $method(self, rhs: f64) -> ValueRef {
                (&self).$method(rhs)
            }
        }

        impl $imp<ValueRef> for f64 {
            type Output = ValueRef;

            fn $method(self, rhs: ValueRef) -> ValueRef {
                self.$method(&rhs)
            }
        }
    )*};
}

forward_owned_binop!(Add::add, Mul::mul, Sub::sub, Div::div);
