//! Autograd: a scalar computation graph with reverse-mode automatic differentiation.
//!
//! The graph is built lazily during forward operations: every operation allocates one
//! new [`ValueRef`] that records its [`Op`] and shares ownership of its operands.
//! [`ScalarNode::backward`] seeds the chosen root with gradient 1 and propagates
//! gradients to every ancestor in reverse topological order (see [`topological_order`]).
//!
//! Gradients *accumulate*. A node feeding several consumers receives the sum of their
//! contributions, and nothing is reset between passes: call [`ScalarNode::zero_grad`]
//! on reused nodes before running another backward pass.

pub mod impls;
mod op;
mod topo;

pub use impls::scalar::ValueRef;
pub use op::Op;
pub use topo::topological_order;

/// Trait for raising a node to a constant power (e.g. `(&a).pow(2.0)`).
///
/// The exponent is stored as a leaf operand but never receives a gradient.
pub trait Pow<Rhs> {
    /// Result of the power operation.
    type Output;

    /// Returns `self^exp` with gradient tracking.
    #[must_use]
    fn pow(self, exp: Rhs) -> Self::Output;
}

/// Trait for the exponential of a node (e.g. `(&a).exp()`).
pub trait Exp {
    /// Result of the exponential.
    type Output;

    /// Returns `exp(self)` with gradient tracking.
    #[must_use]
    fn exp(self) -> Self::Output;
}

/// Trait for the hyperbolic tangent of a node (e.g. `(&a).tanh()`).
pub trait Tanh {
    /// Result of the hyperbolic tangent.
    type Output;

    /// Returns `tanh(self)` with gradient tracking.
    #[must_use]
    fn tanh(self) -> Self::Output;
}

/// A differentiable scalar node in the computation graph.
///
/// Implementations hold a single float value and an accumulated gradient, and
/// participate in backward propagation. Use [`ScalarNode::data`] for the
/// forward value and [`ScalarNode::grad`] after [`ScalarNode::backward`].
pub trait ScalarNode: Clone {
    /// Returns the forward pass value.
    fn data(&self) -> f64;

    /// Returns the accumulated gradient of the last backward root with respect to this node.
    fn grad(&self) -> f64;

    /// Runs backpropagation from this node to every node reachable through its operands.
    ///
    /// Sets this node's gradient to 1 and adds each ancestor's contributions on top of
    /// whatever gradient it already holds.
    fn backward(&self);

    /// Zeros the gradient at this node (e.g. before reusing a parameter in a new pass).
    fn zero_grad(&self);
}
