//! The primitive operation catalog and its local backward rules.

use std::fmt;

use super::impls::scalar::ValueRef;
use super::ScalarNode;

/// How a node's value was derived.
///
/// Negation, subtraction and division are compositions of these primitives and
/// have no variant of their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    /// Input, parameter or literal constant. No operands.
    Leaf,
    /// `a + b`.
    Add,
    /// `a * b`.
    Mul,
    /// `base ^ y`; the second operand is a constant leaf holding `y`.
    Pow,
    /// `e ^ x`.
    Exp,
    /// `tanh(x)`.
    Tanh,
}

impl Op {
    /// Number of operands a node with this op holds.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Op::Leaf => 0,
            Op::Exp | Op::Tanh => 1,
            Op::Add | Op::Mul | Op::Pow => 2,
        }
    }

    /// Short printable form (`+`, `*`, `pow`, ...); empty for leaves.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Leaf => "",
            Op::Add => "+",
            Op::Mul => "*",
            Op::Pow => "pow",
            Op::Exp => "exp",
            Op::Tanh => "tanh",
        }
    }

    /// Local vector-Jacobian rule: pushes the contribution of a node with forward
    /// `value` and accumulated `grad` into each of its `operands`.
    ///
    /// Reads only cached forward values. Contributions are added, never assigned.
    pub(crate) fn backward(self, value: f64, grad: f64, operands: &[ValueRef]) {
        match (self, operands) {
            (Op::Leaf, []) => {}
            (Op::Add, [a, b]) => {
                a.add_grad(grad);
                b.add_grad(grad);
            }
            (Op::Mul, [a, b]) => {
                // read both before writing: `a` and `b` may be the same node
                let (a_data, b_data) = (a.data(), b.data());
                a.add_grad(b_data * grad);
                b.add_grad(a_data * grad);
            }
            (Op::Pow, [base, exponent]) => {
                // exponent is treated as a constant and gets nothing
                let y = exponent.data();
                base.add_grad(y * base.data().powf(y - 1.0) * grad);
            }
            (Op::Exp, [x]) => x.add_grad(value * grad),
            (Op::Tanh, [x]) => x.add_grad((1.0 - value * value) * grad),
            (op, operands) => unreachable!(
                "{op:?} node holds {} operands, expected {}",
                operands.len(),
                op.arity()
            ),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
