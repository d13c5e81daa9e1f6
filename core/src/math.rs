//! Arithmetic and bitwise operators on expressions.
//!
//! `+` and `-` produce a grouped node so the sum keeps its meaning when it
//! is multiplied later; `*` and `/` bind tightly enough to stay bare.
//! `&`, `|` and `!` on [`Node`] are the boolean AND/OR/NOT, so the bitwise
//! operators are named methods instead.

use core::ops::{Add, Div, Mul, Sub};

use crate::nodes::{Attribute, BinaryOperator, Node, Operand, UnaryOperator};

fn arithmetic(op: BinaryOperator, left: Node, right: Operand) -> Node {
    let right = right.quoted_for(&left);
    Node::binary(op, left, right)
}

macro_rules! impl_math_ops {
    ($($ty:ty),+) => {
        $(
            impl<T: Into<Operand>> Add<T> for $ty {
                type Output = Node;

                fn add(self, rhs: T) -> Node {
                    arithmetic(BinaryOperator::Addition, self.into(), rhs.into()).grouping()
                }
            }

            impl<T: Into<Operand>> Sub<T> for $ty {
                type Output = Node;

                fn sub(self, rhs: T) -> Node {
                    arithmetic(BinaryOperator::Subtraction, self.into(), rhs.into()).grouping()
                }
            }

            impl<T: Into<Operand>> Mul<T> for $ty {
                type Output = Node;

                fn mul(self, rhs: T) -> Node {
                    arithmetic(BinaryOperator::Multiplication, self.into(), rhs.into())
                }
            }

            impl<T: Into<Operand>> Div<T> for $ty {
                type Output = Node;

                fn div(self, rhs: T) -> Node {
                    arithmetic(BinaryOperator::Division, self.into(), rhs.into())
                }
            }
        )+
    };
}

impl_math_ops!(Node, Attribute, &Attribute);

macro_rules! impl_bitwise {
    ($ty:ty) => {
        impl $ty {
            /// `(self & rhs)`
            pub fn bitwise_and(&self, rhs: impl Into<Operand>) -> Node {
                arithmetic(BinaryOperator::BitwiseAnd, self.clone().into(), rhs.into()).grouping()
            }

            /// `(self | rhs)`
            pub fn bitwise_or(&self, rhs: impl Into<Operand>) -> Node {
                arithmetic(BinaryOperator::BitwiseOr, self.clone().into(), rhs.into()).grouping()
            }

            /// `(self ^ rhs)`
            pub fn bitwise_xor(&self, rhs: impl Into<Operand>) -> Node {
                arithmetic(BinaryOperator::BitwiseXor, self.clone().into(), rhs.into()).grouping()
            }

            /// `(self << rhs)`
            pub fn bitwise_shift_left(&self, rhs: impl Into<Operand>) -> Node {
                arithmetic(BinaryOperator::BitwiseShiftLeft, self.clone().into(), rhs.into())
                    .grouping()
            }

            /// `(self >> rhs)`
            pub fn bitwise_shift_right(&self, rhs: impl Into<Operand>) -> Node {
                arithmetic(BinaryOperator::BitwiseShiftRight, self.clone().into(), rhs.into())
                    .grouping()
            }

            /// `~self`
            pub fn bitwise_not(&self) -> Node {
                Node::unary(UnaryOperator::Prefix("~".into()), self.clone())
            }

            /// `self <op> rhs` for an operator the tree has no variant for.
            pub fn infix(&self, op: &str, rhs: impl Into<Operand>) -> Node {
                arithmetic(BinaryOperator::Infix(op.into()), self.clone().into(), rhs.into())
            }
        }
    };
}

impl_bitwise!(Node);
impl_bitwise!(Attribute);
