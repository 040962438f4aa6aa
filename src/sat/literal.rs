#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Three-valued literal values.
//!
//! A `Trit` plays two roles. Inside a clause it says whether a variable is
//! absent, appears positively or appears negated. Inside an assignment it
//! says whether a variable is unassigned, true or false. Keeping one type for
//! both lets the propagation oracle compare the two directly.

use core::ops::Neg;
use std::fmt::{Display, Formatter};

/// Index of a variable, `0..num_vars`.
pub type Variable = usize;

/// A literal value: `-1`, `0` or `+1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(i8)]
pub enum Trit {
    /// Negated in a clause, false in an assignment.
    False = -1,
    /// Absent from a clause, unassigned in an assignment.
    #[default]
    Unassigned = 0,
    /// Positive in a clause, true in an assignment.
    True = 1,
}

impl Trit {
    /// The trit of a signed DIMACS literal: positive gives `True`, negative `False`.
    #[must_use]
    pub const fn of_literal(literal: i32) -> Self {
        if literal > 0 {
            Self::True
        } else if literal < 0 {
            Self::False
        } else {
            Self::Unassigned
        }
    }

    /// `True` for `true`, `False` for `false`.
    #[must_use]
    pub const fn from_bool(b: bool) -> Self {
        if b { Self::True } else { Self::False }
    }

    /// Anything but `Unassigned`.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        !matches!(self, Self::Unassigned)
    }

    /// Exactly `Unassigned`.
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        matches!(self, Self::Unassigned)
    }

    /// The opposite polarity. `Unassigned` stays `Unassigned`.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Unassigned => Self::Unassigned,
        }
    }

    /// The boolean value, `None` when unassigned.
    #[must_use]
    pub const fn to_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unassigned => None,
        }
    }

    /// Signed DIMACS literal for `var` under this polarity, or `None` when unassigned.
    #[must_use]
    pub fn to_literal(self, var: Variable) -> Option<i32> {
        let index = i32::try_from(var + 1).ok()?;
        match self {
            Self::True => Some(index),
            Self::False => Some(-index),
            Self::Unassigned => None,
        }
    }
}

impl Neg for Trit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.flipped()
    }
}

impl From<bool> for Trit {
    fn from(b: bool) -> Self {
        Self::from_bool(b)
    }
}

impl From<Trit> for i8 {
    fn from(t: Trit) -> Self {
        t as Self
    }
}

impl Display for Trit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", i8::from(*self))
    }
}

/// Zero-based variable of a signed DIMACS literal.
#[must_use]
pub const fn variable_of(literal: i32) -> Variable {
    (literal.unsigned_abs() as Variable).saturating_sub(1)
}
