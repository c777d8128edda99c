//! Boolean combinations of criteria.

use std::fmt;

use super::Criterion;
use crate::error::{DomainError, DomainResult};

/// How a combinator folds the results of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOperator {
    /// Every child must match.
    MatchAll,
    /// At least one child must match.
    MatchAny,
    /// No child may match.
    MatchNone,
}

impl BooleanOperator {
    /// Evaluates the operator over child results.
    pub fn evaluate(self, mut results: impl Iterator<Item = bool>) -> bool {
        match self {
            Self::MatchAll => results.all(|matched| matched),
            Self::MatchAny => results.any(|matched| matched),
            Self::MatchNone => !results.any(|matched| matched),
        }
    }
}

impl fmt::Display for BooleanOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MatchAll => "match-all",
            Self::MatchAny => "match-any",
            Self::MatchNone => "match-none",
        })
    }
}

/// A combinator over one or more child criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanCriterion {
    pub(super) operator: BooleanOperator,
    pub(super) children: Vec<Criterion>,
}

impl BooleanCriterion {
    /// Combines `children` with `operator`. Child order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyCombinator`] if `children` is empty.
    pub fn new(
        operator: BooleanOperator,
        children: impl IntoIterator<Item = Criterion>,
    ) -> DomainResult<Self> {
        let children: Vec<_> = children.into_iter().collect();
        if children.is_empty() {
            return Err(DomainError::EmptyCombinator(operator));
        }
        Ok(Self { operator, children })
    }

    /// The operator.
    #[must_use]
    pub const fn operator(&self) -> BooleanOperator {
        self.operator
    }

    /// The children, in order. Never empty.
    #[must_use]
    pub fn children(&self) -> &[Criterion] {
        &self.children
    }
}
