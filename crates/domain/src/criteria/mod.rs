//! Search criteria for record lists.
//!
//! A [`Criterion`] is either a [`SearchCriterion`] leaf or a [`BooleanCriterion`]
//! combining other criteria. Both convert to and from the server's search body
//! by a structural fold.

mod boolean;
mod search;

pub use boolean::{BooleanCriterion, BooleanOperator};
pub use search::{SearchCriterion, UserRole};

use crate::dto::{BooleanCriterionDto, CriterionDto};
use crate::error::{DomainError, DomainResult};
use crate::item::RecordListItem;

/// Any search criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// A leaf.
    Search(SearchCriterion),
    /// A combinator.
    Boolean(BooleanCriterion),
}

impl Criterion {
    /// Lists whose name contains `value`.
    #[must_use]
    pub fn name_contains(value: impl Into<String>) -> Self {
        SearchCriterion::new().with_name_contains(value).into()
    }

    /// Lists that contain `item`.
    #[must_use]
    pub fn contains_item(item: RecordListItem) -> Self {
        SearchCriterion::new().with_records([item]).into()
    }

    /// Lists on which the caller holds `role`.
    #[must_use]
    pub fn user_role(role: UserRole) -> Self {
        SearchCriterion::new().with_user_role(role).into()
    }

    /// Lists matching every one of `children`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyCombinator`] if `children` is empty.
    pub fn match_all(children: impl IntoIterator<Item = Self>) -> DomainResult<Self> {
        BooleanCriterion::new(BooleanOperator::MatchAll, children).map(Self::Boolean)
    }

    /// Lists matching at least one of `children`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyCombinator`] if `children` is empty.
    pub fn match_any(children: impl IntoIterator<Item = Self>) -> DomainResult<Self> {
        BooleanCriterion::new(BooleanOperator::MatchAny, children).map(Self::Boolean)
    }

    /// Lists matching none of `children`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyCombinator`] if `children` is empty.
    pub fn match_none(children: impl IntoIterator<Item = Self>) -> DomainResult<Self> {
        BooleanCriterion::new(BooleanOperator::MatchNone, children).map(Self::Boolean)
    }

    /// Lists matching both `self` and `other`.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::Boolean(BooleanCriterion {
            operator: BooleanOperator::MatchAll,
            children: vec![self, other],
        })
    }

    /// Lists matching `self` or `other`.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Boolean(BooleanCriterion {
            operator: BooleanOperator::MatchAny,
            children: vec![self, other],
        })
    }

    /// Lists not matching `self`.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Boolean(BooleanCriterion {
            operator: BooleanOperator::MatchNone,
            children: vec![self],
        })
    }

    /// Search body for this criterion.
    #[must_use]
    pub fn to_dto(&self) -> CriterionDto {
        match self {
            Self::Search(leaf) => CriterionDto::Search(leaf.to_dto()),
            Self::Boolean(combinator) => {
                let children = Some(combinator.children().iter().map(Self::to_dto).collect());
                let mut dto = BooleanCriterionDto::default();
                match combinator.operator() {
                    BooleanOperator::MatchAll => dto.match_all = children,
                    BooleanOperator::MatchAny => dto.match_any = children,
                    BooleanOperator::MatchNone => dto.match_none = children,
                }
                CriterionDto::Boolean(dto)
            }
        }
    }

    /// Builds a criterion from a search body.
    ///
    /// A combinator body holding several operators becomes a match-all over
    /// one combinator per operator, in the order all, any, none.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyCombinator`] if an operator holds no children.
    pub fn from_dto(dto: CriterionDto) -> DomainResult<Self> {
        match dto {
            CriterionDto::Search(leaf) => Ok(Self::Search(SearchCriterion::from_dto(leaf))),
            CriterionDto::Boolean(combinator) => {
                let mut parts = [
                    (BooleanOperator::MatchAll, combinator.match_all),
                    (BooleanOperator::MatchAny, combinator.match_any),
                    (BooleanOperator::MatchNone, combinator.match_none),
                ]
                .into_iter()
                .filter_map(|(operator, children)| children.map(|c| (operator, c)))
                .map(|(operator, children)| {
                    let children = children
                        .into_iter()
                        .map(Self::from_dto)
                        .collect::<DomainResult<Vec<_>>>()?;
                    BooleanCriterion::new(operator, children).map(Self::Boolean)
                })
                .collect::<DomainResult<Vec<_>>>()?;

                match parts.len() {
                    0 => Err(DomainError::EmptyCombinator(BooleanOperator::MatchAll)),
                    1 => Ok(parts.remove(0)),
                    _ => Self::match_all(parts),
                }
            }
        }
    }
}

impl std::ops::Not for Criterion {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl From<SearchCriterion> for Criterion {
    fn from(value: SearchCriterion) -> Self {
        Self::Search(value)
    }
}

impl From<BooleanCriterion> for Criterion {
    fn from(value: BooleanCriterion) -> Self {
        Self::Boolean(value)
    }
}
