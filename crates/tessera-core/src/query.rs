//! Query model
//!
//! Queries are plain data: a scope, an optional predicate tree over entity
//! attributes, an optional sort, and pagination. Entities opt in through
//! [`Queryable`], which maps an attribute to a comparable [`AttributeValue`].
//! Backends decide how to execute a query; the predicate evaluation here is
//! what in-memory backends use.

use crate::{Identifier, ScopeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Comparable value of an entity attribute
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Attribute not set on the entity
    Absent,
    /// Any UUID-backed identifier
    Id(Uuid),
    /// Free text, domain names, action names
    Text(String),
    /// Point in time
    Timestamp(DateTime<Utc>),
}

impl AttributeValue {
    /// Value for an identifier attribute
    pub fn id(id: impl Identifier) -> Self {
        Self::Id(id.uuid())
    }

    /// Value for an optional identifier attribute
    pub fn optional_id<I: Identifier>(id: Option<I>) -> Self {
        id.map_or(Self::Absent, Self::id)
    }

    /// Value for a text attribute
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// Entities that can be filtered and sorted by a query
pub trait Queryable {
    /// Attribute names understood by predicates over this entity
    type Attribute: Copy + PartialEq + std::fmt::Debug;

    /// Scope that owns the entity
    fn scope_id(&self) -> ScopeId;

    /// Current value of an attribute
    fn attribute(&self, attribute: Self::Attribute) -> AttributeValue;
}

/// Comparison applied by an attribute predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Attribute equals the value
    Equal,
    /// Attribute differs from the value
    NotEqual,
}

/// Single attribute comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributePredicate<A> {
    /// Attribute to compare
    pub attribute: A,
    /// Value to compare against
    pub value: AttributeValue,
    /// Comparison to apply
    pub operator: Operator,
}

/// Predicate tree over entity attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate<A> {
    /// Compare one attribute
    Attribute(AttributePredicate<A>),
    /// All children must match; an empty list matches everything
    And(Vec<Predicate<A>>),
    /// At least one child must match; an empty list matches nothing
    Or(Vec<Predicate<A>>),
}

impl<A: Copy> Predicate<A> {
    /// `attribute == value`
    pub fn equals(attribute: A, value: AttributeValue) -> Self {
        Self::Attribute(AttributePredicate {
            attribute,
            value,
            operator: Operator::Equal,
        })
    }

    /// `attribute != value`
    pub fn not_equals(attribute: A, value: AttributeValue) -> Self {
        Self::Attribute(AttributePredicate {
            attribute,
            value,
            operator: Operator::NotEqual,
        })
    }

    /// Evaluate the predicate against an entity
    pub fn matches<E>(&self, entity: &E) -> bool
    where
        E: Queryable<Attribute = A>,
    {
        match self {
            Predicate::Attribute(predicate) => {
                let actual = entity.attribute(predicate.attribute);
                match predicate.operator {
                    Operator::Equal => actual == predicate.value,
                    Operator::NotEqual => actual != predicate.value,
                }
            }
            Predicate::And(children) => children.iter().all(|child| child.matches(entity)),
            Predicate::Or(children) => children.iter().any(|child| child.matches(entity)),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

/// Sort criterion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SortCriteria<A> {
    /// Attribute to sort by
    pub attribute: A,
    /// Direction
    pub order: SortOrder,
}

impl<A: Copy> SortCriteria<A> {
    /// Compare two entities under this criterion
    pub fn compare<E>(&self, left: &E, right: &E) -> Ordering
    where
        E: Queryable<Attribute = A>,
    {
        let ordering = left
            .attribute(self.attribute)
            .cmp(&right.attribute(self.attribute));
        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Query over entities with attributes of type `A`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query<A> {
    /// Scope to search in; services reject queries without one
    pub scope_id: Option<ScopeId>,
    /// Filter applied within the scope
    pub predicate: Option<Predicate<A>>,
    /// Result ordering
    pub sort: Option<SortCriteria<A>>,
    /// Number of matching items to skip
    pub offset: usize,
    /// Maximum number of items to return; backends cap it
    pub limit: Option<usize>,
}

impl<A> Default for Query<A> {
    fn default() -> Self {
        Self {
            scope_id: None,
            predicate: None,
            sort: None,
            offset: 0,
            limit: None,
        }
    }
}

impl<A> Query<A> {
    /// Query everything in a scope
    pub fn new(scope_id: ScopeId) -> Self {
        Self {
            scope_id: Some(scope_id),
            ..Self::default()
        }
    }

    /// Set the predicate
    pub fn with_predicate(mut self, predicate: Predicate<A>) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Set the sort criterion
    pub fn with_sort(mut self, attribute: A, order: SortOrder) -> Self {
        self.sort = Some(SortCriteria { attribute, order });
        self
    }

    /// Set the offset
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Set the limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Page of query results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    /// Items in the page
    pub items: Vec<T>,
    /// True when more items matched than the limit allowed
    pub limit_exceeded: bool,
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            limit_exceeded: false,
        }
    }
}

impl<T> ListResult<T> {
    /// Number of items in the page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First item, if any
    pub fn first_item(&self) -> Option<&T> {
        self.items.first()
    }

    /// Iterate over the items
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for ListResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
