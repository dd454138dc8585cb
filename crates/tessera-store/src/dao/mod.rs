//! Data-access objects
//!
//! DAOs are stateless: every function takes the entity manager it should work
//! against, so the caller decides whether the work runs inside a transaction.

mod access_info;
mod access_permission;

pub use access_info::AccessInfoDao;
pub use access_permission::AccessPermissionDao;

use tessera_core::{ListResult, Query, Queryable, Result, TesseraError};

/// Filter, sort, and paginate entities in memory
///
/// Results are always restricted to the query's scope. The effective limit is
/// the smaller of the query's limit and `max_limit`.
pub(crate) fn execute_query<'a, E, I>(
    entities: I,
    query: &Query<E::Attribute>,
    max_limit: usize,
) -> Result<ListResult<E>>
where
    E: Queryable + Clone + 'a,
    I: Iterator<Item = &'a E>,
{
    let limit = query.limit.unwrap_or(max_limit).min(max_limit);
    if limit == 0 {
        return Err(TesseraError::illegal_argument("query.limit", 0));
    }

    let mut matched: Vec<&E> = entities.filter(|entity| in_query(*entity, query)).collect();
    if let Some(sort) = &query.sort {
        matched.sort_by(|left, right| sort.compare(*left, *right));
    }

    let mut page = matched.into_iter().skip(query.offset);
    let items: Vec<E> = page.by_ref().take(limit).cloned().collect();
    let limit_exceeded = page.next().is_some();

    Ok(ListResult {
        items,
        limit_exceeded,
    })
}

/// Count entities matching a query, ignoring pagination
pub(crate) fn count_query<'a, E, I>(entities: I, query: &Query<E::Attribute>) -> u64
where
    E: Queryable + 'a,
    I: Iterator<Item = &'a E>,
{
    entities.filter(|entity| in_query(*entity, query)).count() as u64
}

fn in_query<E: Queryable>(entity: &E, query: &Query<E::Attribute>) -> bool {
    query
        .scope_id
        .map_or(true, |scope_id| entity.scope_id() == scope_id)
        && query
            .predicate
            .as_ref()
            .map_or(true, |predicate| predicate.matches(entity))
}
