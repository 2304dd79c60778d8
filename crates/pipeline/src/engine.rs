//! The query engine: filter, sort, slice.
//!
//! ## Algorithm
//! 1. Validate the params
//! 2. Seed candidates: the category index when a category is given,
//!    otherwise the whole catalog (both in load order)
//! 3. Run the FilterPipeline built from the params
//! 4. Sort if requested (stable, ties by id ascending)
//! 5. Skip `offset`, take `limit`
//!
//! The catalog is only borrowed; results are references into it.

use crate::error::Result;
use crate::filter_pipeline::FilterPipeline;
use crate::params::{QueryParams, SortDirection, SortKey, SortSpec};
use data_loader::{Catalog, LiquorRecord};
use std::cmp::Ordering;

/// One page of results plus the number of matches before slicing
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage<'a> {
    pub total_matched: usize,
    pub records: Vec<&'a LiquorRecord>,
}

/// Run `params` against `catalog` and return the matching records in order.
pub fn query<'a>(catalog: &'a Catalog, params: &QueryParams) -> Result<Vec<&'a LiquorRecord>> {
    execute(catalog, params).map(|page| page.records)
}

/// Same as [`query`], but also reports how many records matched before
/// `offset`/`limit` were applied.
pub fn execute<'a>(catalog: &'a Catalog, params: &QueryParams) -> Result<QueryPage<'a>> {
    params.validate()?;

    let candidates: Vec<&LiquorRecord> = match &params.category {
        Some(category) => {
            let records = catalog.records();
            catalog
                .positions_for_category(category)
                .iter()
                .map(|&pos| &records[pos])
                .collect()
        }
        None => catalog.records().iter().collect(),
    };

    let pipeline = FilterPipeline::from_params(params);
    let mut matched = pipeline.apply(candidates);

    if let Some(sort) = params.sort {
        sort_records(&mut matched, sort);
    }

    let total_matched = matched.len();
    let records = matched
        .into_iter()
        .skip(params.offset)
        .take(params.limit.unwrap_or(usize::MAX))
        .collect();

    Ok(QueryPage {
        total_matched,
        records,
    })
}

/// Stable sort by `spec`, ties broken by id ascending.
///
/// Records missing the sort key go last regardless of direction.
pub fn sort_records(records: &mut [&LiquorRecord], spec: SortSpec) {
    records.sort_by(|a, b| compare(a, b, spec).then_with(|| a.id.cmp(&b.id)));
}

fn compare(a: &LiquorRecord, b: &LiquorRecord, spec: SortSpec) -> Ordering {
    match spec.key {
        SortKey::Id => directed(a.id.cmp(&b.id), spec.direction),
        SortKey::Name => directed(
            a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            spec.direction,
        ),
        SortKey::Price => compare_optional(a.price, b.price, spec.direction),
        SortKey::Abv => compare_optional(a.effective_abv(), b.effective_abv(), spec.direction),
    }
}

fn compare_optional(a: Option<f64>, b: Option<f64>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(a.total_cmp(&b), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}
