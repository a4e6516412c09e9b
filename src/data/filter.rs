use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::SightingCollection;

// ---------------------------------------------------------------------------
// Filter predicate: inclusive date range + selected regions
// ---------------------------------------------------------------------------

/// Keep sightings with `start <= date <= end` whose region is one of
/// `allowed_regions` (exact string match).
///
/// Source order is preserved and the input is left untouched.  An inverted
/// range or an empty region set is a valid filter that matches nothing.
pub fn filter_sightings(
    records: &SightingCollection,
    start: NaiveDate,
    end: NaiveDate,
    allowed_regions: &BTreeSet<String>,
) -> SightingCollection {
    let kept = records
        .iter()
        .filter(|s| start <= s.date && s.date <= end && allowed_regions.contains(&s.region))
        .cloned()
        .collect();
    records.with_sightings(kept)
}

/// The UI's current filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub regions: BTreeSet<String>,
}

impl FilterState {
    /// Initialise a filter that selects everything in `collection`: its full
    /// date span and every region.  `None` for an empty collection, which has
    /// no span.
    pub fn for_collection(collection: &SightingCollection) -> Option<Self> {
        let (start, end) = collection.date_span()?;
        Some(FilterState {
            start,
            end,
            regions: collection.regions(),
        })
    }

    pub fn apply(&self, collection: &SightingCollection) -> SightingCollection {
        filter_sightings(collection, self.start, self.end, &self.regions)
    }
}
