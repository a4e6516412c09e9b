use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::model::{Sighting, SightingCollection};

// ---------------------------------------------------------------------------
// Top-N rankings
// ---------------------------------------------------------------------------

/// Rank keys by occurrence count, highest first, keeping at most `n`.
/// Sightings with an empty key are not ranked.
///
/// Ties are broken by ascending key (byte-wise string order), so the result
/// never depends on source order.
pub fn top_by<'a, F>(records: &'a SightingCollection, n: usize, key: F) -> Vec<(String, usize)>
where
    F: Fn(&'a Sighting) -> &'a str,
{
    if n == 0 {
        return Vec::new();
    }
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for k in records.iter().map(key).filter(|k| !k.is_empty()) {
        *counts.entry(k).or_default() += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(k, c)| (k.to_string(), c))
        .collect()
}

/// The `n` towns with the most sightings.
pub fn top_towns(records: &SightingCollection, n: usize) -> Vec<(String, usize)> {
    top_by(records, n, |s| s.town.as_str())
}

/// The `n` regions with the most individuals reported (sum of `Count`,
/// one per sighting without a count).  Blank regions and the tie-break
/// follow [`top_by`].
pub fn top_regions_by_individuals(records: &SightingCollection, n: usize) -> Vec<(String, f64)> {
    if n == 0 {
        return Vec::new();
    }
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for s in records.iter().filter(|s| !s.region.is_empty()) {
        *totals.entry(s.region.as_str()).or_default() += s.individuals();
    }
    let mut ranked: Vec<(&str, f64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(k, total)| (k.to_string(), total))
        .collect()
}

// ---------------------------------------------------------------------------
// Time grouping
// ---------------------------------------------------------------------------

/// Sightings per calendar day, ascending by date.  Days without sightings
/// are absent.
pub fn daily_counts(records: &SightingCollection) -> Vec<(NaiveDate, usize)> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for s in records {
        *per_day.entry(s.date).or_default() += 1;
    }
    per_day.into_iter().collect()
}

/// Sightings per calendar month, pooled across years.  Always twelve
/// entries, January first.
pub fn monthly_counts(records: &SightingCollection) -> [usize; 12] {
    let mut months = [0usize; 12];
    for s in records {
        months[s.date.month0() as usize] += 1;
    }
    months
}

/// Individuals reported per day within one region, ascending by date.
pub fn region_series(records: &SightingCollection, region: &str) -> Vec<(NaiveDate, f64)> {
    let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for s in records.iter().filter(|s| s.region == region) {
        *per_day.entry(s.date).or_default() += s.individuals();
    }
    per_day.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SummaryStats {
    pub sightings: usize,
    pub individuals: f64,
    pub towns: usize,
    pub regions: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Sightings carrying both latitude and longitude.
    pub with_coordinates: usize,
}

impl SummaryStats {
    pub fn compute(records: &SightingCollection) -> Self {
        let span = records.date_span();
        SummaryStats {
            sightings: records.len(),
            individuals: records.iter().map(Sighting::individuals).sum(),
            towns: distinct_non_empty(records.iter().map(|s| s.town.as_str())),
            regions: distinct_non_empty(records.iter().map(|s| s.region.as_str())),
            first_date: span.map(|(first, _)| first),
            last_date: span.map(|(_, last)| last),
            with_coordinates: records
                .iter()
                .filter(|s| s.coordinates().is_some())
                .count(),
        }
    }
}

fn distinct_non_empty<'a>(keys: impl Iterator<Item = &'a str>) -> usize {
    keys.filter(|k| !k.is_empty()).collect::<BTreeSet<_>>().len()
}
