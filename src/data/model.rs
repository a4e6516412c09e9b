use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// FieldValue – a pass-through cell from a column the core does not interpret
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, guessed from the source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => Ok(()),
        }
    }
}

impl FieldValue {
    /// Guess the type of a raw text cell: empty → `Null`, then integer,
    /// float, boolean, and finally plain string.
    pub fn guess(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return FieldValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return FieldValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return FieldValue::Float(f);
        }
        if s == "true" || s == "false" {
            return FieldValue::Bool(s == "true");
        }
        FieldValue::String(s.to_string())
    }

    /// Interpret the value as a finite `f64`; `NaN` and infinities count
    /// as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) if v.is_finite() => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Sighting – one row of the source table
// ---------------------------------------------------------------------------

/// A single observed sighting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sighting {
    pub date: NaiveDate,
    /// Free-text location name (`Town` column).
    pub town: String,
    /// State / province identifier (`State/Province` column).
    pub region: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Number of individuals reported (`Count` / `Number` column).
    pub count: Option<f64>,
    /// Every other column, untouched: column_name → value.
    pub extra: BTreeMap<String, FieldValue>,
}

impl Sighting {
    /// Minimal sighting with no coordinates, count or extra columns.
    pub fn new(date: NaiveDate, town: impl Into<String>, region: impl Into<String>) -> Self {
        Sighting {
            date,
            town: town.into(),
            region: region.into(),
            latitude: None,
            longitude: None,
            count: None,
            extra: BTreeMap::new(),
        }
    }

    /// Individuals reported, `1` when the source carries no count.
    ///
    /// A summed `Count` column in a dataframe would treat a missing count as
    /// zero; here a sighting always stands for at least one butterfly.
    pub fn individuals(&self) -> f64 {
        self.count.unwrap_or(1.0)
    }

    /// `(latitude, longitude)` when both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

// ---------------------------------------------------------------------------
// SightingCollection – one loaded source file
// ---------------------------------------------------------------------------

/// All sightings read from one source, in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SightingCollection {
    pub sightings: Vec<Sighting>,
    /// Source column headers in file order.
    pub column_names: Vec<String>,
}

impl SightingCollection {
    pub fn new(sightings: Vec<Sighting>, column_names: Vec<String>) -> Self {
        SightingCollection {
            sightings,
            column_names,
        }
    }

    /// Number of sightings.
    pub fn len(&self) -> usize {
        self.sightings.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.sightings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sighting> {
        self.sightings.iter()
    }

    /// Earliest and latest sighting dates, `None` when empty.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.sightings.iter().map(|s| s.date).min()?;
        let last = self.sightings.iter().map(|s| s.date).max()?;
        Some((first, last))
    }

    /// Sorted set of distinct regions.
    pub fn regions(&self) -> BTreeSet<String> {
        self.sightings.iter().map(|s| s.region.clone()).collect()
    }

    /// Derive a new collection holding `sightings` with the same columns.
    pub fn with_sightings(&self, sightings: Vec<Sighting>) -> Self {
        SightingCollection {
            sightings,
            column_names: self.column_names.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a SightingCollection {
    type Item = &'a Sighting;
    type IntoIter = std::slice::Iter<'a, Sighting>;

    fn into_iter(self) -> Self::IntoIter {
        self.sightings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn guess_field_types() {
        assert_eq!(FieldValue::guess(""), FieldValue::Null);
        assert_eq!(FieldValue::guess(" 12 "), FieldValue::Integer(12));
        assert_eq!(FieldValue::guess("1.5"), FieldValue::Float(1.5));
        assert_eq!(FieldValue::guess("true"), FieldValue::Bool(true));
        assert_eq!(
            FieldValue::guess("adult"),
            FieldValue::String("adult".to_string())
        );
    }

    #[test]
    fn non_finite_numbers_are_not_numeric() {
        for raw in ["NaN", "nan", "inf", "-inf", "infinity"] {
            assert_eq!(FieldValue::guess(raw).as_f64(), None, "{raw}");
        }
        assert_eq!(FieldValue::guess("-97.74").as_f64(), Some(-97.74));
        assert_eq!(FieldValue::Integer(3).as_f64(), Some(3.0));
    }

    #[test]
    fn date_span_and_regions() {
        let c = SightingCollection::new(
            vec![
                Sighting::new(day(2023, 3, 1), "Reno", "NV"),
                Sighting::new(day(2023, 1, 1), "Austin", "TX"),
                Sighting::new(day(2023, 2, 1), "Houston", "TX"),
            ],
            vec!["Date".into(), "Town".into(), "State/Province".into()],
        );
        assert_eq!(c.date_span(), Some((day(2023, 1, 1), day(2023, 3, 1))));
        assert_eq!(
            c.regions().into_iter().collect::<Vec<_>>(),
            vec!["NV".to_string(), "TX".to_string()]
        );
        assert_eq!(SightingCollection::default().date_span(), None);
    }

    #[test]
    fn individuals_defaults_to_one() {
        let mut s = Sighting::new(day(2023, 1, 1), "Austin", "TX");
        assert_eq!(s.individuals(), 1.0);
        s.count = Some(14.0);
        assert_eq!(s.individuals(), 14.0);
        assert_eq!(s.coordinates(), None);
        s.latitude = Some(30.2);
        s.longitude = Some(-97.7);
        assert_eq!(s.coordinates(), Some((30.2, -97.7)));
    }
}
