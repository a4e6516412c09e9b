//! Load → filter → rank → chart, driven through the public API.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use monarch_dash::chart::{sightings_over_time, top_towns_bar, XValues};
use monarch_dash::{filter_sightings, load_csv_reader, top_towns, FilterState, LoadError};

const SIGHTINGS: &str = "\
Date,Town,State/Province,Latitude,Longitude,Count
2023-01-01,Austin,TX,30.27,-97.74,2
2023-01-01,Austin,TX,30.27,-97.74,1
2023-02-01,Houston,TX,29.76,-95.37,5
2023-03-01,Reno,NV,39.53,-119.81,1
";

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn end_to_end_example() {
    let records = load_csv_reader(SIGHTINGS.as_bytes()).unwrap();
    assert_eq!(records.len(), 4);

    let texas: BTreeSet<String> = ["TX".to_string()].into_iter().collect();
    let filtered = filter_sightings(&records, day(2023, 1, 1), day(2023, 2, 28), &texas);
    assert_eq!(filtered.sightings, records.sightings[..3].to_vec());

    let top = top_towns(&filtered, 1);
    assert_eq!(top, vec![("Austin".to_string(), 2)]);

    let bar = top_towns_bar(&top);
    assert_eq!(bar.series[0].x, XValues::Categories(vec!["Austin".to_string()]));
    assert_eq!(bar.series[0].y, vec![2.0]);

    let line = sightings_over_time(&filtered);
    assert_eq!(
        line.series[0].x,
        XValues::Dates(vec![day(2023, 1, 1), day(2023, 2, 1)])
    );
    assert_eq!(line.series[0].y, vec![2.0, 1.0]);
}

#[test]
fn default_filter_keeps_everything() {
    let records = load_csv_reader(SIGHTINGS.as_bytes()).unwrap();
    let filters = FilterState::for_collection(&records).unwrap();
    assert_eq!(filters.apply(&records), records);
}

#[test]
fn empty_results_are_not_errors() {
    let records = load_csv_reader(SIGHTINGS.as_bytes()).unwrap();
    let none = filter_sightings(&records, day(2023, 1, 1), day(2023, 12, 31), &BTreeSet::new());
    assert!(none.is_empty());
    assert!(top_towns(&none, 10).is_empty());
    assert!(sightings_over_time(&none).is_empty());
}

#[test]
fn one_bad_date_rejects_the_source() {
    let csv = format!("{SIGHTINGS}13/45/2023,Austin,TX,,,\n");
    let err = load_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::DateFormat { row: 5, .. }));
    assert_eq!(err.to_string(), "row 5: cannot parse date '13/45/2023'");
}

#[test]
fn blank_towns_are_not_ranked() {
    let csv = "Date,Town,State/Province\n2023-01-01,,TX\n2023-01-02,,TX\n2023-01-03,Austin,TX\n";
    let records = load_csv_reader(csv.as_bytes()).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(top_towns(&records, 10), vec![("Austin".to_string(), 1)]);
}
