use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, Duration, NaiveDate};
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Town {
    name: &'static str,
    region: &'static str,
    lat: f64,
    lon: f64,
    /// Day of year around which sightings peak.
    peak_day: f64,
}

const TOWNS: &[Town] = &[
    Town { name: "Austin", region: "TX", lat: 30.27, lon: -97.74, peak_day: 105.0 },
    Town { name: "Houston", region: "TX", lat: 29.76, lon: -95.37, peak_day: 100.0 },
    Town { name: "San Antonio", region: "TX", lat: 29.42, lon: -98.49, peak_day: 290.0 },
    Town { name: "Oklahoma City", region: "OK", lat: 35.47, lon: -97.52, peak_day: 125.0 },
    Town { name: "Kansas City", region: "MO", lat: 39.10, lon: -94.58, peak_day: 150.0 },
    Town { name: "Des Moines", region: "IA", lat: 41.59, lon: -93.62, peak_day: 170.0 },
    Town { name: "Minneapolis", region: "MN", lat: 44.98, lon: -93.27, peak_day: 190.0 },
    Town { name: "Madison", region: "WI", lat: 43.07, lon: -89.40, peak_day: 195.0 },
    Town { name: "Chicago", region: "IL", lat: 41.88, lon: -87.63, peak_day: 185.0 },
    Town { name: "Detroit", region: "MI", lat: 42.33, lon: -83.05, peak_day: 200.0 },
    Town { name: "Toronto", region: "ON", lat: 43.65, lon: -79.38, peak_day: 210.0 },
    Town { name: "Montreal", region: "QC", lat: 45.50, lon: -73.57, peak_day: 215.0 },
    Town { name: "Cape May", region: "NJ", lat: 38.94, lon: -74.91, peak_day: 265.0 },
];

const STAGES: &[&str] = &["adult", "egg", "larva"];

struct Row {
    date: NaiveDate,
    town: &'static Town,
    count: i64,
    stage: &'static str,
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for year in 2017..=2024 {
        let jan1 = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default();
        for town in TOWNS {
            let n = 20 + rng.below(40);
            for _ in 0..n {
                let day = rng.gauss(town.peak_day, 25.0).clamp(0.0, 364.0) as i64;
                let date = jan1 + Duration::days(day);
                if date.year() != year {
                    continue;
                }
                rows.push(Row {
                    date,
                    town,
                    count: 1 + (rng.next_f64().powi(3) * 40.0) as i64,
                    stage: STAGES[rng.below(STAGES.len())],
                });
            }
        }
    }
    rows.sort_by_key(|r| r.date);
    rows
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "Date",
        "Town",
        "State/Province",
        "Latitude",
        "Longitude",
        "Count",
        "Stage",
    ])?;
    for r in rows {
        writer.write_record([
            r.date.format("%Y-%m-%d").to_string(),
            r.town.name.to_string(),
            r.town.region.to_string(),
            format!("{:.4}", r.town.lat),
            format!("{:.4}", r.town.lon),
            r.count.to_string(),
            r.stage.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();

    let schema = Arc::new(Schema::new(vec![
        Field::new("Date", DataType::Date32, false),
        Field::new("Town", DataType::Utf8, false),
        Field::new("State/Province", DataType::Utf8, false),
        Field::new("Latitude", DataType::Float64, true),
        Field::new("Longitude", DataType::Float64, true),
        Field::new("Count", DataType::Int64, false),
        Field::new("Stage", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Date32Array::from(
                rows.iter()
                    .map(|r| (r.date - epoch).num_days() as i32)
                    .collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.town.name).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.town.region).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.town.lat).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.town.lon).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                rows.iter().map(|r| r.count).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.stage).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    write_csv(&rows, "sample_sightings.csv")?;
    write_parquet(&rows, "sample_sightings.parquet")?;

    log::debug!("Generated {} rows", rows.len());
    println!(
        "Wrote {} sightings across {} towns to sample_sightings.csv and sample_sightings.parquet",
        rows.len(),
        TOWNS.len()
    );
    Ok(())
}
