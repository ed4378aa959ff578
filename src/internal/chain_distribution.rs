#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::pedantic)]

use chainmap::{HashTable, KeyHasher, PositionWeighted, SumOfCodepoints};
use plotters::prelude::*;
use rand::Rng;

// Number of random keys inserted per run
const KEY_COUNT: usize = 2_000;
// Shortest and longest generated key
const MIN_KEY_LEN: usize = 3;
const MAX_KEY_LEN: usize = 12;
// Bucket counts to compare; primes and powers of two on purpose
const CAPACITIES: [usize; 8] = [31, 64, 127, 256, 509, 1024, 2039, 4096];

const METHODS: [&str; 2] = ["Sum of Codepoints", "Position Weighted"];

struct RunStats {
    load_factor: f64,
    empty_ratio: f64,
    longest_chain: usize,
}

fn random_key(rng: &mut impl Rng) -> String {
    let len = rng.random_range(MIN_KEY_LEN..=MAX_KEY_LEN);
    (0..len).map(|_| char::from(b'a' + rng.random_range(0..26_u8))).collect()
}

fn measure<H: KeyHasher>(
    keys: &[String],
    capacity: usize,
    hasher: H,
) -> Result<RunStats, Box<dyn std::error::Error>> {
    let mut table = HashTable::new(capacity, hasher)?;
    for (i, key) in keys.iter().enumerate() {
        table.put(key.as_str(), i);
    }

    Ok(RunStats {
        load_factor: table.load_factor(),
        empty_ratio: table.empty_bucket_count() as f64 / table.capacity() as f64,
        longest_chain: table.longest_chain(),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::rng();
    let keys: Vec<String> = (0..KEY_COUNT).map(|_| random_key(&mut rng)).collect();

    let mut empty_ratios: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];
    let mut longest_chains: Vec<Vec<usize>> = vec![Vec::new(); METHODS.len()];

    for &capacity in &CAPACITIES {
        println!("Testing with {capacity} buckets");

        let runs = [
            measure(&keys, capacity, SumOfCodepoints)?,
            measure(&keys, capacity, PositionWeighted)?,
        ];

        for (method_idx, stats) in runs.iter().enumerate() {
            empty_ratios[method_idx].push(stats.empty_ratio);
            longest_chains[method_idx].push(stats.longest_chain);

            println!(
                "  {}: load = {:.2}, empty buckets = {:.1}%, longest chain = {}",
                METHODS[method_idx],
                stats.load_factor,
                stats.empty_ratio * 100.0,
                stats.longest_chain
            );
        }
    }

    let font_family = "sans-serif";
    let colors = [RGBColor(220, 50, 50), RGBColor(50, 90, 220)];
    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 35;

    let x_labels: Vec<String> = CAPACITIES.iter().map(|c| c.to_string()).collect();
    let last_idx = CAPACITIES.len() - 1;

    // Plot 1: share of empty buckets
    let root = BitMapBackend::new("empty_buckets.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Empty Buckets per Hash Function", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..last_idx, 0.0..1.0)?;

    chart
        .configure_mesh()
        .x_labels(CAPACITIES.len())
        .x_label_formatter(&|x| x_labels.get(*x).cloned().unwrap_or_default())
        .x_desc("Bucket Count")
        .y_desc("Empty Bucket Ratio")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                (0..=last_idx).map(|i| (i, empty_ratios[method_idx][i])),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            (0..=last_idx)
                .map(|i| Circle::new((i, empty_ratios[method_idx][i]), marker_size, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // Plot 2: longest chain
    let root = BitMapBackend::new("longest_chain.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_chain = longest_chains.iter().flatten().copied().max().unwrap_or(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Longest Chain per Hash Function", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..last_idx, 0.0..max_chain)?;

    chart
        .configure_mesh()
        .x_labels(CAPACITIES.len())
        .x_label_formatter(&|x| x_labels.get(*x).cloned().unwrap_or_default())
        .x_desc("Bucket Count")
        .y_desc("Longest Chain (entries)")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                (0..=last_idx).map(|i| (i, longest_chains[method_idx][i] as f64)),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    println!("Generated plot images: empty_buckets.png, longest_chain.png");

    Ok(())
}
