//! Embeds a small path metric and prints the coordinates and distortion.
//!
//! Run with `RUST_LOG=info cargo run --example path_metric`.

use bourgain_embed::{DistanceMatrix, DistortionReport, EmbedderBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let n = 8;
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs()).collect())
        .collect();
    let metric = DistanceMatrix::new(rows)?;

    let mut embedder = EmbedderBuilder::new().with_seed(2022).build(metric.clone())?;
    println!("{}", embedder.sample_partition(metric.diameter() / 2.0)?);

    let embedding = embedder.fit(32, 2.0)?;
    for j in 0..n {
        let column = embedding.column(j)?;
        let preview: Vec<String> = column.iter().take(6).map(|v| format!("{:.3}", v)).collect();
        println!("point {}: [{} ...]", j, preview.join(", "));
    }

    let report = DistortionReport::evaluate(&metric, &embedding)?;
    println!(
        "pairs={} collapsed={} expansion={:.3} contraction={:.3} distortion={:.3}",
        report.pairs, report.collapsed_pairs, report.expansion, report.contraction, report.distortion
    );
    Ok(())
}
