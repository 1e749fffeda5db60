use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use tracing_subscriber::EnvFilter;

use gesture_factor::csv_loader::load_matrix_from_file;
use gesture_factor::feature_extractor::{calc_factor, reduce_rows};
use gesture_factor::gesture_classifier::GestureClassifier;

struct ReplayOptions {
    dump_matrix: bool,
    dump_rows: bool,
}

fn parse_args() -> Result<(PathBuf, ReplayOptions)> {
    let mut dump_matrix = false;
    let mut dump_rows = false;
    let mut csv_path: Option<PathBuf> = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--dump-matrix" => dump_matrix = true,
            "--dump-rows" => dump_rows = true,
            _ => {
                if csv_path.is_some() {
                    bail!("Uso: replay_csv [--dump-matrix] [--dump-rows] <archivo.csv>");
                }
                csv_path = Some(PathBuf::from(arg));
            }
        }
    }

    let csv_path = csv_path.ok_or_else(|| anyhow!("Debes especificar un archivo CSV"))?;
    Ok((
        csv_path,
        ReplayOptions {
            dump_matrix,
            dump_rows,
        },
    ))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let (csv_path, opts) = parse_args()?;
    println!("🎞️  Reproduciendo captura desde {:?}", csv_path);

    let matrix = load_matrix_from_file(&csv_path)?;
    let means = reduce_rows(&matrix);
    let factor = calc_factor(&means);

    let classifier = GestureClassifier::default();
    let result = classifier.classify_factor(factor);

    println!(
        "\n🥇 Gesto: {} (factor {:.2}, referencia {:.2}, distancia {:.2})",
        result.gesture.display_label(),
        result.input_factor,
        result.reference_factor,
        result.distance()
    );

    println!("\nDistancia a cada referencia:");
    for (gesture, distance) in classifier.distances(factor) {
        let marker = if gesture == result.gesture { "◀" } else { "" };
        println!(
            "  {}. {:<14} {:>10.2} {}",
            gesture.index(),
            gesture.as_str(),
            distance,
            marker
        );
    }

    if opts.dump_rows {
        println!("\n📊 Media recortada por fila:");
        for (idx, mean) in means.iter().enumerate() {
            println!("  {:02}: {:>12.4}", idx, mean);
        }
    }

    if opts.dump_matrix {
        println!("\n🧱 Matriz leída:");
        for (idx, row) in matrix.rows().iter().enumerate() {
            let values: Vec<String> = row.iter().map(|v| format!("{:>6}", v)).collect();
            println!("  {:02}: {}", idx, values.join(" "));
        }
    }

    Ok(())
}
