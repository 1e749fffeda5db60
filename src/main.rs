/*
Clasificador de gestos por factor - capturas 50x8

Recibe uno o varios archivos CSV/TXT (o carpetas con ellos), calcula el
factor de cada captura y muestra el gesto de referencia más cercano.

Uso:
    gesture-factor capturas/pinch_01.csv
    gesture-factor capturas/ --report reporte.csv
    gesture-factor capturas/ --json --references referencias.json

Para más detalle:
    RUST_LOG=debug gesture-factor capturas/pinch_01.csv
*/

use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gesture_factor::csv_loader::{collect_sample_files, load_matrix_from_file};
use gesture_factor::gesture_classifier::{GestureClassifier, ReferenceTable};
use gesture_factor::report::{render_json, render_panel, write_batch_report};
use gesture_factor::types::ClassificationResult;

#[derive(Parser, Debug)]
#[command(name = "gesture-factor", version, about = "Clasifica capturas de gestos 50x8")]
struct Cli {
    /// Archivos .csv/.txt o carpetas que los contienen
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Tabla de factores de referencia en JSON (por defecto la incorporada)
    #[arg(long)]
    references: Option<PathBuf>,

    /// Una línea JSON por archivo en lugar del panel de texto
    #[arg(long)]
    json: bool,

    /// Escribe un reporte CSV con todos los resultados
    #[arg(long)]
    report: Option<PathBuf>,

    /// Carpeta de las imágenes gesture_<n>.png
    #[arg(long, default_value = "images")]
    images_dir: PathBuf,
}

fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = collect_sample_files(path)?;
            if found.is_empty() {
                warn!("No hay archivos CSV/TXT en {}", path.display());
            }
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let table = match &cli.references {
        Some(path) => {
            let table = ReferenceTable::from_json_file(path)
                .with_context(|| format!("No se pudo cargar la tabla {:?}", path))?;
            info!("Tabla de referencia cargada desde {}", path.display());
            table
        }
        None => ReferenceTable::default(),
    };
    let classifier = GestureClassifier::new(table);

    let files = expand_paths(&cli.paths)?;
    if files.is_empty() {
        bail!("No hay capturas que clasificar");
    }

    let mut results: Vec<(PathBuf, ClassificationResult)> = Vec::with_capacity(files.len());
    let mut failures = 0usize;

    for path in files {
        let matrix = match load_matrix_from_file(&path) {
            Ok(matrix) => matrix,
            Err(e) => {
                eprintln!("❌ {:#}", e);
                failures += 1;
                continue;
            }
        };

        let result = classifier.classify(&matrix);
        if cli.json {
            println!("{}", render_json(&path, &result)?);
        } else {
            println!("\n📄 Archivo: {}", path.display());
            println!("{}", render_panel(&result, &cli.images_dir));
        }
        results.push((path, result));
    }

    if let Some(report_path) = &cli.report {
        let file = File::create(report_path)
            .with_context(|| format!("No se pudo crear {:?}", report_path))?;
        write_batch_report(file, &results)?;
        info!(
            "Reporte con {} resultados escrito en {}",
            results.len(),
            report_path.display()
        );
    }

    if failures > 0 {
        bail!("{} archivo(s) no se pudieron clasificar", failures);
    }
    Ok(())
}
