//! Presentación de resultados: panel de texto, JSON y reporte CSV por lotes.
//! El núcleo nunca escribe en pantalla; los binarios usan estas funciones.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::ClassificationResult;

/// Panel de resultados de una captura
pub fn render_panel(result: &ClassificationResult, images_dir: &Path) -> String {
    format!(
        "Factor found for the file: {:.2}\n\
         Factor related to the gesture: {:.2}\n\
         Gesture: {}\n\
         Image: {}",
        result.input_factor,
        result.reference_factor,
        result.gesture.display_label(),
        gesture_image_path(result, images_dir).display()
    )
}

pub fn gesture_image_path(result: &ClassificationResult, images_dir: &Path) -> PathBuf {
    images_dir.join(result.gesture.image_name())
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    file: &'a str,
    #[serde(flatten)]
    result: &'a ClassificationResult,
    display_label: String,
}

/// Resultado en una línea JSON
pub fn render_json(file: &Path, result: &ClassificationResult) -> Result<String> {
    let file = file.to_string_lossy();
    let report = JsonReport {
        file: &file,
        result,
        display_label: result.gesture.display_label(),
    };
    Ok(serde_json::to_string(&report)?)
}

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    file: &'a str,
    index: usize,
    label: &'a str,
    input_factor: f64,
    reference_factor: f64,
}

/// Escribe el reporte por lotes: file,index,label,input_factor,reference_factor
pub fn write_batch_report<W: Write>(
    writer: W,
    results: &[(PathBuf, ClassificationResult)],
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (path, result) in results {
        let file = path.to_string_lossy();
        csv_writer.serialize(ReportRow {
            file: &file,
            index: result.index,
            label: result.label,
            input_factor: result.input_factor,
            reference_factor: result.reference_factor,
        })?;
    }
    csv_writer.flush().context("No se pudo escribir el reporte CSV")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Gesture;

    fn sample_result() -> ClassificationResult {
        ClassificationResult {
            index: 3,
            gesture: Gesture::Spread,
            label: "Spread",
            input_factor: 300.0,
            reference_factor: 294.51,
        }
    }

    #[test]
    fn test_panel_lines() {
        let panel = render_panel(&sample_result(), Path::new("images"));
        let lines: Vec<&str> = panel.lines().collect();
        assert_eq!(lines[0], "Factor found for the file: 300.00");
        assert_eq!(lines[1], "Factor related to the gesture: 294.51");
        assert_eq!(lines[2], "Gesture: Spread (Gesture 4)");
        assert_eq!(lines[3], "Image: images/gesture_3.png");
    }

    #[test]
    fn test_json_line() {
        let json = render_json(Path::new("capturas/spread.csv"), &sample_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["file"], "capturas/spread.csv");
        assert_eq!(value["index"], 3);
        assert_eq!(value["gesture"], "spread");
        assert_eq!(value["label"], "Spread");
        assert_eq!(value["display_label"], "Spread (Gesture 4)");
        assert_eq!(value["reference_factor"], 294.51);
    }

    #[test]
    fn test_batch_report() {
        let mut out = Vec::new();
        let results = vec![
            (PathBuf::from("a.csv"), sample_result()),
            (
                PathBuf::from("b.txt"),
                ClassificationResult {
                    index: 0,
                    gesture: Gesture::Pinch,
                    label: "Pinch",
                    input_factor: 90.5,
                    reference_factor: 96.51,
                },
            ),
        ];
        write_batch_report(&mut out, &results).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "file,index,label,input_factor,reference_factor");
        assert_eq!(lines[1], "a.csv,3,Spread,300.0,294.51");
        assert_eq!(lines[2], "b.txt,0,Pinch,90.5,96.51");
    }

    #[test]
    fn test_batch_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reporte.csv");
        let file = std::fs::File::create(&path).unwrap();
        write_batch_report(file, &[(PathBuf::from("a.csv"), sample_result())]).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 2);
    }
}
