use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{SampleMatrix, SampleRow, CHANNELS, TD_SAMPLES};

/// Extensiones aceptadas para los archivos de captura
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["csv", "txt"];

const DELIMITER: char = ',';
const UTF8_BOM: char = '\u{feff}';

/// Única clase de error del núcleo: la entrada no describe una matriz 50x8.
/// Líneas y campos se numeran desde 1.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedInput {
    #[error("se esperaban al menos {expected} líneas, se encontraron {found}")]
    TooFewLines { expected: usize, found: usize },

    #[error("la línea {line} tiene {found} campos, se esperaban al menos {expected}")]
    TooFewFields {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("campo {field} de la línea {line} no es un entero: {value:?}")]
    NotAnInteger {
        line: usize,
        field: usize,
        value: String,
    },
}

/// Convierte el contenido de un CSV en una matriz 50x8.
///
/// Las líneas se separan en `\n` o `\r\n`; sólo se consideran las primeras 50
/// líneas y los primeros 8 campos de cada una. Campos extra se ignoran.
pub fn parse_sample_matrix(text: &str) -> Result<SampleMatrix, MalformedInput> {
    // Sólo interesan las primeras 50 líneas; el resto no se recorre
    let lines: Vec<&str> = text
        .split('\n')
        .take(TD_SAMPLES)
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    if lines.len() < TD_SAMPLES {
        return Err(MalformedInput::TooFewLines {
            expected: TD_SAMPLES,
            found: lines.len(),
        });
    }

    let mut rows: [SampleRow; TD_SAMPLES] = [[0; CHANNELS]; TD_SAMPLES];
    for (row_idx, line) in lines.iter().enumerate() {
        rows[row_idx] = parse_row(line, row_idx + 1)?;
    }

    debug!("matriz {}x{} leída", TD_SAMPLES, CHANNELS);
    Ok(SampleMatrix::from_rows(rows))
}

fn parse_row(line: &str, line_no: usize) -> Result<SampleRow, MalformedInput> {
    let fields: Vec<&str> = line.split(DELIMITER).take(CHANNELS).collect();
    if fields.len() < CHANNELS {
        return Err(MalformedInput::TooFewFields {
            line: line_no,
            expected: CHANNELS,
            found: fields.len(),
        });
    }

    let mut row: SampleRow = [0; CHANNELS];
    for (col, raw) in fields.iter().enumerate() {
        row[col] = raw
            .trim_matches(|c: char| c.is_ascii_whitespace())
            .parse::<i64>()
            .map_err(|_| MalformedInput::NotAnInteger {
                line: line_no,
                field: col + 1,
                value: raw.to_string(),
            })?;
    }
    Ok(row)
}

/// Comprueba la extensión (.csv / .txt, sin distinguir mayúsculas)
pub fn has_accepted_extension(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

/// Carga y valida una captura desde disco. Un BOM UTF-8 inicial se descarta.
pub fn load_matrix_from_file(path: impl AsRef<Path>) -> Result<SampleMatrix> {
    let path = path.as_ref();
    if !has_accepted_extension(path) {
        bail!(
            "El archivo {:?} tiene un formato incorrecto, use un archivo csv o txt",
            path
        );
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("No se pudo leer {:?}", path))?;
    let text = content.strip_prefix(UTF8_BOM).unwrap_or(&content);
    let matrix = parse_sample_matrix(text)
        .with_context(|| format!("Captura inválida en {:?}", path))?;
    Ok(matrix)
}

/// Lista los archivos .csv/.txt de una carpeta, ordenados por nombre.
pub fn collect_sample_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("No se pudo abrir la carpeta {:?}", dir))?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                warn!("Entrada ilegible en {:?}: {}", dir, e);
                None
            }
        })
        .filter(|path| path.is_file() && has_accepted_extension(path))
        .collect();

    files.sort();
    debug!(count = files.len(), "archivos de captura en {:?}", dir);
    Ok(files)
}
