use crate::csv_loader::{parse_sample_matrix, MalformedInput};
use crate::feature_extractor::extract_factor;
use crate::types::{ClassificationResult, Gesture, SampleMatrix, NUM_GESTURES};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Factores de referencia calculados offline, uno por gesto, en orden de índice.
pub const KNOWN_GESTURE_FACTORS: [ReferenceEntry; NUM_GESTURES] = [
    ReferenceEntry::new(Gesture::Pinch, 96.51),
    ReferenceEntry::new(Gesture::RotateLeft, 420.26),
    ReferenceEntry::new(Gesture::RotateRight, 316.61),
    ReferenceEntry::new(Gesture::Spread, 294.51),
    ReferenceEntry::new(Gesture::SwipeLeft, 255.55),
    ReferenceEntry::new(Gesture::SwipeRight, 219.36),
];

#[derive(Error, Debug)]
pub enum ReferenceTableError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing reference factor for {0:?}")]
    MissingGesture(Gesture),

    #[error("Duplicated reference factor for {0:?}")]
    DuplicateGesture(Gesture),

    #[error("Invalid reference factor for {gesture:?}: {factor}")]
    InvalidFactor { gesture: Gesture, factor: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ReferenceEntry {
    pub gesture: Gesture,
    pub factor: f64,
}

impl ReferenceEntry {
    pub const fn new(gesture: Gesture, factor: f64) -> Self {
        Self { gesture, factor }
    }
}

#[derive(Debug, Deserialize)]
struct ReferenceJson {
    gestures: Vec<ReferenceEntry>,
}

/// Tabla de referencia: una entrada por gesto, siempre en orden de índice.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    entries: [ReferenceEntry; NUM_GESTURES],
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self {
            entries: KNOWN_GESTURE_FACTORS,
        }
    }
}

impl ReferenceTable {
    /// Construye una tabla validando que estén los 6 gestos una sola vez
    /// y con factores finitos. El orden de entrada no importa.
    pub fn from_entries(entries: &[ReferenceEntry]) -> Result<Self, ReferenceTableError> {
        let mut slots: [Option<f64>; NUM_GESTURES] = [None; NUM_GESTURES];

        for entry in entries {
            if !entry.factor.is_finite() {
                return Err(ReferenceTableError::InvalidFactor {
                    gesture: entry.gesture,
                    factor: entry.factor,
                });
            }
            let slot = &mut slots[entry.gesture.index()];
            if slot.is_some() {
                return Err(ReferenceTableError::DuplicateGesture(entry.gesture));
            }
            *slot = Some(entry.factor);
        }

        let mut table = KNOWN_GESTURE_FACTORS;
        for (entry, slot) in table.iter_mut().zip(slots) {
            entry.factor = slot.ok_or(ReferenceTableError::MissingGesture(entry.gesture))?;
        }

        Ok(Self { entries: table })
    }

    /// Carga la tabla desde un JSON `{"gestures": [{"gesture": "pinch", "factor": 96.51}, ...]}`
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ReferenceTableError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ReferenceTableError> {
        let data: ReferenceJson = serde_json::from_str(content)?;
        Self::from_entries(&data.gestures)
    }

    pub fn entries(&self) -> &[ReferenceEntry; NUM_GESTURES] {
        &self.entries
    }

    /// Entrada más cercana a `factor`. En caso de empate gana la de menor índice:
    /// sólo se reemplaza el mejor actual si la diferencia es estrictamente menor.
    pub fn nearest(&self, factor: f64) -> (usize, &ReferenceEntry) {
        let mut best_idx = 0;
        let mut best_diff = (self.entries[0].factor - factor).abs();

        for (idx, entry) in self.entries.iter().enumerate().skip(1) {
            let diff = (entry.factor - factor).abs();
            if diff < best_diff {
                best_diff = diff;
                best_idx = idx;
            }
        }

        (best_idx, &self.entries[best_idx])
    }
}

/// Clasificador por vecino más cercano sobre el factor de la captura
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    table: ReferenceTable,
}

impl GestureClassifier {
    pub fn new(table: ReferenceTable) -> Self {
        Self { table }
    }

    /// Clasifica un factor ya calculado
    pub fn classify_factor(&self, factor: f64) -> ClassificationResult {
        let (index, entry) = self.table.nearest(factor);
        debug!(
            factor,
            index,
            reference = entry.factor,
            "gesto más cercano: {}",
            entry.gesture.as_str()
        );

        ClassificationResult {
            index,
            gesture: entry.gesture,
            label: entry.gesture.as_str(),
            input_factor: factor,
            reference_factor: entry.factor,
        }
    }

    /// Clasifica una matriz 50x8
    pub fn classify(&self, matrix: &SampleMatrix) -> ClassificationResult {
        self.classify_factor(extract_factor(matrix))
    }

    /// Parsea y clasifica el contenido de un CSV
    pub fn classify_text(&self, text: &str) -> Result<ClassificationResult, MalformedInput> {
        let matrix = parse_sample_matrix(text)?;
        Ok(self.classify(&matrix))
    }

    /// Distancia del factor a cada referencia, en orden de índice
    pub fn distances(&self, factor: f64) -> Vec<(Gesture, f64)> {
        self.table
            .entries()
            .iter()
            .map(|entry| (entry.gesture, (entry.factor - factor).abs()))
            .collect()
    }
}
