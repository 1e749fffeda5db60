use serde::{Deserialize, Serialize};

/// Constantes del sistema
pub const TD_SAMPLES: usize = 50; // muestras en el dominio del tiempo (filas)
pub const CHANNELS: usize = 8; // canales por muestra (columnas)
pub const TRIMMED_CHANNELS: usize = CHANNELS - 2; // sin el mayor ni el menor
pub const FACTOR_DECIMALS: i32 = 2;
pub const NUM_GESTURES: usize = 6;

/// Una muestra: lectura simultánea de los 8 canales
pub type SampleRow = [i64; CHANNELS];

/// Media recortada de cada fila, en orden temporal
pub type RowMeans = [f64; TD_SAMPLES];

/// Captura completa de un gesto: 50 filas x 8 canales.
/// Inmutable una vez construida.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleMatrix {
    rows: [SampleRow; TD_SAMPLES],
}

impl SampleMatrix {
    pub fn from_rows(rows: [SampleRow; TD_SAMPLES]) -> Self {
        Self { rows }
    }

    /// Matriz con todas las lecturas iguales a `value`
    pub fn filled(value: i64) -> Self {
        Self {
            rows: [[value; CHANNELS]; TD_SAMPLES],
        }
    }

    pub fn rows(&self) -> &[SampleRow; TD_SAMPLES] {
        &self.rows
    }
}

/// Gestos conocidos. El orden de las variantes es el índice de visualización (0-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Pinch,
    RotateLeft,
    RotateRight,
    Spread,
    SwipeLeft,
    SwipeRight,
}

impl Gesture {
    pub const ALL: [Gesture; NUM_GESTURES] = [
        Gesture::Pinch,
        Gesture::RotateLeft,
        Gesture::RotateRight,
        Gesture::Spread,
        Gesture::SwipeLeft,
        Gesture::SwipeRight,
    ];

    pub fn index(&self) -> usize {
        match self {
            Gesture::Pinch => 0,
            Gesture::RotateLeft => 1,
            Gesture::RotateRight => 2,
            Gesture::Spread => 3,
            Gesture::SwipeLeft => 4,
            Gesture::SwipeRight => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::Pinch => "Pinch",
            Gesture::RotateLeft => "Rotate Left",
            Gesture::RotateRight => "Rotate Right",
            Gesture::Spread => "Spread",
            Gesture::SwipeLeft => "Swipe Left",
            Gesture::SwipeRight => "Swipe Right",
        }
    }

    /// Etiqueta del panel de resultados, p.ej. "Pinch (Gesture 1)"
    pub fn display_label(&self) -> String {
        format!("{} (Gesture {})", self.as_str(), self.index() + 1)
    }

    /// Nombre de la imagen asociada: gesture_<índice>.png
    pub fn image_name(&self) -> String {
        format!("gesture_{}.png", self.index())
    }
}

/// Resultado de una clasificación
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub index: usize,
    pub gesture: Gesture,
    pub label: &'static str,
    /// Factor calculado para la captura (2 decimales)
    pub input_factor: f64,
    /// Factor de referencia del gesto ganador
    pub reference_factor: f64,
}

impl ClassificationResult {
    pub fn distance(&self) -> f64 {
        (self.reference_factor - self.input_factor).abs()
    }
}
