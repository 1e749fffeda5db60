use tracing::debug;

use crate::types::{
    RowMeans, SampleMatrix, SampleRow, FACTOR_DECIMALS, TD_SAMPLES, TRIMMED_CHANNELS,
};

/// Media recortada de una fila: suma de los 8 canales menos el mayor y el menor,
/// dividida entre 6.
///
/// El mayor y el menor arrancan en el primer valor. En cada paso sólo se
/// revisa el menor si el valor no superó al mayor.
pub fn row_trimmed_mean(row: &SampleRow) -> f64 {
    let first = row[0];
    let mut higher = first;
    let mut lower = first;
    let mut sum = i128::from(first);

    for &value in &row[1..] {
        sum += i128::from(value);
        if value > higher {
            higher = value;
        } else if value < lower {
            lower = value;
        }
    }

    (sum - i128::from(higher) - i128::from(lower)) as f64 / TRIMMED_CHANNELS as f64
}

/// Reduce cada fila a su media recortada, conservando el orden temporal
pub fn reduce_rows(matrix: &SampleMatrix) -> RowMeans {
    let mut means = [0.0; TD_SAMPLES];
    for (mean, row) in means.iter_mut().zip(matrix.rows().iter()) {
        *mean = row_trimmed_mean(row);
    }
    means
}

/// Factor de la captura: media de las 50 medias, redondeada a 2 decimales
pub fn calc_factor(means: &RowMeans) -> f64 {
    let total: f64 = means.iter().sum();
    let factor = round_to_decimals(total / TD_SAMPLES as f64, FACTOR_DECIMALS);
    debug!(factor, "factor calculado");
    factor
}

/// Redondea a `decimals` decimales; los empates se alejan de cero
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Atajo: matriz -> factor
pub fn extract_factor(matrix: &SampleMatrix) -> f64 {
    calc_factor(&reduce_rows(matrix))
}
