//! Clasificación de gestos a partir de capturas 50x8.
//!
//! Flujo: texto CSV -> matriz 50x8 -> media recortada por fila -> factor ->
//! gesto de referencia más cercano.

pub mod csv_loader;
pub mod feature_extractor;
pub mod gesture_classifier;
pub mod report;
pub mod types;

pub use csv_loader::{parse_sample_matrix, MalformedInput};
pub use gesture_classifier::{GestureClassifier, ReferenceTable};
pub use types::{ClassificationResult, Gesture, SampleMatrix};

/// Clasifica una matriz con la tabla de referencia incorporada
pub fn classify(matrix: &SampleMatrix) -> ClassificationResult {
    GestureClassifier::default().classify(matrix)
}

/// Parsea y clasifica el contenido de un CSV con la tabla incorporada
pub fn classify_from_text(text: &str) -> Result<ClassificationResult, MalformedInput> {
    GestureClassifier::default().classify_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CHANNELS, NUM_GESTURES, TD_SAMPLES};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn matrix_strategy() -> impl Strategy<Value = SampleMatrix> {
        prop::collection::vec(prop::array::uniform8(-1_000i64..1_000), TD_SAMPLES).prop_map(
            |rows| {
                let mut fixed = [[0; CHANNELS]; TD_SAMPLES];
                fixed.copy_from_slice(&rows);
                SampleMatrix::from_rows(fixed)
            },
        )
    }

    #[test]
    fn test_classify_from_text_end_to_end() {
        // filas alternando 250 y 260 en todos los canales -> factor 255
        let text: String = (0..TD_SAMPLES)
            .map(|i| {
                let value = if i % 2 == 0 { 250 } else { 260 };
                vec![value.to_string(); CHANNELS].join(",")
            })
            .collect::<Vec<_>>()
            .join("\n");

        let result = classify_from_text(&text).unwrap();
        assert_eq!(result.gesture, Gesture::SwipeLeft);
        assert_eq!(result.index, 4);
        assert_relative_eq!(result.input_factor, 255.0);
        assert_relative_eq!(result.reference_factor, 255.55);
    }

    #[test]
    fn test_classify_from_text_rejects_non_numeric() {
        let mut lines = vec!["1,2,3,4,5,6,7,8"; TD_SAMPLES];
        lines[0] = "abc,2,3,4,5,6,7,8";
        assert!(matches!(
            classify_from_text(&lines.join("\n")),
            Err(MalformedInput::NotAnInteger { line: 1, field: 1, .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_result_points_into_reference_table(matrix in matrix_strategy()) {
            let table = ReferenceTable::default();
            let result = classify(&matrix);
            prop_assert!(result.index < NUM_GESTURES);
            prop_assert_eq!(result.reference_factor, table.entries()[result.index].factor);
            prop_assert_eq!(result.gesture.index(), result.index);
        }

        #[test]
        fn prop_classify_is_deterministic(matrix in matrix_strategy()) {
            prop_assert_eq!(classify(&matrix), classify(&matrix));
        }

        #[test]
        fn prop_uniform_matrix_factor(value in -10_000i64..10_000) {
            let result = classify(&SampleMatrix::filled(value));
            prop_assert_eq!(result.input_factor, value as f64);
        }
    }
}
