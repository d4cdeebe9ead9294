//! Fixed layout of the apple quality dataset.

/// Numeric feature columns, in declaration order.
pub const NUMERIC_FEATURES: [&str; 7] = [
    "Size",
    "Weight",
    "Sweetness",
    "Crunchiness",
    "Juiciness",
    "Ripeness",
    "Acidity",
];

/// The categorical quality label (good/bad).
pub const LABEL_COLUMN: &str = "Quality";

/// Feature pairs drawn as scatter plots, `(x, y)`.
pub const FEATURE_PAIRS: [(&str, &str); 3] = [
    ("Sweetness", "Juiciness"),
    ("Ripeness", "Acidity"),
    ("Size", "Weight"),
];

/// Cell contents read as missing values, on top of empty fields.
pub const NULL_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Every column the loader insists on.
pub fn required_columns() -> impl Iterator<Item = &'static str> {
    NUMERIC_FEATURES
        .iter()
        .copied()
        .chain(std::iter::once(LABEL_COLUMN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_columns_order() {
        let cols: Vec<&str> = required_columns().collect();
        assert_eq!(cols.len(), 8);
        assert_eq!(cols[0], "Size");
        assert_eq!(cols[7], "Quality");
    }

    #[test]
    fn test_pairs_reference_features() {
        for (x, y) in FEATURE_PAIRS {
            assert!(NUMERIC_FEATURES.contains(&x));
            assert!(NUMERIC_FEATURES.contains(&y));
        }
    }
}
