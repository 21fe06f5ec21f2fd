//! Missing Value Fill

/// Forward-fill each column from the previous row, then zero what is left.
///
/// Leading gaps have no previous value and become `0.0`.
pub fn forward_fill<const N: usize>(rows: &[[Option<f64>; N]]) -> Vec<[f64; N]> {
    let mut last: [Option<f64>; N] = [None; N];

    rows.iter()
        .map(|row| {
            let mut filled = [0.0; N];
            for (col, value) in row.iter().enumerate() {
                if let Some(v) = value.filter(|v| !v.is_nan()) {
                    last[col] = Some(v);
                }
                filled[col] = last[col].unwrap_or(0.0);
            }
            filled
        })
        .collect()
}
