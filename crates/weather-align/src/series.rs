//! Gap Filling on a Uniform Grid

/// Linearly interpolate missing values that lie between two known values.
///
/// The slice is treated as uniformly spaced. Leading and trailing gaps are
/// left untouched.
pub fn interpolate_interior(values: &mut [Option<f64>]) {
    let mut last_known: Option<(usize, f64)> = None;

    for i in 0..values.len() {
        let Some(current) = values[i] else {
            continue;
        };

        if let Some((start, start_value)) = last_known {
            let span = (i - start) as f64;
            for (step, slot) in values[start + 1..i].iter_mut().enumerate() {
                let frac = (step + 1) as f64 / span;
                *slot = Some(start_value + (current - start_value) * frac);
            }
        }

        last_known = Some((i, current));
    }
}
