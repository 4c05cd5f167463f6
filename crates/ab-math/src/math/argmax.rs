//! Row-wise argmax with a deterministic tie-break.

/// Index of the largest value, preferring the earliest index on ties.
///
/// NaN entries are skipped. Returns `None` for an empty slice or one made
/// entirely of NaN.
pub fn first_argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if v <= current => {}
            _ => best = Some((idx, v)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Count, per column, how many rows it holds the maximum.
///
/// `columns` are equal-length sample vectors. Rows whose values are all NaN
/// are not counted for any column.
pub fn count_row_maxima(columns: &[&[f64]]) -> Vec<u64> {
    let mut counts = vec![0u64; columns.len()];
    let rows = columns.iter().map(|c| c.len()).min().unwrap_or(0);
    let mut row = vec![0.0; columns.len()];
    for r in 0..rows {
        for (slot, col) in row.iter_mut().zip(columns.iter()) {
            *slot = col[r];
        }
        if let Some(idx) = first_argmax(&row) {
            counts[idx] += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_largest() {
        assert_eq!(first_argmax(&[0.1, 0.7, 0.3]), Some(1));
    }

    #[test]
    fn ties_go_to_first() {
        assert_eq!(first_argmax(&[0.5, 0.9, 0.9]), Some(1));
        assert_eq!(first_argmax(&[2.0, 2.0]), Some(0));
    }

    #[test]
    fn skips_nan() {
        assert_eq!(first_argmax(&[f64::NAN, 0.2, 0.1]), Some(1));
        assert_eq!(first_argmax(&[f64::NAN]), None);
        assert_eq!(first_argmax(&[]), None);
    }

    #[test]
    fn counts_per_row() {
        let a = [1.0, 0.0, 5.0, 3.0];
        let b = [0.5, 2.0, 5.0, 4.0];
        let counts = count_row_maxima(&[&a, &b]);
        // Row 2 ties; column a wins it.
        assert_eq!(counts, vec![2, 2]);
    }

    #[test]
    fn counts_sum_to_rows() {
        let a: Vec<f64> = (0..50).map(|i| (i as f64).sin()).collect();
        let b: Vec<f64> = (0..50).map(|i| (i as f64).cos()).collect();
        let c: Vec<f64> = (0..50).map(|i| ((i * 7) as f64).sin()).collect();
        let counts = count_row_maxima(&[&a, &b, &c]);
        assert_eq!(counts.iter().sum::<u64>(), 50);
    }
}
