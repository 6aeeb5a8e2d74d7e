pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

/// Map a play-field percentage onto a cell offset inside an extent of
/// `extent` cells, clamping so the result stays addressable.
pub fn percent_to_cell(percent: f64, extent: u16) -> u16 {
    if extent == 0 {
        return 0;
    }
    let clamped = percent.clamp(0.0, 100.0);
    let cell = (clamped / 100.0 * extent as f64).floor() as u16;
    cell.min(extent - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[10., 20., 30., 15., 22.]), Some(19.4));
        assert_eq!(mean(&[15., 7., 55., 12., 4.]), Some(18.6));
    }

    #[test]
    fn test_mean_single_value() {
        assert_eq!(mean(&[42.0]), Some(42.0));
    }

    #[test]
    fn test_mean_empty_slice() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_percent_to_cell_bounds() {
        assert_eq!(percent_to_cell(0.0, 80), 0);
        assert_eq!(percent_to_cell(100.0, 80), 79);
        assert_eq!(percent_to_cell(50.0, 80), 40);
    }

    #[test]
    fn test_percent_to_cell_clamps_out_of_range() {
        assert_eq!(percent_to_cell(-5.0, 80), 0);
        assert_eq!(percent_to_cell(120.0, 80), 79);
    }

    #[test]
    fn test_percent_to_cell_zero_extent() {
        assert_eq!(percent_to_cell(50.0, 0), 0);
    }
}
