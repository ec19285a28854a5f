pub fn mean(data: &[f64]) -> Option<f64> {
    match data.len() {
        0 => None,
        count => Some(data.iter().sum::<f64>() / count as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[6., 3., 6., 2.]), Some(4.25));
        assert_eq!(mean(&[10., 6., 1., 2.]), Some(4.75));
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
    fn test_mean_mixed_values() {
        assert_eq!(mean(&[-2.0, 0.0, 2.0]), Some(0.0));
    }
}
