/// Mean of `value` weighted by `weight`.
pub fn weighted_mean(data: &[(f64, f64)]) -> Option<f64> {
    let weight = data.iter().map(|(_, w)| w).sum::<f64>();
    let sum = data.iter().map(|(v, w)| v * w).sum::<f64>();

    match weight {
        positive if positive > 0.0 => Some(sum / weight),
        _ => None,
    }
}

/// Population standard deviation of `value` weighted by `weight`.
pub fn weighted_std_dev(data: &[(f64, f64)]) -> Option<f64> {
    match weighted_mean(data) {
        Some(data_mean) => {
            let weight = data.iter().map(|(_, w)| w).sum::<f64>();
            let variance = data
                .iter()
                .map(|(value, w)| {
                    let diff = data_mean - *value;

                    diff * diff * w
                })
                .sum::<f64>()
                / weight;

            Some(variance.sqrt())
        }
        None => None,
    }
}

/// Render an integer with `,` between groups of three digits.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_mean() {
        assert_eq!(weighted_mean(&[(34.0, 1.0), (91.0, 2.0)]), Some(72.0));
        assert_eq!(weighted_mean(&[(10., 1.), (20., 1.), (30., 2.)]), Some(22.5));
    }

    #[test]
    fn test_weighted_mean_single_value() {
        assert_eq!(weighted_mean(&[(42.0, 7.0)]), Some(42.0));
    }

    #[test]
    fn test_weighted_mean_empty_slice() {
        assert_eq!(weighted_mean(&[]), None);
    }

    #[test]
    fn test_weighted_mean_zero_weights() {
        assert_eq!(weighted_mean(&[(5.0, 0.0), (9.0, 0.0)]), None);
    }

    #[test]
    fn test_weighted_std_dev_matches_unweighted_expansion() {
        // {15, 7, 55} each once
        let result = weighted_std_dev(&[(15., 1.), (7., 1.), (55., 1.)]).unwrap();
        assert!((result - 20.997354330698162).abs() < 1e-10);

        // weight 2 on a value is the same as listing it twice
        let weighted = weighted_std_dev(&[(1., 2.), (4., 1.)]).unwrap();
        let listed = weighted_std_dev(&[(1., 1.), (1., 1.), (4., 1.)]).unwrap();
        assert!((weighted - listed).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_std_dev_identical_values() {
        assert_eq!(weighted_std_dev(&[(5.0, 3.0), (5.0, 9.0)]), Some(0.0));
    }

    #[test]
    fn test_weighted_std_dev_empty_slice() {
        assert_eq!(weighted_std_dev(&[]), None);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(179823), "179,823");
        assert_eq!(group_thousands(2_550_000), "2,550,000");
        assert_eq!(group_thousands(12_345_678_901), "12,345,678,901");
    }
}
