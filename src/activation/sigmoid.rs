use std::f64::consts::E;

/// Logistic activation `1 / (1 + e^-x)`.
///
/// There is no clamping: for inputs of large magnitude the result saturates
/// to exactly `0.0` or `1.0`, and trained weights depend on that.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of the sigmoid expressed through its output.
///
/// `activated` is `sigmoid(z)`, not `z`; the forward pass caches activated
/// values, so the backward pass never needs the pre-activation sums.
pub fn sigmoid_derivative(activated: f64) -> f64 {
    activated * (1.0 - activated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_centered_at_half() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sigmoid_saturates_without_nan() {
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert!(!sigmoid(f64::MAX).is_nan());
    }

    #[test]
    fn derivative_takes_the_activated_value() {
        assert_eq!(sigmoid_derivative(0.5), 0.25);
        assert_eq!(sigmoid_derivative(1.0), 0.0);

        let z = 0.7;
        let h = 1e-6;
        let numeric = (sigmoid(z + h) - sigmoid(z - h)) / (2.0 * h);
        assert!((numeric - sigmoid_derivative(sigmoid(z))).abs() < 1e-8);
    }
}
