/// Snapping values to a grid step
use nalgebra::Vector2;

/// Round `value` to the nearest multiple of `step`, or return it as is when `pass` is set
pub fn quantize(value: f32, step: f32, pass: bool) -> f32 {
    if pass {
        return value;
    }
    (value / step).round() * step
}

/// Component-wise [`quantize`]
pub fn quantize_vec2(value: &Vector2<f32>, step: f32, pass: bool) -> Vector2<f32> {
    Vector2::new(quantize(value.x, step, pass), quantize(value.y, step, pass))
}

/// Round `value` up to the next multiple of `step`
pub fn quantize_up(value: f32, step: f32) -> f32 {
    (value / step).ceil() * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_nearest_multiple() {
        assert_eq!(quantize(0.3, 0.25, false), 0.25);
        assert_eq!(quantize(0.4, 0.25, false), 0.5);
        assert_eq!(quantize(124.0, 50.0, false), 100.0);
        assert_eq!(quantize(126.0, 50.0, false), 150.0);
        assert_eq!(quantize(-26.0, 50.0, false), -50.0);
    }

    #[test]
    fn test_idempotent() {
        for &step in &[0.25_f32, 50.0, 7.0] {
            for i in -40..40 {
                let v = i as f32 * 3.7;
                let once = quantize(v, step, false);
                assert_eq!(quantize(once, step, false), once);
            }
        }
    }

    #[test]
    fn test_pass_is_identity() {
        for &v in &[0.0_f32, 0.1234, -987.5, 1e6] {
            assert_eq!(quantize(v, 0.25, true), v);
        }
        let v = Vector2::new(13.3, -2.2);
        assert_eq!(quantize_vec2(&v, 50.0, true), v);
    }

    #[test]
    fn test_quantize_up() {
        assert_eq!(quantize_up(460.0, 100.0), 500.0);
        assert_eq!(quantize_up(500.0, 100.0), 500.0);
        assert_eq!(quantize_up(501.0, 100.0), 600.0);
    }
}
