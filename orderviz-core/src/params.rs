/// Shared parameter ranges and normalisation
use nalgebra::Vector2;
use std::f32::consts::TAU;
use std::ops::RangeInclusive;

pub const ROTATION_RANGE: RangeInclusive<f32> = 0.0..=TAU;
pub const SCALE_RANGE: RangeInclusive<f32> = 0.1..=20.0;

/// With `uniform` set, Y follows X
pub fn enforce_uniform(scale: &mut Vector2<f32>, uniform: bool) {
    if uniform {
        scale.y = scale.x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enforce_uniform() {
        let mut scale = Vector2::new(3.0, 0.5);
        enforce_uniform(&mut scale, false);
        assert_eq!(scale, Vector2::new(3.0, 0.5));
        enforce_uniform(&mut scale, true);
        assert_eq!(scale, Vector2::new(3.0, 3.0));
    }
}
