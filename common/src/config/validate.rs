use std::fmt::Display;

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

pub fn ensure_range<T>(name: &str, value: T, min: T, max: T) -> Result<(), String>
where
    T: PartialOrd + Display + Copy,
{
    // NaN compares false both ways, so it never counts as in range.
    let in_range = min <= value && value <= max;
    if !in_range {
        return Err(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_range_bounds_are_inclusive() {
        assert!(ensure_range("n", 1, 1, 5).is_ok());
        assert!(ensure_range("n", 5, 1, 5).is_ok());
        assert!(ensure_range("n", 6, 1, 5).is_err());
        assert!(ensure_range("x", -0.1, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_ensure_range_rejects_nan() {
        let result = ensure_range("chance", f32::NAN, 0.0, 1.0);
        assert_eq!(result, Err("chance must be between 0 and 1, got NaN".to_string()));
    }
}
