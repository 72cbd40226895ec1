//! Acceptable-value constraints attached to config entries.
//!
//! Constraints are enforced by the store: every value written through
//! [`ConfigEntry::set`](crate::ConfigEntry::set) or loaded from disk is clamped
//! before subscribers observe it.

use std::fmt;

/// Constraint on the values an entry may hold.
pub trait AcceptableValues<T>: Send + Sync {
    /// Coerce a value into the accepted set.
    fn clamp(&self, value: T) -> T;

    fn is_valid(&self, value: &T) -> bool;

    /// Description written into the config file.
    fn describe(&self) -> String;
}

/// Inclusive numeric range `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AcceptableRange<T> {
    min: T,
    max: T,
}

impl<T: PartialOrd + Copy> AcceptableRange<T> {
    /// # Panics
    ///
    /// Panics if `min > max`; ranges are compile-time constants in practice.
    pub fn new(min: T, max: T) -> Self {
        assert!(min <= max, "acceptable range minimum exceeds maximum");
        Self { min, max }
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }
}

impl AcceptableValues<f32> for AcceptableRange<f32> {
    fn clamp(&self, value: f32) -> f32 {
        // NaN is not orderable; fall back to the lower bound.
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    fn is_valid(&self, value: &f32) -> bool {
        *value >= self.min && *value <= self.max
    }

    fn describe(&self) -> String {
        format!("From {} to {}", self.min, self.max)
    }
}

impl AcceptableValues<i64> for AcceptableRange<i64> {
    fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }

    fn is_valid(&self, value: &i64) -> bool {
        (self.min..=self.max).contains(value)
    }

    fn describe(&self) -> String {
        format!("From {} to {}", self.min, self.max)
    }
}

/// Closed list of accepted values; anything else falls back to the first one.
#[derive(Clone, Debug, PartialEq)]
pub struct AcceptableList<T> {
    values: Vec<T>,
}

impl<T> AcceptableList<T> {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: Vec<T>) -> Self {
        assert!(!values.is_empty(), "acceptable list must not be empty");
        Self { values }
    }
}

impl<T> AcceptableValues<T> for AcceptableList<T>
where
    T: Clone + PartialEq + fmt::Display + Send + Sync,
{
    fn clamp(&self, value: T) -> T {
        if self.values.contains(&value) {
            value
        } else {
            self.values[0].clone()
        }
    }

    fn is_valid(&self, value: &T) -> bool {
        self.values.contains(value)
    }

    fn describe(&self) -> String {
        let values: Vec<String> = self.values.iter().map(ToString::to_string).collect();
        format!("One of {}", values.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_clamps_both_ends() {
        let range = AcceptableRange::new(0.1f32, 10.0);
        assert_eq!(range.clamp(0.0), 0.1);
        assert_eq!(range.clamp(25.0), 10.0);
        assert_eq!(range.clamp(2.5), 2.5);
        assert_eq!(range.clamp(f32::NAN), 0.1);
        assert!(range.is_valid(&10.0));
        assert!(!range.is_valid(&10.5));
        assert_eq!(range.describe(), "From 0.1 to 10");
    }

    #[test]
    fn list_falls_back_to_first() {
        let list = AcceptableList::new(vec!["low".to_string(), "high".to_string()]);
        assert_eq!(list.clamp("high".to_string()), "high");
        assert_eq!(list.clamp("medium".to_string()), "low");
        assert_eq!(list.describe(), "One of low, high");
    }

    #[test]
    #[should_panic]
    fn inverted_range_panics() {
        let _ = AcceptableRange::new(5i64, 1);
    }
}
