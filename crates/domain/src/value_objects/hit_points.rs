//! Hit point tracking for combatants
//!
//! Current HP is clamped at zero on every mutation but has no upper clamp:
//! a combatant may be healed past its total (temporary HP, over-heal).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::events::HpChange;

/// Current and total hit points of a combatant.
///
/// # Invariants
///
/// - `total > 0`
/// - `current >= 0` (unsigned)
/// - `current` may exceed `total`, up to `u32::MAX`; larger values are
///   rejected rather than capped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawHitPoints")]
pub struct HitPoints {
    current: u32,
    total: u32,
}

/// Unvalidated wire form; deserialization goes through [`HitPoints::new`].
#[derive(Deserialize)]
struct RawHitPoints {
    current: i64,
    total: i64,
}

impl TryFrom<RawHitPoints> for HitPoints {
    type Error = DomainError;

    fn try_from(raw: RawHitPoints) -> Result<Self, Self::Error> {
        Self::new(raw.current, raw.total)
    }
}

impl HitPoints {
    /// Full health: `current == total`.
    pub fn full(total: i64) -> Result<Self, DomainError> {
        let total = validate_total(total)?;
        Ok(Self {
            current: total,
            total,
        })
    }

    /// Explicit current and total, as submitted by the full edit form.
    ///
    /// # Errors
    ///
    /// - `total` is not positive
    /// - `current` is negative
    pub fn new(current: i64, total: i64) -> Result<Self, DomainError> {
        let total = validate_total(total)?;
        if current < 0 {
            return Err(DomainError::validation("Current HP cannot be negative"));
        }
        Ok(Self {
            current: to_hp(current)?,
            total,
        })
    }

    /// Full health from a total validated elsewhere (template construction).
    pub(crate) fn from_total(total: u32) -> Self {
        let total = total.max(1);
        Self {
            current: total,
            total,
        }
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Set current HP to an absolute value, clamped to `max(0, value)`.
    ///
    /// # Errors
    ///
    /// Rejects values above `u32::MAX`; HP is left unchanged.
    pub fn set_current(&mut self, value: i64) -> Result<HpChange, DomainError> {
        let old = self.current;
        self.current = to_hp(value.max(0))?;
        Ok(HpChange::between(old, self.current))
    }

    /// Add `delta` (negative for damage) to current HP, clamped at zero.
    pub fn adjust(&mut self, delta: i64) -> Result<HpChange, DomainError> {
        self.set_current(i64::from(self.current).saturating_add(delta))
    }

    /// True when current HP has reached zero.
    #[inline]
    pub fn is_down(&self) -> bool {
        self.current == 0
    }

    /// True when healed past the total.
    #[inline]
    pub fn is_over_max(&self) -> bool {
        self.current > self.total
    }

    /// Current HP as a percentage of total (can exceed 100).
    pub fn percentage(&self) -> f64 {
        f64::from(self.current) / f64::from(self.total) * 100.0
    }

    /// Coarse health band used to colour HP bars.
    pub fn band(&self) -> HealthBand {
        HealthBand::from_percentage(self.percentage())
    }
}

impl fmt::Display for HitPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

fn validate_total(total: i64) -> Result<u32, DomainError> {
    if total <= 0 {
        return Err(DomainError::validation("Total HP must be a positive number"));
    }
    u32::try_from(total).map_err(|_| DomainError::validation("Total HP is too large"))
}

fn to_hp(value: i64) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| DomainError::validation("Current HP is too large"))
}

/// Health band thresholds: above 60% healthy, above 30% wounded, else critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Healthy,
    Wounded,
    Critical,
}

impl HealthBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 60.0 {
            Self::Healthy
        } else if percentage > 30.0 {
            Self::Wounded
        } else {
            Self::Critical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_starts_at_total() {
        let hp = HitPoints::full(25).unwrap();
        assert_eq!(hp.current(), 25);
        assert_eq!(hp.total(), 25);
        assert!(!hp.is_down());
    }

    #[test]
    fn total_must_be_positive() {
        assert!(HitPoints::full(0).is_err());
        assert!(HitPoints::full(-3).is_err());
        assert!(HitPoints::new(5, 0).is_err());
    }

    #[test]
    fn explicit_current_cannot_be_negative() {
        assert!(HitPoints::new(-1, 10).is_err());
        let hp = HitPoints::new(0, 10).unwrap();
        assert!(hp.is_down());
    }

    #[test]
    fn explicit_current_may_exceed_total() {
        let hp = HitPoints::new(40, 10).unwrap();
        assert_eq!(hp.current(), 40);
        assert!(hp.is_over_max());
    }

    #[test]
    fn set_current_clamps_at_zero_only() {
        let mut hp = HitPoints::full(30).unwrap();
        hp.set_current(-12).unwrap();
        assert_eq!(hp.current(), 0);
        hp.set_current(80).unwrap();
        assert_eq!(hp.current(), 80);
    }

    #[test]
    fn adjust_applies_delta() {
        let mut hp = HitPoints::full(30).unwrap();
        assert_eq!(
            hp.adjust(-10).unwrap(),
            HpChange::Damaged {
                amount: 10,
                remaining_hp: 20
            }
        );
        assert_eq!(hp.adjust(-100).unwrap(), HpChange::Downed { amount: 20 });
        assert_eq!(hp.current(), 0);
        assert_eq!(hp.adjust(5).unwrap(), HpChange::Revived { new_hp: 5 });
    }

    #[test]
    fn percentage_and_band() {
        let mut hp = HitPoints::full(100).unwrap();
        assert_eq!(hp.band(), HealthBand::Healthy);
        hp.set_current(61).unwrap();
        assert_eq!(hp.band(), HealthBand::Healthy);
        hp.set_current(60).unwrap();
        assert_eq!(hp.band(), HealthBand::Wounded);
        hp.set_current(31).unwrap();
        assert_eq!(hp.band(), HealthBand::Wounded);
        hp.set_current(30).unwrap();
        assert_eq!(hp.band(), HealthBand::Critical);
        hp.set_current(150).unwrap();
        assert!((hp.percentage() - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn oversized_current_is_rejected_not_capped() {
        let mut hp = HitPoints::full(30).unwrap();
        let err = hp.set_current(5_000_000_000).unwrap_err();
        assert_eq!(err.message(), "Current HP is too large");
        assert_eq!(hp.current(), 30);

        hp.set_current(i64::from(u32::MAX)).unwrap();
        assert_eq!(hp.current(), u32::MAX);
        assert!(hp.adjust(1).is_err());
        assert_eq!(hp.current(), u32::MAX);
        assert!(HitPoints::new(5_000_000_000, 10).is_err());
    }

    #[test]
    fn deserialization_validates() {
        let hp: HitPoints = serde_json::from_str(r#"{"current":12,"total":20}"#).unwrap();
        assert_eq!(hp, HitPoints::new(12, 20).unwrap());
        assert!(serde_json::from_str::<HitPoints>(r#"{"current":5,"total":0}"#).is_err());
        assert!(serde_json::from_str::<HitPoints>(r#"{"current":-1,"total":10}"#).is_err());
    }

    #[test]
    fn display_is_current_over_total() {
        let hp = HitPoints::new(7, 25).unwrap();
        assert_eq!(hp.to_string(), "7/25");
    }
}
