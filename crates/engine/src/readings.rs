//! Per-contract series of dated meter readings.
//!
//! The series is the single source of truth for estimation: it keeps the
//! sparse, irregularly dated readings in date order and answers the
//! bracketing queries interpolation needs.

use std::collections::BTreeMap;
use std::ops::Bound;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ResultUtility, error::UtilityError};

/// Ordered mapping from reading date to the cumulative counter value.
///
/// Values are assumed non-decreasing over time (meters are cumulative
/// counters); the series does not enforce this.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingSeries {
    readings: BTreeMap<NaiveDate, f64>,
}

impl ReadingSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a reading, replacing any value already recorded at `date`.
    pub fn record(&mut self, date: NaiveDate, value: f64) {
        self.readings.insert(date, value);
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.readings.get(&date).copied()
    }

    /// Value at the most recent recorded date.
    pub fn latest(&self) -> Option<f64> {
        self.readings.iter().next_back().map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Date-ascending iteration over the recorded readings.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.readings.iter().map(|(date, value)| (*date, *value))
    }

    /// Estimates the reading at `date` by linear interpolation between the
    /// two recorded readings bracketing it.
    ///
    /// The lower bracket is the latest reading on or before `date`, the
    /// upper bracket the earliest reading strictly after it. A date at or
    /// past the last recorded reading has no upper bracket and cannot be
    /// estimated: the series never extrapolates. A `date` that is itself a
    /// recorded (non-final) date degenerates to its recorded value.
    pub fn estimate(&self, date: NaiveDate) -> ResultUtility<f64> {
        if self.readings.len() < 2 {
            return Err(UtilityError::InsufficientData(
                "at least two readings are required".to_string(),
            ));
        }

        let (previous_date, previous_value) = self
            .readings
            .range(..=date)
            .next_back()
            .map(|(d, v)| (*d, *v))
            .ok_or_else(|| UtilityError::DateOutOfRange(date.to_string()))?;
        let (next_date, next_value) = self
            .readings
            .range((Bound::Excluded(date), Bound::Unbounded))
            .next()
            .map(|(d, v)| (*d, *v))
            .ok_or_else(|| UtilityError::DateOutOfRange(date.to_string()))?;

        // next_date > previous_date holds by construction, so the span is
        // never zero.
        let span = next_date.signed_duration_since(previous_date).num_days() as f64;
        let elapsed = date.signed_duration_since(previous_date).num_days() as f64;

        Ok(previous_value + elapsed * (next_value - previous_value) / span)
    }
}
