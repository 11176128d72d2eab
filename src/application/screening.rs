//! Screening service: Builds and validates health profiles from user input.

use crate::domain::{HealthProfile, ProfileDict};
use crate::GlycoscopeError;

/// Session counters for checked profiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreeningTally {
    pub checked: usize,
    /// Profiles with at least one out-of-range value
    pub flagged: usize,
}

/// Service for profile checks.
#[derive(Debug, Default)]
pub struct ScreeningService {
    tally: ScreeningTally,
}

impl ScreeningService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a profile from dictionary input and record the outcome.
    ///
    /// Out-of-range values produce a profile with validation errors; only
    /// malformed input is an `Err`. Measurement values are never logged.
    ///
    /// # Errors
    /// Returns error if a value is not a usable number.
    pub fn check(&mut self, input: &ProfileDict) -> Result<HealthProfile, GlycoscopeError> {
        let profile = HealthProfile::from_dict(input).map_err(|e| {
            tracing::warn!("Rejected profile input: {}", e);
            GlycoscopeError::from(e)
        })?;

        self.tally.checked += 1;
        if !profile.is_valid() {
            self.tally.flagged += 1;
        }

        tracing::info!(
            fields = profile.available_features().len(),
            errors = profile.validation_errors().len(),
            "Profile checked"
        );

        Ok(profile)
    }

    #[must_use]
    pub fn tally(&self) -> ScreeningTally {
        self.tally
    }
}
