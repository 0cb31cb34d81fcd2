use std::time::Duration;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("time limit must be > 0 seconds")]
    InvalidTimeLimit,

    #[error("tick interval must be > 0")]
    InvalidTickInterval,

    #[error("pulse period must be > 0 seconds")]
    InvalidPulsePeriod,

    #[error("last minute threshold must be below the time limit")]
    InvalidLastMinuteThreshold,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Timing knobs for a quiz run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    time_limit_secs: u32,
    tick_interval: Duration,
    advance_delay: Duration,
    last_minute_secs: u32,
    pulse_every_secs: u32,
}

impl Default for QuizSettings {
    /// 30 minute limit, one tick per second, 800ms answer feedback before
    /// moving on, warning at one minute, pulse every five seconds before that.
    fn default() -> Self {
        Self {
            time_limit_secs: 1800,
            tick_interval: Duration::from_secs(1),
            advance_delay: Duration::from_millis(800),
            last_minute_secs: 60,
            pulse_every_secs: 5,
        }
    }
}

impl QuizSettings {
    /// Creates custom quiz settings.
    ///
    /// # Errors
    ///
    /// Returns `QuizSettingsError` if a duration is zero or the warning
    /// threshold does not fit inside the time limit.
    pub fn new(
        time_limit_secs: u32,
        tick_interval: Duration,
        advance_delay: Duration,
        last_minute_secs: u32,
        pulse_every_secs: u32,
    ) -> Result<Self, QuizSettingsError> {
        if time_limit_secs == 0 {
            return Err(QuizSettingsError::InvalidTimeLimit);
        }
        if tick_interval.is_zero() {
            return Err(QuizSettingsError::InvalidTickInterval);
        }
        if pulse_every_secs == 0 {
            return Err(QuizSettingsError::InvalidPulsePeriod);
        }
        if last_minute_secs >= time_limit_secs && last_minute_secs != 0 {
            return Err(QuizSettingsError::InvalidLastMinuteThreshold);
        }

        Ok(Self {
            time_limit_secs,
            tick_interval,
            advance_delay,
            last_minute_secs,
            pulse_every_secs,
        })
    }

    /// Default settings with a different time limit.
    ///
    /// The one-minute warning is dropped for limits of a minute or less.
    ///
    /// # Errors
    ///
    /// Returns `QuizSettingsError::InvalidTimeLimit` for a zero limit.
    pub fn with_time_limit(time_limit_secs: u32) -> Result<Self, QuizSettingsError> {
        let defaults = Self::default();
        let last_minute = if time_limit_secs > defaults.last_minute_secs {
            defaults.last_minute_secs
        } else {
            0
        };
        Self::new(
            time_limit_secs,
            defaults.tick_interval,
            defaults.advance_delay,
            last_minute,
            defaults.pulse_every_secs,
        )
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn advance_delay(&self) -> Duration {
        self.advance_delay
    }

    /// Zero disables the last-minute warning.
    #[must_use]
    pub fn last_minute_secs(&self) -> u32 {
        self.last_minute_secs
    }

    #[must_use]
    pub fn pulse_every_secs(&self) -> u32 {
        self.pulse_every_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_quiz_screen() {
        let settings = QuizSettings::default();
        assert_eq!(settings.time_limit_secs(), 1800);
        assert_eq!(settings.advance_delay(), Duration::from_millis(800));
        assert_eq!(settings.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn zero_time_limit_is_rejected() {
        assert_eq!(
            QuizSettings::with_time_limit(0).unwrap_err(),
            QuizSettingsError::InvalidTimeLimit
        );
    }

    #[test]
    fn short_limit_drops_last_minute_warning() {
        let settings = QuizSettings::with_time_limit(30).unwrap();
        assert_eq!(settings.last_minute_secs(), 0);
    }

    #[test]
    fn threshold_must_fit_in_limit() {
        let err = QuizSettings::new(
            60,
            Duration::from_secs(1),
            Duration::ZERO,
            60,
            5,
        )
        .unwrap_err();
        assert_eq!(err, QuizSettingsError::InvalidLastMinuteThreshold);
    }
}
