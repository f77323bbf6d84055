//! Resource limits for the exponential searches.
//!
//! Candidate-key enumeration, FD projection, BCNF splitting and the chase
//! can blow up combinatorially. Each of them checks a [`Budget`] at every
//! expansion step through a [`Meter`] and fails with
//! [`Error::SearchBudgetExceeded`] instead of running unbounded.

#[cfg(feature = "std")]
use core::time::Duration;

use crate::error::{Error, Limit};

/// Limits applied to a single analysis call.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    /// Largest number of attributes a search may branch over.
    pub max_attributes: Option<usize>,
    /// Largest number of expansion steps (closure evaluations, chase passes).
    pub max_steps: Option<u64>,
    /// Wall-clock limit for one call.
    #[cfg(feature = "std")]
    pub timeout: Option<Duration>,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            max_attributes: Some(Self::DEFAULT_MAX_ATTRIBUTES),
            max_steps: Some(Self::DEFAULT_MAX_STEPS),
            #[cfg(feature = "std")]
            timeout: None,
        }
    }
}

impl Budget {
    pub const DEFAULT_MAX_ATTRIBUTES: usize = 24;
    pub const DEFAULT_MAX_STEPS: u64 = 1 << 20;

    /// A budget that never fails.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_attributes: None,
            max_steps: None,
            #[cfg(feature = "std")]
            timeout: None,
        }
    }

    #[must_use]
    pub const fn with_max_attributes(mut self, limit: Option<usize>) -> Self {
        self.max_attributes = limit;
        self
    }

    #[must_use]
    pub const fn with_max_steps(mut self, limit: Option<u64>) -> Self {
        self.max_steps = limit;
        self
    }

    #[cfg(feature = "std")]
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fails if a search would branch over `actual` attributes.
    ///
    /// # Errors
    ///
    /// [`Error::SearchBudgetExceeded`] with [`Limit::Attributes`].
    pub fn check_width(&self, actual: usize) -> Result<(), Error> {
        match self.max_attributes {
            Some(limit) if actual > limit => {
                tracing::debug!(limit, actual, "search width over budget");
                Err(Limit::Attributes { limit, actual }.into())
            }
            _ => Ok(()),
        }
    }

    /// Starts metering one search.
    #[must_use]
    pub fn meter(&self) -> Meter {
        Meter {
            budget: *self,
            steps: 0,
            #[cfg(feature = "std")]
            started: std::time::Instant::now(),
        }
    }
}

/// Step and time accounting for one search, created by [`Budget::meter`].
#[derive(Debug)]
pub struct Meter {
    budget: Budget,
    steps: u64,
    #[cfg(feature = "std")]
    started: std::time::Instant,
}

impl Meter {
    /// Records one expansion step.
    ///
    /// # Errors
    ///
    /// [`Error::SearchBudgetExceeded`] once the step or time limit is passed.
    pub fn tick(&mut self) -> Result<(), Error> {
        self.steps += 1;
        if let Some(limit) = self.budget.max_steps {
            if self.steps > limit {
                tracing::debug!(limit, "search steps over budget");
                return Err(Limit::Steps { limit }.into());
            }
        }
        #[cfg(feature = "std")]
        if let Some(timeout) = self.budget.timeout {
            // Sampled every 64 steps.
            if self.steps % 64 == 1 && self.started.elapsed() > timeout {
                tracing::debug!(?timeout, "search deadline reached");
                return Err(Limit::Deadline {
                    millis: timeout.as_millis(),
                }
                .into());
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width() {
        let budget = Budget::default();
        assert!(budget.check_width(24).is_ok());
        assert_eq!(
            budget.check_width(25),
            Err(Error::SearchBudgetExceeded(Limit::Attributes {
                limit: 24,
                actual: 25
            }))
        );
        assert!(Budget::unlimited().check_width(1000).is_ok());
    }

    #[test]
    fn test_steps() {
        let mut meter = Budget::unlimited().with_max_steps(Some(2)).meter();
        assert!(meter.tick().is_ok());
        assert!(meter.tick().is_ok());
        assert_eq!(
            meter.tick(),
            Err(Error::SearchBudgetExceeded(Limit::Steps { limit: 2 }))
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_zero_timeout_fails_on_first_step() {
        let mut meter = Budget::unlimited()
            .with_timeout(Some(Duration::ZERO))
            .meter();
        std::thread::sleep(Duration::from_millis(1));
        assert!(matches!(
            meter.tick(),
            Err(Error::SearchBudgetExceeded(Limit::Deadline { .. }))
        ));
    }
}
