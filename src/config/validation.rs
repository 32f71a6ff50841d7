//! Validation logic for configuration values.

use anyhow::Result;

use super::defaults::ReportsConfig;
use crate::safety::StepBounds;

impl ReportsConfig {
    /// Validate report settings
    pub fn validate(&self) -> Result<()> {
        if self.min_step < 1 {
            anyhow::bail!(
                "reports.min_step must be at least 1, got {}",
                self.min_step
            );
        }

        if self.max_step < self.min_step {
            anyhow::bail!(
                "reports.max_step must be >= reports.min_step ({}), got {}",
                self.min_step,
                self.max_step
            );
        }

        if self.budgets.is_empty() {
            anyhow::bail!("reports.budgets must list at least one budget");
        }

        Ok(())
    }

    /// Step bounds described by `min_step` and `max_step`.
    pub fn step_bounds(&self) -> StepBounds {
        StepBounds {
            min: self.min_step,
            max: self.max_step,
        }
    }
}
