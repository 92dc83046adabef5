//! Report/lookup step pair and the report-step-0 rule.

use serde::{Deserialize, Serialize};

/// The `(report_step, lookup_step)` pair every step-dependent builder takes.
///
/// Report step 0 is the initial restart: no wells, groups, UDQs or actions
/// exist yet, whatever the schedule holds at the lookup step. Builders that
/// depend on simulation state go through [`StepContext::gated`] instead of
/// testing the step themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepContext {
    pub report_step: usize,
    pub lookup_step: usize,
}

impl StepContext {
    pub fn new(report_step: usize, lookup_step: usize) -> Self {
        Self { report_step, lookup_step }
    }

    /// Report step N written with the state of lookup step N-1.
    pub fn for_report_step(report_step: usize) -> Self {
        Self {
            report_step,
            lookup_step: report_step.saturating_sub(1),
        }
    }

    pub fn is_initial(&self) -> bool {
        self.report_step == 0
    }

    /// `T::default()` at report step 0, otherwise the computed value.
    pub fn gated<T, E, F>(&self, compute: F) -> Result<T, E>
    where
        T: Default,
        F: FnOnce() -> Result<T, E>,
    {
        if self.is_initial() {
            Ok(T::default())
        } else {
            compute()
        }
    }
}
