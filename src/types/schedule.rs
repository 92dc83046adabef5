//! Schedule: per-step snapshots of wells, groups and control settings.
//!
//! A lookup step `n` holds the state in effect from `steps[n].date` until the
//! next step's date. Each step is a complete snapshot; there is no sharing
//! between steps, so any step can be handed to the encoder on its own.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{
    Actions, Group, ProducerCMode, Tuning, UdqConfig, Well, FIELD_GROUP,
};
use crate::error::{RestartError, Result};

// ============================================================================
// Guide Rates
// ============================================================================

/// GUIDERAT target phase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum GuideRateTarget {
    #[default]
    None,
    Oil,
    Liq,
    Gas,
    Wat,
    Res,
    Comb,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GuideRateModel {
    pub target: GuideRateTarget,
    #[serde(default = "default_allow_increase")]
    pub allow_increase: bool,
}

fn default_allow_increase() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct GuideRateConfig {
    #[serde(default)]
    pub model: Option<GuideRateModel>,
}

// ============================================================================
// Schedule State (one lookup step)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleState {
    /// Start of the step
    pub date: NaiveDateTime,
    /// Wells in definition order
    #[serde(default)]
    pub wells: Vec<Well>,
    /// Groups in definition order, FIELD first
    #[serde(default = "default_groups")]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub udq: UdqConfig,
    #[serde(default)]
    pub actions: Actions,
    #[serde(default)]
    pub tuning: Tuning,
    #[serde(default)]
    pub guide_rate: GuideRateConfig,
    /// Global WHISTCTL control mode
    #[serde(default)]
    pub whistctl_mode: ProducerCMode,
}

fn default_groups() -> Vec<Group> {
    vec![Group::field()]
}

impl ScheduleState {
    /// Empty state at `date` holding only the FIELD group.
    pub fn new(date: NaiveDateTime) -> Self {
        Self {
            date,
            wells: Vec::new(),
            groups: default_groups(),
            udq: UdqConfig::default(),
            actions: Actions::default(),
            tuning: Tuning::default(),
            guide_rate: GuideRateConfig::default(),
            whistctl_mode: ProducerCMode::None,
        }
    }

    pub fn well(&self, name: &str) -> Option<&Well> {
        self.wells.iter().find(|w| w.name == name)
    }

    pub fn well_mut(&mut self, name: &str) -> Option<&mut Well> {
        self.wells.iter_mut().find(|w| w.name == name)
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    /// Zero-based position of a group in definition order (FIELD is 0).
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name == name)
    }

    /// Wells attached directly to `group`, in well order.
    pub fn group_wells<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Well> + 'a {
        self.wells.iter().filter(move |w| w.group == group)
    }

    /// Groups whose parent is `group`, in group order.
    pub fn child_groups<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Group> + 'a {
        self.groups
            .iter()
            .filter(move |g| g.parent.as_deref() == Some(group))
    }

    /// Add a group under `parent` unless one with that name exists.
    pub fn add_group(&mut self, name: &str, parent: &str) {
        if self.group(name).is_none() {
            self.groups.push(Group::new(name, parent));
        }
    }

    /// Add or replace a well. A missing well group is created under FIELD,
    /// as WELSPECS does.
    pub fn add_well(&mut self, well: Well) {
        if well.group != FIELD_GROUP {
            self.add_group(&well.group, FIELD_GROUP);
        }
        match self.well_mut(&well.name) {
            Some(existing) => *existing = well,
            None => self.wells.push(well),
        }
    }

    /// Depth of a group below FIELD (FIELD = 0). Cycles are cut off at the
    /// number of groups.
    pub fn group_level(&self, name: &str) -> usize {
        let mut level = 0;
        let mut current = self.group(name);
        while let Some(parent) = current.and_then(|g| g.parent.as_deref()) {
            level += 1;
            if level > self.groups.len() {
                break;
            }
            current = self.group(parent);
        }
        level
    }
}

// ============================================================================
// Schedule
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    pub start: NaiveDateTime,
    pub steps: Vec<ScheduleState>,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Snapshot at a lookup step.
    pub fn state(&self, lookup_step: usize) -> Result<&ScheduleState> {
        self.steps.get(lookup_step).ok_or(RestartError::StepOutOfRange {
            step: lookup_step,
            len: self.steps.len(),
        })
    }

    pub fn wells(&self, lookup_step: usize) -> Result<&[Well]> {
        Ok(&self.state(lookup_step)?.wells)
    }

    pub fn groups(&self, lookup_step: usize) -> Result<&[Group]> {
        Ok(&self.state(lookup_step)?.groups)
    }

    pub fn num_wells(&self, lookup_step: usize) -> Result<usize> {
        Ok(self.state(lookup_step)?.wells.len())
    }

    pub fn num_groups(&self, lookup_step: usize) -> Result<usize> {
        Ok(self.state(lookup_step)?.groups.len())
    }

    /// Seconds from simulation start to the start of `step`.
    pub fn seconds_elapsed(&self, step: usize) -> Result<f64> {
        let state = self.state(step)?;
        #[allow(clippy::cast_precision_loss)]
        let seconds = (state.date - self.start).num_seconds() as f64;
        Ok(seconds)
    }
}

/// Incremental schedule construction, one report step at a time.
///
/// Every new step starts as a copy of the previous one, so changes persist
/// until overridden, like keywords in the SCHEDULE section.
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    start: NaiveDateTime,
    steps: Vec<ScheduleState>,
}

impl ScheduleBuilder {
    /// Step 0 begins at `start` with only the FIELD group.
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            start,
            steps: vec![ScheduleState::new(start)],
        }
    }

    /// Modify the most recently added step.
    pub fn update(mut self, apply: impl FnOnce(&mut ScheduleState)) -> Self {
        if let Some(last) = self.steps.last_mut() {
            apply(last);
        }
        self
    }

    /// Start a new step at `date` (DATES) and apply changes to it.
    pub fn dates(mut self, date: NaiveDateTime, apply: impl FnOnce(&mut ScheduleState)) -> Self {
        let mut next = self
            .steps
            .last()
            .cloned()
            .unwrap_or_else(|| ScheduleState::new(self.start));
        next.date = date;
        apply(&mut next);
        self.steps.push(next);
        self
    }

    /// Start a new step `days` after the previous one (TSTEP).
    pub fn tstep(self, days: i64, apply: impl FnOnce(&mut ScheduleState)) -> Self {
        let last = self.steps.last().map_or(self.start, |s| s.date);
        self.dates(last + Duration::days(days), apply)
    }

    pub fn build(self) -> Schedule {
        Schedule {
            start: self.start,
            steps: self.steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Connection;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid test date")
    }

    #[test]
    fn test_steps_copy_previous_state() {
        let schedule = ScheduleBuilder::new(date(2000, 1, 1))
            .dates(date(2000, 2, 1), |s| {
                let mut w = Well::producer("P1", "G1", 1, 1);
                w.add_connection(Connection::new(1, 1, 1));
                s.add_well(w);
            })
            .dates(date(2000, 3, 1), |s| {
                s.add_well(Well::producer("P2", "G1", 2, 2));
            })
            .build();

        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.num_wells(0).unwrap(), 0);
        assert_eq!(schedule.num_wells(1).unwrap(), 1);
        assert_eq!(schedule.num_wells(2).unwrap(), 2);
        assert_eq!(schedule.num_groups(2).unwrap(), 2, "FIELD + G1");
    }

    #[test]
    fn test_state_out_of_range() {
        let schedule = ScheduleBuilder::new(date(2000, 1, 1)).build();
        let err = schedule.state(5).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_tstep_advances_days() {
        let schedule = ScheduleBuilder::new(date(2000, 1, 1)).tstep(10, |_| {}).build();
        assert_eq!(schedule.steps[1].date, date(2000, 1, 11));
        assert_eq!(schedule.seconds_elapsed(1).unwrap(), 10.0 * 86_400.0);
    }

    #[test]
    fn test_group_level() {
        let mut state = ScheduleState::new(date(2000, 1, 1));
        state.add_group("PLAT", FIELD_GROUP);
        state.add_group("SAT", "PLAT");
        assert_eq!(state.group_level(FIELD_GROUP), 0);
        assert_eq!(state.group_level("PLAT"), 1);
        assert_eq!(state.group_level("SAT"), 2);
    }
}
