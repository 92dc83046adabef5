//! Enumeration-to-integer code tables of the restart format.
//!
//! Tables are total-but-defaulting: a variant missing from a table encodes
//! as 0, never as an error.

use crate::types::{
    ConnectionDirection, ConnectionState, GroupInjectionCMode, GroupProductionCMode,
    GuideRateTarget, InjectorCMode, InjectorType, ProducerCMode, WellStatus, WellType,
};

/// Guide-rate nominated phase (INTEHEAD NGRNPH)
pub const NOMINATED_PHASE: &[(GuideRateTarget, i32)] = &[
    (GuideRateTarget::None, 0),
    (GuideRateTarget::Oil, 1),
    (GuideRateTarget::Gas, 3),
    (GuideRateTarget::Liq, 4),
    (GuideRateTarget::Res, 6),
    (GuideRateTarget::Comb, 9),
];

/// WHISTCTL mode (INTEHEAD WHISTC). Code 6 is reserved.
pub const WHISTCTL_MODE: &[(ProducerCMode, i32)] = &[
    (ProducerCMode::None, 0),
    (ProducerCMode::Orat, 1),
    (ProducerCMode::Wrat, 2),
    (ProducerCMode::Grat, 3),
    (ProducerCMode::Lrat, 4),
    (ProducerCMode::Resv, 5),
    (ProducerCMode::Bhp, 7),
];

/// Active producer control (IWEL)
pub const PRODUCER_CTRL: &[(ProducerCMode, i32)] = &[
    (ProducerCMode::Grup, -1),
    (ProducerCMode::Orat, 1),
    (ProducerCMode::Wrat, 2),
    (ProducerCMode::Grat, 3),
    (ProducerCMode::Lrat, 4),
    (ProducerCMode::Resv, 5),
    (ProducerCMode::Thp, 6),
    (ProducerCMode::Bhp, 7),
    (ProducerCMode::Crat, 9),
];

pub const GROUP_PRODUCTION_CTRL: &[(GroupProductionCMode, i32)] = &[
    (GroupProductionCMode::None, 0),
    (GroupProductionCMode::Orat, 1),
    (GroupProductionCMode::Wrat, 2),
    (GroupProductionCMode::Grat, 3),
    (GroupProductionCMode::Lrat, 4),
    (GroupProductionCMode::Resv, 5),
    (GroupProductionCMode::Prbl, 6),
    (GroupProductionCMode::Crat, 9),
];

pub const GROUP_INJECTION_CTRL: &[(GroupInjectionCMode, i32)] = &[
    (GroupInjectionCMode::None, 0),
    (GroupInjectionCMode::Rate, 1),
    (GroupInjectionCMode::Resv, 2),
    (GroupInjectionCMode::Rein, 3),
    (GroupInjectionCMode::Vrep, 4),
];

/// Shared defaulting lookup for all tables above.
pub fn lookup<K: PartialEq + Copy>(table: &[(K, i32)], key: K) -> i32 {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(0, |&(_, code)| code)
}

pub fn nominated_phase(target: GuideRateTarget) -> i32 {
    lookup(NOMINATED_PHASE, target)
}

pub fn whistctl_mode(mode: ProducerCMode) -> i32 {
    lookup(WHISTCTL_MODE, mode)
}

/// IWEL well type: 1 producer, 2 oil, 3 water, 4 gas injector.
pub fn well_type(well_type: WellType) -> i32 {
    match well_type {
        WellType::Producer => 1,
        WellType::Injector(InjectorType::Oil) => 2,
        WellType::Injector(InjectorType::Water) => 3,
        WellType::Injector(InjectorType::Gas) => 4,
        WellType::Injector(InjectorType::Multi) => 0,
    }
}

pub fn well_status(status: WellStatus) -> i32 {
    match status {
        WellStatus::Open => 1,
        WellStatus::Stop => 0,
        WellStatus::Shut => -1000,
        WellStatus::Auto => 3,
    }
}

pub fn producer_ctrl(mode: ProducerCMode) -> i32 {
    lookup(PRODUCER_CTRL, mode)
}

/// IWEL active control for injectors. Rate control reports the injected
/// phase (1 oil, 2 water, 3 gas).
pub fn injector_ctrl(injector: InjectorType, mode: InjectorCMode) -> i32 {
    match mode {
        InjectorCMode::Rate => match injector {
            InjectorType::Oil => 1,
            InjectorType::Water => 2,
            InjectorType::Gas => 3,
            InjectorType::Multi => 0,
        },
        InjectorCMode::Resv => 5,
        InjectorCMode::Thp => 6,
        InjectorCMode::Bhp => 7,
        InjectorCMode::Grup => -1,
    }
}

pub fn group_production_ctrl(mode: GroupProductionCMode) -> i32 {
    lookup(GROUP_PRODUCTION_CTRL, mode)
}

pub fn group_injection_ctrl(mode: GroupInjectionCMode) -> i32 {
    lookup(GROUP_INJECTION_CTRL, mode)
}

/// ICON status: open 1, anything else -1000.
pub fn connection_status(state: ConnectionState) -> i32 {
    match state {
        ConnectionState::Open => 1,
        ConnectionState::Shut | ConnectionState::Auto => -1000,
    }
}

pub fn connection_direction(direction: ConnectionDirection) -> i32 {
    match direction {
        ConnectionDirection::X => 1,
        ConnectionDirection::Y => 2,
        ConnectionDirection::Z => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominated_phase_table() {
        assert_eq!(nominated_phase(GuideRateTarget::None), 0);
        assert_eq!(nominated_phase(GuideRateTarget::Oil), 1);
        assert_eq!(nominated_phase(GuideRateTarget::Gas), 3);
        assert_eq!(nominated_phase(GuideRateTarget::Liq), 4);
        assert_eq!(nominated_phase(GuideRateTarget::Res), 6);
        assert_eq!(nominated_phase(GuideRateTarget::Comb), 9);
    }

    #[test]
    fn test_unmapped_values_default_to_zero() {
        assert_eq!(nominated_phase(GuideRateTarget::Wat), 0);
        assert_eq!(whistctl_mode(ProducerCMode::Thp), 0);
        assert_eq!(whistctl_mode(ProducerCMode::Crat), 0);
        assert_eq!(whistctl_mode(ProducerCMode::Grup), 0);
        assert_eq!(group_production_ctrl(GroupProductionCMode::Fld), 0);
        assert_eq!(group_injection_ctrl(GroupInjectionCMode::Fld), 0);
        assert_eq!(producer_ctrl(ProducerCMode::None), 0);
    }

    #[test]
    fn test_whistctl_skips_reserved_code() {
        let codes: Vec<i32> = WHISTCTL_MODE.iter().map(|&(_, c)| c).collect();
        assert!(!codes.contains(&6));
        assert_eq!(whistctl_mode(ProducerCMode::Bhp), 7);
        assert_eq!(whistctl_mode(ProducerCMode::Resv), 5);
    }

    #[test]
    fn test_injector_rate_control_reports_phase() {
        assert_eq!(injector_ctrl(InjectorType::Water, InjectorCMode::Rate), 2);
        assert_eq!(injector_ctrl(InjectorType::Gas, InjectorCMode::Rate), 3);
        assert_eq!(injector_ctrl(InjectorType::Gas, InjectorCMode::Bhp), 7);
    }
}
