//! LOGIHEAD: RUNSPEC switches as logical flags.

use super::layout::{lh, FormatLayout};
use crate::types::Runspec;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogiHead {
    pub is_live_oil: bool,
    pub is_wet_gas: bool,
    pub dir_kr: bool,
    pub e300_radial: bool,
    pub e100_radial: bool,
    pub hysteresis: bool,
    pub end_scale: bool,
    pub dir_eps: bool,
    pub rev_eps: bool,
    pub alt_eps: bool,
    pub const_co: bool,
    pub has_msw: bool,
    pub network: bool,
}

impl LogiHead {
    pub fn to_array(&self, layout: &FormatLayout) -> Vec<bool> {
        let mut v = vec![false; layout.logihead_len];
        v[lh::IS_LIVE_OIL] = self.is_live_oil;
        v[lh::IS_WET_GAS] = self.is_wet_gas;
        v[lh::DIR_KR] = self.dir_kr;
        v[lh::E300_RADIAL] = self.e300_radial;
        v[lh::E100_RADIAL] = self.e100_radial;
        v[lh::HYSTERESIS] = self.hysteresis;
        v[lh::END_SCALE] = self.end_scale;
        v[lh::DIR_EPS] = self.dir_eps;
        v[lh::REV_EPS] = self.rev_eps;
        v[lh::ALT_EPS] = self.alt_eps;
        v[lh::CONST_CO] = self.const_co;
        v[lh::HAS_MSW] = self.has_msw;
        v[lh::NETWORK] = self.network;
        v
    }
}

/// LOGIHEAD depends on RUNSPEC only, so it is identical for every step.
pub fn create_logi_head(runspec: &Runspec) -> LogiHead {
    let sw = &runspec.switches;
    LogiHead {
        is_live_oil: sw.dissolved_gas,
        is_wet_gas: sw.vaporized_oil,
        dir_kr: sw.directional_relperm,
        e300_radial: sw.e300_radial,
        e100_radial: sw.e100_radial,
        hysteresis: sw.hysteresis,
        end_scale: sw.endpoint_scaling,
        dir_eps: sw.directional_eps,
        rev_eps: sw.reversible_eps,
        alt_eps: sw.alternative_eps,
        const_co: sw.constant_compressibility_oil,
        has_msw: runspec.segment_dims.max_segmented_wells > 0,
        network: sw.network,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_land_in_their_slots() {
        let mut runspec = Runspec::default();
        runspec.switches.dissolved_gas = true;
        runspec.switches.vaporized_oil = true;
        runspec.segment_dims.max_segmented_wells = 2;

        let layout = FormatLayout::default();
        let v = create_logi_head(&runspec).to_array(&layout);

        assert_eq!(v.len(), 121);
        assert!(v[lh::IS_LIVE_OIL]);
        assert!(v[lh::IS_WET_GAS]);
        assert!(v[lh::HAS_MSW]);
        assert!(!v[lh::NETWORK]);
        assert_eq!(v.iter().filter(|&&b| b).count(), 3);
    }

    #[test]
    fn test_default_runspec_is_all_false() {
        let v = create_logi_head(&Runspec::default()).to_array(&FormatLayout::default());
        assert!(v.iter().all(|&b| !b));
    }
}
