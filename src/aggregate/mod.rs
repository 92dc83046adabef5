//! Per-entity aggregate arrays (wells, groups, connections, segments)
//!
//! Record counts and strides come from an assembled INTEHEAD, so the
//! aggregates always agree with the header written next to them.

pub mod connections;
pub mod groups;
pub mod segments;
pub mod wells;
pub mod windowed;

pub use connections::AggregateConnectionData;
pub use groups::AggregateGroupData;
pub use segments::AggregateMswData;
pub use wells::AggregateWellData;
pub use windowed::WindowedArray;

use crate::error::{RestartError, Result};
use crate::header::layout::ih;

/// Limit value for an unset rate or pressure control.
pub const UNLIMITED: f32 = 1.0e20;

/// Character width of string array items.
pub const STRING_WIDTH: usize = 8;

/// Non-negative INTEHEAD item as a count.
pub(crate) fn ih_count(inte_head: &[i32], index: usize, name: &str) -> Result<usize> {
    let value = inte_head
        .get(index)
        .copied()
        .ok_or_else(|| RestartError::invalid(format!("INTEHEAD has no item {name} ({index})")))?;
    usize::try_from(value)
        .map_err(|_| RestartError::invalid(format!("INTEHEAD item {name} is negative: {value}")))
}

/// Report step 0 declares no entities.
pub(crate) fn is_initial(inte_head: &[i32]) -> bool {
    inte_head.get(ih::REPORT_STEP).copied().unwrap_or(0) == 0
}

/// A record stride must hold every item this crate writes into it.
pub(crate) fn ensure_stride(name: &str, stride: usize, highest_item: usize) -> Result<()> {
    if stride <= highest_item {
        return Err(RestartError::invalid(format!(
            "{name} stride {stride} too small; item {highest_item} is written"
        )));
    }
    Ok(())
}

/// Entity name padded to the fixed string width.
pub(crate) fn eclipse_string(name: &str) -> Result<String> {
    if name.len() > STRING_WIDTH {
        return Err(RestartError::invalid(format!(
            "name '{name}' exceeds {STRING_WIDTH} characters"
        )));
    }
    Ok(format!("{name:<STRING_WIDTH$}"))
}

pub(crate) fn blank_string() -> String {
    " ".repeat(STRING_WIDTH)
}

pub(crate) fn limit_or_unset(value: Option<f64>) -> f32 {
    #[allow(clippy::cast_possible_truncation)]
    value.map_or(UNLIMITED, |v| v as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eclipse_string_padding() {
        assert_eq!(eclipse_string("OP_1").unwrap(), "OP_1    ");
        assert_eq!(eclipse_string("ABCDEFGH").unwrap(), "ABCDEFGH");
        assert!(eclipse_string("TOO_LONG_1").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_ih_count_rejects_negative() {
        let mut v = vec![0; 411];
        v[ih::NWELLS] = -1;
        assert!(ih_count(&v, ih::NWELLS, "NWELLS").is_err());
        v[ih::NWELLS] = 4;
        assert_eq!(ih_count(&v, ih::NWELLS, "NWELLS").unwrap(), 4);
    }

    #[test]
    fn test_ensure_stride() {
        assert!(ensure_stride("IWEL", 155, 71).is_ok());
        assert!(ensure_stride("IWEL", 71, 71).is_err());
    }
}
