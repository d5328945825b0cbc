//! Receptive field recurrence
//!
//! Maps the statistics of one layer and the next kernel to the statistics of
//! the layer that kernel produces:
//!
//! ```text
//! n'     = floor((n + 2p - k) / s) + 1
//! j'     = j * s
//! r'     = r + (k - 1) * j
//! start' = start + ((k - 1) / 2 - p) * j
//! ```
//!
//! The step never fails. A kernel wider than its padded input yields a
//! non-positive size, which is carried forward as-is. Values past the `i64`
//! range saturate at its bounds.

use log::warn;

use super::{KernelSpec, LayerState};

/// Narrow an exact result back to `i64`, clamping at the bounds.
fn saturate(value: i128, field: &str, kernel: &KernelSpec) -> i64 {
    i64::try_from(value).unwrap_or_else(|_| {
        warn!(
            "kernel '{}' overflows {}; clamping to the i64 range",
            kernel.label(),
            field
        );
        if value > 0 {
            i64::MAX
        } else {
            i64::MIN
        }
    })
}

/// Apply one kernel to a layer state
pub fn advance(state: &LayerState, kernel: &KernelSpec) -> LayerState {
    // i64 inputs times u32 kernel terms always fit in i128
    let k = i128::from(kernel.size());
    let s = i128::from(kernel.stride());
    let p = i128::from(kernel.padding());
    let n = i128::from(state.spatial_size);
    let j = i128::from(state.jump);
    let r = i128::from(state.receptive_field);

    // div_euclid floors for a positive divisor
    let spatial_size = saturate((n + 2 * p - k).div_euclid(s) + 1, "spatial size", kernel);
    let jump = saturate(j * s, "jump", kernel);
    let receptive_field = saturate(r + (k - 1) * j, "receptive field", kernel);
    let center_offset =
        state.center_offset + ((k - 1) as f64 / 2.0 - p as f64) * state.jump as f64;

    if spatial_size < 1 {
        warn!(
            "kernel '{}' reduces a {}-wide map to size {}",
            kernel.label(),
            state.spatial_size,
            spatial_size
        );
    }

    LayerState {
        spatial_size,
        jump,
        receptive_field,
        center_offset,
    }
}
