//! Layer statistics
//!
//! The four quantities tracked at every point of a network, plus the record
//! type that pairs them with the kernel that produced them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::KernelSpec;

/// Canonical input image width/height
pub const DEFAULT_INPUT_SIZE: i64 = 224;

/// Center of the first input pixel (pixel-center addressing)
pub const FIRST_PIXEL_CENTER: f64 = 0.5;

/// Spatial statistics at one point of a network.
///
/// - `spatial_size`: feature map width/height
/// - `jump`: distance in input pixels between adjacent output units
/// - `receptive_field`: input pixels seen by one output unit
/// - `center_offset`: input coordinate of the first unit's receptive field center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerState {
    pub spatial_size: i64,
    pub jump: i64,
    pub receptive_field: i64,
    pub center_offset: f64,
}

impl LayerState {
    pub fn new(spatial_size: i64, jump: i64, receptive_field: i64, center_offset: f64) -> Self {
        Self {
            spatial_size,
            jump,
            receptive_field,
            center_offset,
        }
    }

    /// State of a raw input image of the given size
    pub fn input(spatial_size: i64) -> Self {
        Self::new(spatial_size, 1, 1, FIRST_PIXEL_CENTER)
    }
}

impl Default for LayerState {
    fn default() -> Self {
        Self::input(DEFAULT_INPUT_SIZE)
    }
}

/// Whole-valued offsets keep one decimal so `5.0` never prints as `5`.
fn format_offset(offset: f64) -> String {
    if offset.is_finite() && offset.fract() == 0.0 {
        format!("{:.1}", offset)
    } else {
        format!("{}", offset)
    }
}

impl fmt::Display for LayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LayerState(size={:<3}, jump={:<3}, receptive field={:<3}, start={:<5})",
            self.spatial_size,
            self.jump,
            self.receptive_field,
            format_offset(self.center_offset)
        )
    }
}

/// One entry of a trace: a state and the kernel that produced it.
///
/// `kernel` is `None` only for the input layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRecord {
    pub state: LayerState,
    pub kernel: Option<KernelSpec>,
}

impl LayerRecord {
    pub fn input(state: LayerState) -> Self {
        Self {
            state,
            kernel: None,
        }
    }

    pub fn produced_by(state: LayerState, kernel: KernelSpec) -> Self {
        Self {
            state,
            kernel: Some(kernel),
        }
    }

    pub fn is_input(&self) -> bool {
        self.kernel.is_none()
    }
}

impl fmt::Display for LayerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kernel {
            Some(kernel) => write!(f, "{} {}", self.state, kernel),
            None => write!(f, "{} Input layer", self.state),
        }
    }
}
