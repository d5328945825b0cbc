//! Topology files
//!
//! JSON description of a network and its input:
//!
//! ```json
//! {
//!   "name": "tiny",
//!   "input": { "size": 32 },
//!   "kernels": [
//!     { "size": 3, "stride": 1, "padding": 1, "label": "conv1" },
//!     [2, 2, 0, "pool1"]
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{RfError, Result};
use crate::field::{
    KernelSpec, LayerState, Net, DEFAULT_INPUT_SIZE, DEFAULT_NET_NAME, FIRST_PIXEL_CENTER,
};

/// Starting state as written in a topology file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_input_size")]
    pub size: i64,
    #[serde(default = "one")]
    pub jump: i64,
    #[serde(default = "one")]
    pub receptive_field: i64,
    #[serde(default = "default_center_offset")]
    pub center_offset: f64,
}

fn default_input_size() -> i64 {
    DEFAULT_INPUT_SIZE
}

fn one() -> i64 {
    1
}

fn default_center_offset() -> f64 {
    FIRST_PIXEL_CENTER
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_INPUT_SIZE,
            jump: 1,
            receptive_field: 1,
            center_offset: FIRST_PIXEL_CENTER,
        }
    }
}

impl From<&InputConfig> for LayerState {
    fn from(input: &InputConfig) -> Self {
        LayerState::new(
            input.size,
            input.jump,
            input.receptive_field,
            input.center_offset,
        )
    }
}

/// A kernel entry, either spelled out or as `[size, stride, padding, label]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KernelEntry {
    Compact(u32, u32, u32, String),
    Full {
        size: u32,
        stride: u32,
        #[serde(default)]
        padding: u32,
        #[serde(default)]
        label: Option<String>,
    },
}

impl KernelEntry {
    /// Checked kernel; unlabeled entries are named `layer<position>`
    pub fn to_kernel(&self, position: usize) -> Result<KernelSpec> {
        match self {
            KernelEntry::Compact(size, stride, padding, label) => {
                KernelSpec::new(*size, *stride, *padding, label.clone())
            }
            KernelEntry::Full {
                size,
                stride,
                padding,
                label,
            } => {
                let label = label
                    .clone()
                    .unwrap_or_else(|| format!("layer{}", position));
                KernelSpec::new(*size, *stride, *padding, label)
            }
        }
    }
}

/// Parsed topology file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub input: Option<InputConfig>,
    pub kernels: Vec<KernelEntry>,
}

impl TopologyConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a topology file from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RfError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        info!("Loading topology: {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Build the network, checking every kernel
    pub fn net(&self) -> Result<Net> {
        let kernels = self
            .kernels
            .iter()
            .enumerate()
            .map(|(i, entry)| entry.to_kernel(i + 1))
            .collect::<Result<Vec<_>>>()?;
        let name = self.name.as_deref().unwrap_or(DEFAULT_NET_NAME);
        Ok(Net::new(name, kernels))
    }

    /// Starting state, the 224x224 default when the file has none
    pub fn input_state(&self) -> LayerState {
        self.input
            .as_ref()
            .map(LayerState::from)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_mixed_kernels() {
        let config = TopologyConfig::from_json_str(
            r#"{
                "name": "tiny",
                "input": { "size": 32 },
                "kernels": [
                    { "size": 3, "stride": 1, "padding": 1, "label": "conv1" },
                    [2, 2, 0, "pool1"],
                    { "size": 1, "stride": 1 }
                ]
            }"#,
        )
        .unwrap();

        let net = config.net().unwrap();
        assert_eq!(net.name(), "tiny");
        assert_eq!(net.len(), 3);
        assert_eq!(net.kernels()[1], KernelSpec::new(2, 2, 0, "pool1").unwrap());
        assert_eq!(net.kernels()[2].label(), "layer3");
        assert_eq!(config.input_state(), LayerState::input(32));
    }

    #[test]
    fn test_defaults() {
        let config = TopologyConfig::from_json_str(r#"{ "kernels": [] }"#).unwrap();
        assert_eq!(config.net().unwrap().name(), DEFAULT_NET_NAME);
        assert_eq!(config.input_state(), LayerState::default());
    }

    #[test]
    fn test_zero_stride_rejected() {
        let config =
            TopologyConfig::from_json_str(r#"{ "kernels": [[3, 0, 1, "broken"]] }"#).unwrap();
        let err = config.net().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TOPOLOGY");
    }

    #[test]
    fn test_malformed_json() {
        let err = TopologyConfig::from_json_str(r#"{ "kernels": [{ "stride": 1 }] }"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_huge_values_trace_without_overflow() {
        let config = TopologyConfig::from_json_str(
            r#"{
                "input": { "size": 9223372036854775807 },
                "kernels": [
                    [1, 1, 1, "a"],
                    [1, 4000000000, 0, "b"],
                    [1, 4000000000, 0, "c"],
                    [1, 4000000000, 0, "d"]
                ]
            }"#,
        )
        .unwrap();
        let trace = config.net().unwrap().trace(config.input_state());
        assert_eq!(trace.records()[1].state.spatial_size, i64::MAX);
        assert_eq!(trace.output().jump, i64::MAX);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "name": "f", "kernels": [[11, 4, 0, "conv1"]] }}"#).unwrap();

        let config = TopologyConfig::load(file.path()).unwrap();
        let trace = config.net().unwrap().trace(LayerState::input(227));
        assert_eq!(trace.output().spatial_size, 55);
    }

    #[test]
    fn test_missing_file() {
        let err = TopologyConfig::load(Path::new("/nonexistent/net.json")).unwrap_err();
        assert!(matches!(err, RfError::ConfigNotFound { .. }));
    }
}
