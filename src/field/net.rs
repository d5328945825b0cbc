//! Network driver
//!
//! A `Net` is a named, already-flattened kernel sequence. Tracing it folds
//! [`advance`] over the kernels and keeps every intermediate state.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{advance, KernelSpec, LayerRecord, LayerState};
use crate::error::{RfError, Result};

/// Name used when a topology does not provide one
pub const DEFAULT_NET_NAME: &str = "Net";

/// A linear convolution/pooling topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Net {
    name: String,
    kernels: Vec<KernelSpec>,
}

impl Net {
    /// Create a network from kernels in application order
    ///
    /// Branching architectures must be flattened by the caller first.
    pub fn new(name: impl Into<String>, kernels: Vec<KernelSpec>) -> Self {
        Self {
            name: name.into(),
            kernels,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kernels(&self) -> &[KernelSpec] {
        &self.kernels
    }

    /// Number of kernels (the trace has one more record)
    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    /// Check every kernel's size and stride
    pub fn validate(&self) -> Result<()> {
        self.kernels.iter().try_for_each(KernelSpec::validate)
    }

    /// Trace the network from the given input state
    pub fn trace(&self, initial: LayerState) -> Trace {
        let mut records = Vec::with_capacity(self.kernels.len() + 1);
        records.push(LayerRecord::input(initial));

        let mut current = initial;
        for kernel in &self.kernels {
            current = advance(&current, kernel);
            debug!("[{}] {} -> {}", self.name, kernel.label(), current);
            records.push(LayerRecord::produced_by(current, kernel.clone()));
        }

        Trace {
            name: self.name.clone(),
            records,
        }
    }

    /// Trace from a 224x224 input
    pub fn trace_default(&self) -> Trace {
        self.trace(LayerState::default())
    }
}

/// The per-layer statistics of one traced network.
///
/// The first record is always the input layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TraceFields")]
pub struct Trace {
    name: String,
    records: Vec<LayerRecord>,
}

/// Unchecked wire form of a trace
#[derive(Deserialize)]
struct TraceFields {
    name: String,
    records: Vec<LayerRecord>,
}

impl TryFrom<TraceFields> for Trace {
    type Error = RfError;

    fn try_from(fields: TraceFields) -> Result<Self> {
        match fields.records.first() {
            Some(first) if first.is_input() => Ok(Self {
                name: fields.name,
                records: fields.records,
            }),
            _ => Err(RfError::invalid_topology(
                &fields.name,
                "trace must start with the input layer",
            )),
        }
    }
}

impl Trace {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[LayerRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// State after the last kernel (the input state for an empty net)
    pub fn output(&self) -> LayerState {
        // records always holds at least the input layer
        self.records[self.records.len() - 1].state
    }

    /// Find the record produced by the kernel with this label
    pub fn find(&self, label: &str) -> Option<&LayerRecord> {
        self.records
            .iter()
            .find(|r| r.kernel.as_ref().is_some_and(|k| k.label() == label))
    }

    /// Serialize the trace to JSON
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a LayerRecord;
    type IntoIter = std::slice::Iter<'a, LayerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{stars}{}{stars}", self.name, stars = "*".repeat(10))?;
        for record in &self.records {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn kernel(size: u32, stride: u32, padding: u32, label: &str) -> KernelSpec {
        KernelSpec::new(size, stride, padding, label).unwrap()
    }

    #[test]
    fn test_empty_net_traces_input_only() {
        let net = Net::new("empty", vec![]);
        let trace = net.trace_default();
        assert_eq!(trace.len(), 1);
        assert!(trace.records()[0].is_input());
        assert_eq!(trace.output(), LayerState::default());
    }

    #[test]
    fn test_trace_matches_nested_advance() {
        let k1 = kernel(7, 2, 3, "conv1");
        let k2 = kernel(3, 2, 1, "pool1");
        let net = Net::new("two", vec![k1.clone(), k2.clone()]);
        let start = LayerState::input(224);

        let trace = net.trace(start);
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.output(), advance(&advance(&start, &k1), &k2));
        assert_eq!(trace.output().spatial_size, 56);
        assert_eq!(trace.output().receptive_field, 11);
        assert_relative_eq!(trace.output().center_offset, 0.5);
    }

    #[test]
    fn test_trace_is_repeatable() {
        let net = Net::new(
            "net",
            vec![kernel(11, 4, 0, "conv1"), kernel(3, 2, 0, "pool1")],
        );
        let before = net.clone();
        let a = net.trace(LayerState::input(227));
        let b = net.trace(LayerState::input(227));
        assert_eq!(a, b);
        assert_eq!(net, before);
    }

    #[test]
    fn test_find_by_label() {
        let net = Net::new(
            "net",
            vec![kernel(11, 4, 0, "conv1"), kernel(3, 2, 0, "pool1")],
        );
        let trace = net.trace(LayerState::input(227));
        assert_eq!(trace.find("pool1").unwrap().state.spatial_size, 27);
        assert!(trace.find("missing").is_none());
    }

    #[test]
    fn test_report_banner() {
        let net = Net::new("tiny", vec![kernel(3, 1, 1, "conv")]);
        let report = net.trace(LayerState::input(8)).to_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "**********tiny**********");
        assert!(lines[1].ends_with("Input layer"));
        assert!(lines[2].ends_with("name=conv)"));
    }

    #[test]
    fn test_trace_json_round_trip() {
        let net = Net::new("tiny", vec![kernel(3, 1, 1, "conv")]);
        let trace = net.trace(LayerState::input(8));
        let text = serde_json::to_string(&trace).unwrap();
        let parsed: Trace = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, trace);
        assert_eq!(parsed.output().spatial_size, 8);
    }

    #[test]
    fn test_trace_without_input_layer_rejected() {
        let empty = serde_json::from_str::<Trace>(r#"{"name": "x", "records": []}"#);
        assert!(empty.is_err());

        let net = Net::new("tiny", vec![kernel(3, 1, 1, "conv")]);
        let mut json = net.trace(LayerState::input(8)).to_json().unwrap();
        json["records"].as_array_mut().unwrap().remove(0);
        assert!(serde_json::from_value::<Trace>(json).is_err());
    }

    #[test]
    fn test_trace_to_json() {
        let net = Net::new("tiny", vec![kernel(3, 1, 1, "conv")]);
        let json = net.trace(LayerState::input(8)).to_json().unwrap();
        assert_eq!(json["name"], "tiny");
        assert_eq!(json["records"][0]["kernel"], serde_json::Value::Null);
        assert_eq!(json["records"][1]["state"]["receptive_field"], 3);
        assert_eq!(json["records"][1]["kernel"]["label"], "conv");
    }
}
