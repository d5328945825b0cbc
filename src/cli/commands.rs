//! CLI Command Implementations
//!
//! Each command builds a trace and renders it. Rendering returns a string so
//! the binary decides where it goes.

use std::path::Path;

use log::info;

use super::ReportOptions;
use crate::error::Result;
use crate::field::{LayerState, Trace};
use crate::topology::TopologyConfig;
use crate::zoo::Architecture;

/// Render a trace as text or pretty JSON
pub fn render(trace: &Trace, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(trace)?)
    } else {
        Ok(trace.to_string())
    }
}

fn with_input_size(state: LayerState, input_size: Option<i64>) -> LayerState {
    match input_size {
        Some(size) => LayerState {
            spatial_size: size,
            ..state
        },
        None => state,
    }
}

/// Trace a built-in network.
pub fn show(architecture: Architecture, options: &ReportOptions) -> Result<String> {
    info!("Tracing built-in network: {:?}", architecture);

    let net = architecture.net();
    let initial = with_input_size(architecture.input_state(), options.input_size);
    render(&net.trace(initial), options.json)
}

/// Trace a network loaded from a topology file.
pub fn trace_file(path: &Path, options: &ReportOptions) -> Result<String> {
    let config = TopologyConfig::load(path)?;
    let net = config.net()?;
    info!("Tracing '{}' ({} kernels)", net.name(), net.len());

    let initial = with_input_size(config.input_state(), options.input_size);
    render(&net.trace(initial), options.json)
}

/// Trace all built-in networks at their native input size.
pub fn all() -> Result<String> {
    let options = ReportOptions::default();
    let reports = Architecture::ALL
        .iter()
        .map(|arch| show(*arch, &options))
        .collect::<Result<Vec<_>>>()?;
    Ok(reports.join("\n"))
}
