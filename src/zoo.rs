//! Built-in topologies
//!
//! Flattened kernel lists for a few well known image classifiers. Residual
//! networks are reduced to their main path: shortcut branches add no kernels.

use clap::ValueEnum;

use crate::error::{RfError, Result};
use crate::field::{KernelSpec, LayerState, Net, DEFAULT_INPUT_SIZE};

/// AlexNet's published input resolution
pub const ALEXNET_INPUT_SIZE: i64 = 227;

/// A built-in network
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Architecture {
    Alexnet,
    Vgg16,
    Resnet50,
}

impl Architecture {
    pub const ALL: [Architecture; 3] = [
        Architecture::Alexnet,
        Architecture::Vgg16,
        Architecture::Resnet50,
    ];

    pub fn net(self) -> Net {
        match self {
            Architecture::Alexnet => alexnet(),
            Architecture::Vgg16 => vgg16(),
            Architecture::Resnet50 => resnet50(),
        }
    }

    /// Input resolution the network was designed for
    pub fn input_size(self) -> i64 {
        match self {
            Architecture::Alexnet => ALEXNET_INPUT_SIZE,
            Architecture::Vgg16 | Architecture::Resnet50 => DEFAULT_INPUT_SIZE,
        }
    }

    pub fn input_state(self) -> LayerState {
        LayerState::input(self.input_size())
    }
}

fn k(size: u32, stride: u32, padding: u32, label: impl Into<String>) -> KernelSpec {
    KernelSpec::from_parts(size, stride, padding, label.into())
}

pub fn alexnet() -> Net {
    Net::new(
        "alexnet",
        vec![
            k(11, 4, 0, "conv1"),
            k(3, 2, 0, "pool1"),
            k(5, 1, 2, "conv2"),
            k(3, 2, 0, "pool2"),
            k(3, 1, 1, "conv3"),
            k(3, 1, 1, "conv4"),
            k(3, 1, 1, "conv5"),
            k(3, 2, 0, "pool5"),
            k(6, 1, 0, "fc6"),
            k(1, 1, 0, "fc7"),
        ],
    )
}

pub fn vgg16() -> Net {
    let mut kernels = Vec::with_capacity(20);
    for (block, convs) in [(1, 2), (2, 2), (3, 3), (4, 3), (5, 3)] {
        for i in 1..=convs {
            kernels.push(k(3, 1, 1, format!("conv{block}_{i}")));
        }
        kernels.push(k(2, 2, 0, format!("pool{block}")));
    }
    // fully connected layers seen as convolutions over the pool5 map
    kernels.push(k(7, 1, 0, "fc6"));
    kernels.push(k(1, 1, 0, "fc7"));
    Net::new("VGG16", kernels)
}

fn unit(name: &str, stride: u32) -> Vec<KernelSpec> {
    vec![
        k(1, 1, 0, format!("{name}/conv1")),
        k(3, stride, 1, format!("{name}/conv2")),
        k(1, 1, 0, format!("{name}/conv3")),
    ]
}

fn stage(units: usize, name: &str, first_stride: u32) -> Vec<KernelSpec> {
    (1..=units)
        .flat_map(|i| {
            let stride = if i == 1 { first_stride } else { 1 };
            unit(&format!("{name}/unit{i}"), stride)
        })
        .collect()
}

/// The 1x1 / 3x3 / 1x1 main path of one bottleneck unit
///
/// # Errors
/// Returns `InvalidTopology` if `stride` is zero.
pub fn bottleneck(name: &str, stride: u32) -> Result<Vec<KernelSpec>> {
    KernelSpec::new(3, stride, 1, format!("{name}/conv2"))?;
    Ok(unit(name, stride))
}

/// `units` bottlenecks; only the first one downsamples
///
/// # Errors
/// Returns `InvalidTopology` if `first_stride` is zero.
pub fn resnet_block(units: usize, name: &str, first_stride: u32) -> Result<Vec<KernelSpec>> {
    if first_stride < 1 {
        return Err(RfError::invalid_topology(
            &format!("{name}/unit1/conv2"),
            "stride must be at least 1",
        ));
    }
    Ok(stage(units, name, first_stride))
}

pub fn resnet50() -> Net {
    let mut kernels = vec![k(7, 2, 3, "conv1"), k(3, 2, 1, "pool1")];
    kernels.extend(stage(3, "block1", 1));
    kernels.extend(stage(4, "block2", 2));
    kernels.extend(stage(6, "block3", 2));
    kernels.extend(stage(3, "block4", 2));
    Net::new("ResNet-50", kernels)
}
