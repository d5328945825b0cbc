//! rfield - Receptive Field Arithmetic
//!
//! For a linear stack of convolution and pooling kernels, computes at every
//! layer the feature map size, the jump (input pixels between adjacent
//! units), the receptive field size and the receptive field center of the
//! first unit.
//!
//! # Architecture
//!
//! - `field`: kernel/state types, the one-step recurrence and the network driver
//! - `zoo`: flattened AlexNet, VGG16 and ResNet-50 topologies
//! - `topology`: JSON topology files
//! - `cli`: command implementations behind `rfield-cli`
//!
//! ```
//! use rfield::field::{KernelSpec, LayerState, Net};
//!
//! let net = Net::new("stem", vec![KernelSpec::new(11, 4, 0, "conv1").unwrap()]);
//! let trace = net.trace(LayerState::input(227));
//! assert_eq!(trace.output().spatial_size, 55);
//! ```

pub mod cli;
pub mod error;
pub mod field;
pub mod topology;
pub mod zoo;

pub use error::{Result, RfError};
pub use field::{advance, KernelSpec, LayerRecord, LayerState, Net, Trace};
