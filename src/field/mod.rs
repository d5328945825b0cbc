//! Receptive Field Module
//!
//! Core arithmetic:
//! - Kernel descriptors
//! - Layer statistics and trace records
//! - The one-step recurrence and the network driver that folds it

mod kernel;
mod net;
mod recurrence;
mod state;

pub use kernel::KernelSpec;
pub use net::{Net, Trace, DEFAULT_NET_NAME};
pub use recurrence::advance;
pub use state::{LayerRecord, LayerState, DEFAULT_INPUT_SIZE, FIRST_PIXEL_CENTER};
