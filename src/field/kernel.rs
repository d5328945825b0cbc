//! Kernel descriptors
//!
//! A kernel is one convolution or pooling window in a flattened topology.
//! Width and height are assumed equal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RfError, Result};

/// One square convolution/pooling window.
///
/// Size and stride are checked at construction, so every `KernelSpec` in
/// circulation satisfies `size >= 1` and `stride >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "KernelFields")]
pub struct KernelSpec {
    size: u32,
    stride: u32,
    padding: u32,
    label: String,
}

/// Unchecked wire form of a kernel
#[derive(Deserialize)]
struct KernelFields {
    size: u32,
    stride: u32,
    #[serde(default)]
    padding: u32,
    #[serde(default)]
    label: String,
}

impl TryFrom<KernelFields> for KernelSpec {
    type Error = RfError;

    fn try_from(fields: KernelFields) -> Result<Self> {
        KernelSpec::new(fields.size, fields.stride, fields.padding, fields.label)
    }
}

impl KernelSpec {
    /// Create a kernel descriptor
    ///
    /// # Errors
    /// Returns `InvalidTopology` if `size` or `stride` is zero.
    pub fn new(size: u32, stride: u32, padding: u32, label: impl Into<String>) -> Result<Self> {
        let kernel = Self {
            size,
            stride,
            padding,
            label: label.into(),
        };
        kernel.validate()?;
        Ok(kernel)
    }

    /// Build a kernel from constants known to be valid
    pub(crate) fn from_parts(size: u32, stride: u32, padding: u32, label: String) -> Self {
        debug_assert!(size >= 1 && stride >= 1, "invalid built-in kernel {label}");
        Self {
            size,
            stride,
            padding,
            label,
        }
    }

    /// Re-check the construction constraints
    pub fn validate(&self) -> Result<()> {
        if self.size < 1 {
            return Err(RfError::invalid_topology(
                &self.label,
                "kernel size must be at least 1",
            ));
        }
        if self.stride < 1 {
            return Err(RfError::invalid_topology(
                &self.label,
                "stride must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// True when stride 1 and padding `(size - 1) / 2` on an odd size
    pub fn is_same_padding(&self) -> bool {
        self.stride == 1 && self.size % 2 == 1 && self.padding == (self.size - 1) / 2
    }
}

impl fmt::Display for KernelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Kernel(kernel size={:<2}, stride={}, padding={}, name={})",
            self.size, self.stride, self.padding, self.label
        )
    }
}
