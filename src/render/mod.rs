//! Output emitters: RST pages, SWIG docstring stubs, mock Python module.

pub mod mock;
pub mod rst;
pub mod swig;

/// Comment line stamped into every generated file.
pub const GENERATED_BY: &str = "automatically generated by apigen from doxygen XML";
