//! Services layer (ports + adapters).
//!
//! - `ports`: data contracts shared with the kernel.
//! - `adapters`: OS specific implementations (paths, file IO).

pub mod adapters;
pub mod ports;
