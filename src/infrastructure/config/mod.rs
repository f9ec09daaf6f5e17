//! Infrastructure configuration modules.

pub mod gate;
pub mod logging;
pub mod settings;
