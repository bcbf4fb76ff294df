//! Veld engine crate.
//!
//! Foundation pieces shared by the higher UI layers: integer workspace
//! geometry and logger bootstrap.

pub mod coords;
pub mod logging;
