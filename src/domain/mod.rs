//! Domain layer modules
//!
//! This module contains the core logic:
//! - `routing`: Route registry with duplicate detection
//! - `view`: View resolution, partial inclusion and variable substitution

pub mod routing;
pub mod view;
