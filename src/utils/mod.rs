//! The `utils` module provides the pieces shared by every other module of
//! the worker: the error taxonomy and logging initialisation.

pub mod error;
pub mod logging;
