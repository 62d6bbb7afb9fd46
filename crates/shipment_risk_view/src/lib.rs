#![forbid(unsafe_code)]

//! Result normalization between the shipment risk engine and its dashboard.
//!
//! [`adapt`] turns any raw engine result into a fully populated
//! [`ViewModel`]. It never fails: missing, misnamed, mis-scaled, or
//! contradictory fields degrade to documented defaults and each deviation
//! is recorded in `meta.warnings`.

pub mod adapter;
pub mod breakdown;
pub mod cli;
pub mod coerce;
pub mod commands;
pub mod config;
pub mod decisions;
pub mod defaults;
pub mod diagnostics;
pub mod doc;
pub mod drivers;
pub mod error;
pub mod intake;
pub mod logging;
pub mod loss;
pub mod model;
pub mod profile;
pub mod resolve;
pub mod scenarios;
pub mod shipment;
pub mod timeline;
pub mod util;

pub use adapter::{Adapted, Adapter, Clock, adapt, adapt_str};
pub use cli::run_from_env;
pub use config::AdapterConfig;
pub use defaults::build_default;
pub use error::{Result, ViewError};
pub use model::ViewModel;
