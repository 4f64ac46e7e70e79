// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rivulet Core — Configuration.
//!
//! # Design
//! Configuration layers: defaults < file < env < runtime.

mod config;

pub use config::{
    ConsumptionPolicy, ViewConfig, ENV_CONSUMPTION, ENV_LABEL, LABEL_MAX_LEN,
};
