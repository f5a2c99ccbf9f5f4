//! Volparams - parameters for voltage imaging analysis
//!
//! This library groups the configuration of a voltage imaging pipeline
//! (data source metadata, spike detection, motion correction) into named
//! parameter groups with strict lookup and lenient bulk updates.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod config;
pub mod params;

// Re-export commonly used items for easier access
pub use config::{load_overrides, ConfigError};
pub use params::{
    DataParams, MotionParams, ParamGroup, ParamMap, ParamValue, ParamsError, SpikeParams,
    VolParams, VolParamsConfig,
};
