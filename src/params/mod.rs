//! Parameter groups for voltage imaging
//!
//! This module holds the configuration consumed by the spike detection and
//! motion correction stages, split into named groups:
//! - `data`: movie files, frame rate and ROI metadata
//! - `volspike`: spike detection tuning
//! - `motion`: motion correction tuning
pub mod defaults;
pub mod value;

pub use defaults::{DataParams, MotionParams, SpikeParams, VolParamsConfig};
pub use value::ParamValue;

use std::collections::BTreeMap;

/// Key/value mapping of a single parameter group
pub type ParamGroup = BTreeMap<String, ParamValue>;

/// Flat, ungrouped key/value mapping supplied by callers as overrides
pub type ParamMap = BTreeMap<String, ParamValue>;

/// Name of the data source group
pub const DATA: &str = "data";
/// Name of the spike detection group
pub const VOLSPIKE: &str = "volspike";
/// Name of the motion correction group
pub const MOTION: &str = "motion";

/// Parameter store for the voltage imaging pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct VolParams {
    groups: BTreeMap<String, ParamGroup>,
}

impl VolParams {
    /// Create a store from typed defaults, then apply the override mapping.
    ///
    /// Each override is matched by key name against every group. Keys that match
    /// no group are reported and dropped.
    pub fn new(config: VolParamsConfig, overrides: &ParamMap) -> Self {
        let mut groups = BTreeMap::new();
        groups.insert(DATA.to_string(), ParamGroup::from(config.data));
        groups.insert(VOLSPIKE.to_string(), ParamGroup::from(config.volspike));
        groups.insert(MOTION.to_string(), ParamGroup::from(config.motion));

        let mut params = VolParams { groups };
        params.change_params(overrides, false);
        params
    }

    /// Create a store from default values plus overrides
    pub fn with_overrides(overrides: &ParamMap) -> Self {
        Self::new(VolParamsConfig::default(), overrides)
    }

    /// Add key/value pairs to a group.
    ///
    /// Existing keys are overwritten but never deleted. Keys the group does not
    /// already hold are skipped unless `set_if_not_exists` is true; with `verbose`
    /// each skipped key is logged.
    pub fn set(
        &mut self,
        group: &str,
        updates: &ParamMap,
        set_if_not_exists: bool,
        verbose: bool,
    ) -> Result<(), ParamsError> {
        let entries = self
            .groups
            .get_mut(group)
            .ok_or_else(|| ParamsError::UnknownGroup(group.to_string()))?;
        update_group(group, entries, updates, set_if_not_exists, verbose);
        Ok(())
    }

    /// Get the value of a key within a group
    pub fn get(&self, group: &str, key: &str) -> Result<&ParamValue, ParamsError> {
        self.get_group(group)?
            .get(key)
            .ok_or_else(|| ParamsError::UnknownKey {
                group: group.to_string(),
                key: key.to_string(),
            })
    }

    /// Get the full key/value mapping of a group
    pub fn get_group(&self, group: &str) -> Result<&ParamGroup, ParamsError> {
        self.groups
            .get(group)
            .ok_or_else(|| ParamsError::UnknownGroup(group.to_string()))
    }

    /// Apply updates to every group, leaving unknown keys untouched.
    ///
    /// Keys present in no group are logged as not found; updates already applied
    /// to matching groups are kept.
    pub fn change_params(&mut self, updates: &ParamMap, verbose: bool) -> &mut Self {
        for (group, entries) in self.groups.iter_mut() {
            update_group(group, entries, updates, false, verbose);
        }

        for key in self.unmatched_keys(updates) {
            log::warn!("No parameter {} found!", key);
        }

        self
    }

    /// Keys of `updates` that exist in no group, in mapping order
    pub fn unmatched_keys<'a>(&self, updates: &'a ParamMap) -> Vec<&'a str> {
        updates
            .keys()
            .filter(|key| !self.groups.values().any(|entries| entries.contains_key(*key)))
            .map(String::as_str)
            .collect()
    }

    /// Names of all registered groups
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }
}

fn update_group(
    group: &str,
    entries: &mut ParamGroup,
    updates: &ParamMap,
    set_if_not_exists: bool,
    verbose: bool,
) {
    for (key, value) in updates {
        match entries.get_mut(key) {
            Some(current) => {
                if current.differs(value) {
                    log::warn!(
                        "Changing key {} in group {} from {} to {}",
                        key, group, current, value
                    );
                }
                *current = value.clone();
            }
            None if set_if_not_exists => {
                log::info!("Adding key {} to group {} with value {}", key, group, value);
                entries.insert(key.clone(), value.clone());
            }
            None => {
                if verbose {
                    log::warn!(
                        "NOT setting value of key {} in group {}, because no prior key existed",
                        key, group
                    );
                }
            }
        }
    }
}

impl Default for VolParams {
    fn default() -> Self {
        Self::with_overrides(&ParamMap::new())
    }
}

/// Parameter store error types
#[derive(Debug, Clone, PartialEq)]
pub enum ParamsError {
    /// No group registered under this name
    UnknownGroup(String),
    /// Group exists but holds no such key
    UnknownKey {
        /// Group that was searched
        group: String,
        /// Missing key
        key: String,
    },
}

impl std::fmt::Display for ParamsError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ParamsError::UnknownGroup(group) => write!(f, "No group in VolParams named {}", group),
            ParamsError::UnknownKey { group, key } => {
                write!(f, "No key {} in group {}", key, group)
            }
        }
    }
}

impl std::error::Error for ParamsError {}

// Current Functionality:
// - Holds the data, volspike and motion groups built from typed defaults.
// - Applies flat override mappings to every group by key name, reporting unknown keys.
// - Strict lookup (get/get_group) and lenient updates (set/change_params).
