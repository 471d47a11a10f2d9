// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration loaded from environment variables.

use roofline_topology::Projection;

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingConfig {
    /// How point coordinates are taken from the survey.
    pub projection: Projection,
    /// Reconstruct faces on the rayon pool.
    pub parallel: bool,
    /// Pool size for parallel reconstruction. `0` uses the global pool.
    pub worker_threads: usize,
    /// Keep empty and degenerate faces in the catalog.
    pub keep_invalid: bool,
}

impl ProcessingConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            projection: lookup("ROOFLINE_PROJECTION")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.projection),
            parallel: lookup("ROOFLINE_PARALLEL")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.parallel),
            worker_threads: lookup("ROOFLINE_WORKER_THREADS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.worker_threads),
            keep_invalid: lookup("ROOFLINE_KEEP_INVALID")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.keep_invalid),
        }
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_parallel(mut self, worker_threads: usize) -> Self {
        self.parallel = true;
        self.worker_threads = worker_threads;
        self
    }

    pub fn with_keep_invalid(mut self, keep_invalid: bool) -> Self {
        self.keep_invalid = keep_invalid;
        self
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            projection: Projection::Native,
            parallel: false,
            worker_threads: 0,
            keep_invalid: true,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn config(vars: &[(&str, &str)]) -> ProcessingConfig {
        let vars: FxHashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ProcessingConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config(&[]), ProcessingConfig::default());
    }

    #[test]
    fn test_reads_every_variable() {
        let cfg = config(&[
            ("ROOFLINE_PROJECTION", "planar"),
            ("ROOFLINE_PARALLEL", "yes"),
            ("ROOFLINE_WORKER_THREADS", " 4 "),
            ("ROOFLINE_KEEP_INVALID", "0"),
        ]);
        assert_eq!(cfg.projection, Projection::Planar);
        assert!(cfg.parallel);
        assert_eq!(cfg.worker_threads, 4);
        assert!(!cfg.keep_invalid);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let cfg = config(&[
            ("ROOFLINE_PROJECTION", "isometric"),
            ("ROOFLINE_PARALLEL", "sometimes"),
            ("ROOFLINE_WORKER_THREADS", "-2"),
        ]);
        assert_eq!(cfg, ProcessingConfig::default());
    }
}
