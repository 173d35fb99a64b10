// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Search settings files.
//!
//! The binaries accept a JSON file describing how a search should be run, for example:
//!
//! ```json
//! { "depth": 5, "time_limit_ms": 2000, "cache_limit": 1000000, "threads": 4 }
//! ```
//!
//! Every field is optional.

use std::{fs, io, path::Path, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    eval::Evaluator,
    search::{SearchConfig, SearchOptions},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSettings {
    pub depth: u32,
    pub time_limit_ms: Option<u64>,
    pub node_limit: Option<u64>,
    pub cache_limit: Option<usize>,
    /// Number of search threads; a single thread when unset.
    pub threads: Option<usize>,
}

impl Default for SearchSettings {
    fn default() -> SearchSettings {
        SearchSettings {
            depth: 4,
            time_limit_ms: None,
            node_limit: None,
            cache_limit: None,
            threads: None,
        }
    }
}

impl SearchSettings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SearchSettings, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        SearchSettings::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<SearchSettings, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    pub fn search_config(&self, evaluator: Evaluator) -> SearchConfig {
        SearchConfig {
            evaluator,
            max_depth: self.depth,
            cache_limit: self.cache_limit,
        }
    }

    /// Search options carrying this file's limits. There is no stop flag.
    pub fn search_options(&self) -> SearchOptions<'static> {
        SearchOptions {
            time_limit: self.time_limit(),
            node_limit: self.node_limit,
            hard_stop: None,
        }
    }

    pub fn workers(&self) -> usize {
        self.threads.unwrap_or(1).max(1)
    }
}
