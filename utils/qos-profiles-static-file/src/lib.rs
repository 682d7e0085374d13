/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

use dds_gateway::qos::{QosProfile, QosProfileRegistry};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, canonicalize};
use std::path::PathBuf;
use tracing::{debug, error, warn};

#[derive(Debug)]
pub enum StaticFileError {
    NotFound(String),
    Unreadable(String),
    InvalidJson(String),
}

impl Display for StaticFileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StaticFileError::NotFound(reason) => {
                write!(f, "static QoS profile file not found: {reason}")
            }
            StaticFileError::Unreadable(reason) => write!(f, "unable to read file: {reason}"),
            StaticFileError::InvalidJson(reason) => write!(f, "unable to parse JSON: {reason}"),
        }
    }
}

impl Error for StaticFileError {}

/// QoS profiles kept in a JSON file holding an array of profile objects.
///
/// Entries that do not describe a valid profile are logged and skipped.
pub struct QosProfilesStaticFile {
    static_file: String,
}

impl QosProfilesStaticFile {
    pub fn new(static_file: String) -> Self {
        QosProfilesStaticFile { static_file }
    }

    pub fn fetch_profiles(&self) -> Result<Vec<QosProfile>, StaticFileError> {
        let profiles_json_file = PathBuf::from(&self.static_file);
        debug!("profiles_json_file: {profiles_json_file:?}");

        let profiles_json_file = canonicalize(profiles_json_file)
            .map_err(|e| StaticFileError::NotFound(format!("{}: {e}", self.static_file)))?;
        let data = fs::read_to_string(&profiles_json_file)
            .map_err(|e| StaticFileError::Unreadable(format!("{profiles_json_file:?}: {e}")))?;
        let res: Value =
            serde_json::from_str(&data).map_err(|e| StaticFileError::InvalidJson(e.to_string()))?;

        let Some(entries) = res.as_array() else {
            return Err(StaticFileError::InvalidJson(
                "expected an array of QoS profiles".to_string(),
            ));
        };

        let mut profiles = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_value::<QosProfile>(entry.clone()) {
                Ok(profile) => {
                    debug!("read QoS profile '{}'", profile.name());
                    profiles.push(profile);
                }
                Err(e) => error!("Skipping invalid QoS profile {entry}: {e}"),
            }
        }
        Ok(profiles)
    }

    /// Registers every profile of the file into `registry`, returning how many were registered.
    pub fn load_into(&self, registry: &QosProfileRegistry) -> Result<usize, StaticFileError> {
        let profiles = self.fetch_profiles()?;
        let count = profiles.len();
        for profile in profiles {
            let name = profile.name().to_string();
            if registry.register(profile).is_some() {
                warn!("QoS profile '{name}' from {} replaced an existing profile", self.static_file);
            }
        }
        Ok(count)
    }
}
