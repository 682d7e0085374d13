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

use dds_gateway::qos::QosProfile;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(reason) => write!(f, "unable to read config file: {reason}"),
            ConfigError::Parse(reason) => write!(f, "unable to parse config file: {reason}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub(crate) gateway: GatewayConfig,
    #[serde(default)]
    pub(crate) qos_profiles: Vec<QosProfile>,
    #[serde(default)]
    pub(crate) qos_profiles_file: Option<String>,
    #[serde(default)]
    pub(crate) routes: Vec<RouteConfig>,
    #[serde(default)]
    pub(crate) monitors: Vec<String>,
    #[serde(default)]
    pub(crate) heartbeat: Option<HeartbeatConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub(crate) name: String,
}

/// Every sample consumed from `from` is republished on `to`.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    pub(crate) from: String,
    pub(crate) to: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct HeartbeatConfig {
    pub(crate) endpoint: String,
    pub(crate) period_ms: u64,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json5(&contents)
    }

    pub fn from_json5(contents: &str) -> Result<Self, ConfigError> {
        json5::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError};
    use dds_gateway::qos::ReliabilityKind;

    #[test]
    fn default_config_parses() {
        let config = Config::from_file("config/DEFAULT_CONFIG.json5").expect("config should parse");

        assert_eq!(config.gateway.name, "dds-gateway");
        assert_eq!(config.qos_profiles.len(), 1);
        assert_eq!(
            config.qos_profiles[0].reliability(),
            Some(ReliabilityKind::Reliable)
        );
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.monitors.len(), 1);
        assert_eq!(config.heartbeat.map(|h| h.period_ms), Some(1000));
    }

    #[test]
    fn optional_sections_default_to_empty() {
        let config = Config::from_json5("{ gateway: { name: 'bare' } }").unwrap();

        assert!(config.qos_profiles.is_empty());
        assert!(config.qos_profiles_file.is_none());
        assert!(config.routes.is_empty());
        assert!(config.monitors.is_empty());
        assert!(config.heartbeat.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = Config::from_json5("{ gateway: { name: 'x', port: 1 } }");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
