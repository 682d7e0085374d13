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

//! Named QoS profiles.

use crate::qos::policy::{DurabilityKind, HistoryKind, LivelinessKind, OwnershipKind, ReliabilityKind};
use serde::{Deserialize, Serialize};

/// Name of the built-in profile for low priority exchanges.
pub const PROFILE_LOW: &str = "low";
/// Name of the built-in profile for high priority exchanges.
pub const PROFILE_HIGH: &str = "high";

/// A named bundle of QoS settings.
///
/// A `None` field is unset: the transport keeps its own default for it.
/// `asynchronous_publish` always has a concrete value.
///
/// # Examples
///
/// ```
/// use dds_gateway::qos::{QosProfile, ReliabilityKind};
///
/// let profile = QosProfile::new("telemetry")
///     .with_reliability(ReliabilityKind::BestEffort)
///     .with_asynchronous_publish(true);
///
/// assert_eq!(profile.name(), "telemetry");
/// assert!(profile.durability().is_none());
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QosProfile {
    name: String,
    #[serde(default)]
    reliability: Option<ReliabilityKind>,
    #[serde(default)]
    durability: Option<DurabilityKind>,
    #[serde(default)]
    ownership: Option<OwnershipKind>,
    #[serde(default)]
    history_kind: Option<HistoryKind>,
    #[serde(default)]
    liveliness_kind: Option<LivelinessKind>,
    #[serde(default)]
    asynchronous_publish: bool,
}

impl QosProfile {
    /// Creates a profile with every policy unset and synchronous publishing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reliability: None,
            durability: None,
            ownership: None,
            history_kind: None,
            liveliness_kind: None,
            asynchronous_publish: false,
        }
    }

    /// The built-in `low` profile.
    pub fn low() -> Self {
        Self::new(PROFILE_LOW)
            .with_reliability(ReliabilityKind::BestEffort)
            .with_durability(DurabilityKind::Volatile)
            .with_ownership(OwnershipKind::Shared)
            .with_history_kind(HistoryKind::KeepLast)
    }

    /// The built-in `high` profile.
    pub fn high() -> Self {
        Self::new(PROFILE_HIGH)
            .with_reliability(ReliabilityKind::Reliable)
            .with_durability(DurabilityKind::TransientLocal)
            .with_ownership(OwnershipKind::Exclusive)
            .with_history_kind(HistoryKind::KeepAll)
    }

    pub fn with_reliability(mut self, reliability: ReliabilityKind) -> Self {
        self.reliability = Some(reliability);
        self
    }

    pub fn with_durability(mut self, durability: DurabilityKind) -> Self {
        self.durability = Some(durability);
        self
    }

    pub fn with_ownership(mut self, ownership: OwnershipKind) -> Self {
        self.ownership = Some(ownership);
        self
    }

    pub fn with_history_kind(mut self, history_kind: HistoryKind) -> Self {
        self.history_kind = Some(history_kind);
        self
    }

    pub fn with_liveliness_kind(mut self, liveliness_kind: LivelinessKind) -> Self {
        self.liveliness_kind = Some(liveliness_kind);
        self
    }

    pub fn with_asynchronous_publish(mut self, asynchronous_publish: bool) -> Self {
        self.asynchronous_publish = asynchronous_publish;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reliability(&self) -> Option<ReliabilityKind> {
        self.reliability
    }

    pub fn durability(&self) -> Option<DurabilityKind> {
        self.durability
    }

    pub fn ownership(&self) -> Option<OwnershipKind> {
        self.ownership
    }

    pub fn history_kind(&self) -> Option<HistoryKind> {
        self.history_kind
    }

    pub fn liveliness_kind(&self) -> Option<LivelinessKind> {
        self.liveliness_kind
    }

    /// `true` for asynchronous publishing, `false` for synchronous publishing.
    pub fn asynchronous_publish(&self) -> bool {
        self.asynchronous_publish
    }
}
