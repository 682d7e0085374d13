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

//! Thread-safe table of named QoS profiles.

use crate::observability::events;
use crate::qos::profile::QosProfile;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace};

const COMPONENT: &str = "qos_registry";

/// Registry of QoS profiles keyed by profile name.
///
/// Every registry starts out with the built-in `low` and `high` profiles.
/// Registering a profile under a name that is already taken replaces the
/// previous profile.
///
/// ```
/// use dds_gateway::qos::{QosProfile, QosProfileRegistry, ReliabilityKind};
///
/// let registry = QosProfileRegistry::new();
/// assert!(registry.lookup("low").is_some());
///
/// registry.register(QosProfile::new("bulk").with_reliability(ReliabilityKind::Reliable));
/// assert_eq!(
///     registry.lookup("bulk").unwrap().reliability(),
///     Some(ReliabilityKind::Reliable)
/// );
/// assert!(registry.lookup("does-not-exist").is_none());
/// ```
pub struct QosProfileRegistry {
    profiles: RwLock<HashMap<String, Arc<QosProfile>>>,
}

impl QosProfileRegistry {
    /// Creates a registry holding only the built-in profiles.
    pub fn new() -> Self {
        let registry = Self {
            profiles: RwLock::new(HashMap::new()),
        };
        registry.register(QosProfile::low());
        registry.register(QosProfile::high());
        registry
    }

    /// Process-wide default registry, created on first use.
    pub fn global() -> Arc<QosProfileRegistry> {
        static GLOBAL: OnceLock<Arc<QosProfileRegistry>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| Arc::new(QosProfileRegistry::new()))
            .clone()
    }

    fn read_profiles(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<QosProfile>>> {
        self.profiles.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_profiles(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<QosProfile>>> {
        self.profiles.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts `profile`, returning the profile it replaced, if any.
    pub fn register(&self, profile: QosProfile) -> Option<Arc<QosProfile>> {
        let name = profile.name().to_string();
        let replaced = self.write_profiles().insert(name.clone(), Arc::new(profile));

        if replaced.is_some() {
            debug!(
                event = events::QOS_PROFILE_REPLACED,
                component = COMPONENT,
                profile = name.as_str(),
                "replaced QoS profile"
            );
        } else {
            trace!(
                event = events::QOS_PROFILE_REGISTERED,
                component = COMPONENT,
                profile = name.as_str(),
                "registered QoS profile"
            );
        }
        replaced
    }

    /// Returns the profile registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<Arc<QosProfile>> {
        self.read_profiles().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read_profiles().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.read_profiles().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_profiles().is_empty()
    }

    /// Snapshot of every registered profile, ordered by name.
    ///
    /// Profiles registered after the call are not observed. The returned
    /// iterator can be cloned to walk the same snapshot again.
    pub fn all(&self) -> QosProfiles {
        let mut profiles: Vec<Arc<QosProfile>> = self.read_profiles().values().cloned().collect();
        profiles.sort_by(|a, b| a.name().cmp(b.name()));
        QosProfiles {
            inner: profiles.into_iter(),
        }
    }
}

impl Default for QosProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a registry snapshot, see [`QosProfileRegistry::all`].
#[derive(Clone, Debug)]
pub struct QosProfiles {
    inner: std::vec::IntoIter<Arc<QosProfile>>,
}

impl Iterator for QosProfiles {
    type Item = Arc<QosProfile>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for QosProfiles {}
