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

//! QoS profiles, their registry, and application onto transport attributes.

mod configurator;
pub mod policy;
mod profile;
mod registry;

pub use configurator::QosConfigurator;
pub use policy::{
    DurabilityKind, HistoryKind, LivelinessKind, OwnershipKind, PublishModeKind, ReliabilityKind,
};
pub use profile::{QosProfile, PROFILE_HIGH, PROFILE_LOW};
pub use registry::{QosProfileRegistry, QosProfiles};
