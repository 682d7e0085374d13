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

//! Opaque handles the transport hands back for allocated entities.

use crate::transport::attributes::{
    ParticipantAttributes, PublisherAttributes, SubscriberAttributes,
};
use std::fmt::{Display, Formatter};
use std::time::SystemTime;
use uuid::Uuid;

/// Globally unique identity of a transport entity.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Guid(Uuid);

impl Guid {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for Guid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Clone, Debug)]
pub struct ParticipantHandle {
    guid: Guid,
    attributes: ParticipantAttributes,
}

impl ParticipantHandle {
    pub fn new(guid: Guid, attributes: ParticipantAttributes) -> Self {
        Self { guid, attributes }
    }

    pub fn guid(&self) -> Guid {
        self.guid
    }

    pub fn attributes(&self) -> &ParticipantAttributes {
        &self.attributes
    }
}

#[derive(Clone, Debug)]
pub struct PublisherHandle {
    guid: Guid,
    participant: Guid,
    attributes: PublisherAttributes,
}

impl PublisherHandle {
    pub fn new(guid: Guid, participant: Guid, attributes: PublisherAttributes) -> Self {
        Self {
            guid,
            participant,
            attributes,
        }
    }

    pub fn guid(&self) -> Guid {
        self.guid
    }

    pub fn participant(&self) -> Guid {
        self.participant
    }

    /// The attributes the publisher was created with.
    pub fn attributes(&self) -> &PublisherAttributes {
        &self.attributes
    }
}

#[derive(Clone, Debug)]
pub struct SubscriberHandle {
    guid: Guid,
    participant: Guid,
    attributes: SubscriberAttributes,
}

impl SubscriberHandle {
    pub fn new(guid: Guid, participant: Guid, attributes: SubscriberAttributes) -> Self {
        Self {
            guid,
            participant,
            attributes,
        }
    }

    pub fn guid(&self) -> Guid {
        self.guid
    }

    pub fn participant(&self) -> Guid {
        self.participant
    }

    /// The attributes the subscriber was created with.
    pub fn attributes(&self) -> &SubscriberAttributes {
        &self.attributes
    }
}

/// Delivery metadata filled in alongside a decoded sample.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SampleInfo {
    pub sequence_number: u64,
    pub writer_guid: Option<Guid>,
    pub source_timestamp: Option<SystemTime>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchingStatus {
    Matched,
    Removed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MatchingInfo {
    pub status: MatchingStatus,
    pub remote_guid: Guid,
}
