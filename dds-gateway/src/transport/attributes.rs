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

//! Transport-side configuration objects for participants, publishers and subscribers.

use crate::qos::{
    DurabilityKind, HistoryKind, LivelinessKind, OwnershipKind, PublishModeKind, ReliabilityKind,
};
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipantAttributes {
    pub domain_id: u32,
    pub name: String,
}

impl ParticipantAttributes {
    pub fn new(domain_id: u32, name: &str) -> Self {
        Self {
            domain_id,
            name: name.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HistoryQosPolicy {
    pub kind: HistoryKind,
    pub depth: u32,
}

impl HistoryQosPolicy {
    pub fn keep_last(depth: u32) -> Self {
        Self {
            kind: HistoryKind::KeepLast,
            depth,
        }
    }

    /// Keeps every sample, up to the transport's resource limits.
    pub fn keep_all() -> Self {
        Self {
            kind: HistoryKind::KeepAll,
            depth: 1,
        }
    }
}

impl Default for HistoryQosPolicy {
    fn default() -> Self {
        Self {
            kind: HistoryKind::KeepLast,
            depth: 1,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TopicAttributes {
    pub topic_name: String,
    pub type_name: String,
    pub history: HistoryQosPolicy,
}

impl TopicAttributes {
    pub fn new(topic_name: &str, type_name: &str) -> Self {
        Self {
            topic_name: topic_name.to_string(),
            type_name: type_name.to_string(),
            history: HistoryQosPolicy::default(),
        }
    }
}

/// `lease_duration` of `None` means an infinite lease.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LivelinessQosPolicy {
    pub kind: LivelinessKind,
    pub lease_duration: Option<Duration>,
}

impl LivelinessQosPolicy {
    pub fn new(kind: LivelinessKind) -> Self {
        Self {
            kind,
            lease_duration: None,
        }
    }
}

/// Policies both writers and readers carry.
pub trait EndpointQos {
    fn set_reliability_kind(&mut self, kind: ReliabilityKind);
    fn set_durability_kind(&mut self, kind: DurabilityKind);
    fn set_ownership_kind(&mut self, kind: OwnershipKind);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WriterQos {
    pub reliability: ReliabilityKind,
    pub durability: DurabilityKind,
    pub ownership: OwnershipKind,
    pub publish_mode: PublishModeKind,
}

impl WriterQos {
    pub fn new(reliability: ReliabilityKind) -> Self {
        Self {
            reliability,
            durability: DurabilityKind::Volatile,
            ownership: OwnershipKind::Shared,
            publish_mode: PublishModeKind::Synchronous,
        }
    }
}

impl EndpointQos for WriterQos {
    fn set_reliability_kind(&mut self, kind: ReliabilityKind) {
        self.reliability = kind;
    }

    fn set_durability_kind(&mut self, kind: DurabilityKind) {
        self.durability = kind;
    }

    fn set_ownership_kind(&mut self, kind: OwnershipKind) {
        self.ownership = kind;
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReaderQos {
    pub reliability: ReliabilityKind,
    pub durability: DurabilityKind,
    pub ownership: OwnershipKind,
    pub liveliness: Option<LivelinessQosPolicy>,
}

impl ReaderQos {
    pub fn new(reliability: ReliabilityKind) -> Self {
        Self {
            reliability,
            durability: DurabilityKind::Volatile,
            ownership: OwnershipKind::Shared,
            liveliness: None,
        }
    }
}

impl EndpointQos for ReaderQos {
    fn set_reliability_kind(&mut self, kind: ReliabilityKind) {
        self.reliability = kind;
    }

    fn set_durability_kind(&mut self, kind: DurabilityKind) {
        self.durability = kind;
    }

    fn set_ownership_kind(&mut self, kind: OwnershipKind) {
        self.ownership = kind;
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublisherAttributes {
    pub topic: TopicAttributes,
    pub qos: WriterQos,
}

impl PublisherAttributes {
    pub fn new(topic_name: &str, type_name: &str, reliability: ReliabilityKind) -> Self {
        Self {
            topic: TopicAttributes::new(topic_name, type_name),
            qos: WriterQos::new(reliability),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriberAttributes {
    pub topic: TopicAttributes,
    pub qos: ReaderQos,
}

impl SubscriberAttributes {
    /// Readers keep every sample until it is taken unless their history says otherwise.
    pub fn new(topic_name: &str, type_name: &str, reliability: ReliabilityKind) -> Self {
        let mut topic = TopicAttributes::new(topic_name, type_name);
        topic.history = HistoryQosPolicy::keep_all();
        Self {
            topic,
            qos: ReaderQos::new(reliability),
        }
    }
}
