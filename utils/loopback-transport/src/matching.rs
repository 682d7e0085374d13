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

//! Request/offered QoS matching between writers and readers.

use dds_gateway::transport::{PublisherAttributes, ReaderQos, SubscriberAttributes, WriterQos};

/// Whether a writer offering `offered` can serve a reader requesting `requested`.
///
/// Reliability and durability must be offered at least as strongly as
/// requested; ownership must be equal.
pub fn qos_compatible(offered: &WriterQos, requested: &ReaderQos) -> bool {
    offered.reliability >= requested.reliability
        && offered.durability >= requested.durability
        && offered.ownership == requested.ownership
}

/// Whether a writer and a reader see each other.
pub fn endpoints_match(
    writer_domain: u32,
    writer: &PublisherAttributes,
    reader_domain: u32,
    reader: &SubscriberAttributes,
) -> bool {
    writer_domain == reader_domain
        && writer.topic.topic_name == reader.topic.topic_name
        && writer.topic.type_name == reader.topic.type_name
        && qos_compatible(&writer.qos, &reader.qos)
}
