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

//! Construction of endpoint uris from structured parts.

use crate::descriptor::address_parser::EndpointDescriptor;
use crate::error::GatewayError;
use crate::qos::QosProfile;

/// Builds `dds:` endpoint uris.
///
/// The topic defaults to the simple name of the content type (the segment after
/// the last `.` or `:`), and the domain defaults to `0`.
///
/// ```
/// use dds_gateway::descriptor::EndpointUriBuilder;
///
/// let uri = EndpointUriBuilder::new()
///     .content("demo.ChatMessage")
///     .quality("high")
///     .reuse_message_structures()
///     .build()
///     .unwrap();
///
/// assert_eq!(uri, "dds:ChatMessage:0/demo.ChatMessage?qos=high&reuse=true");
/// ```
#[derive(Clone, Debug, Default)]
pub struct EndpointUriBuilder {
    type_id: Option<String>,
    topic: Option<String>,
    domain_id: u32,
    qos_profile_name: Option<String>,
    reuse: bool,
}

impl EndpointUriBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, type_id: &str) -> Self {
        self.type_id = Some(type_id.to_string());
        self
    }

    pub fn topic(mut self, topic: &str) -> Self {
        self.topic = Some(topic.to_string());
        self
    }

    pub fn domain(mut self, domain_id: u32) -> Self {
        self.domain_id = domain_id;
        self
    }

    pub fn quality(mut self, profile_name: &str) -> Self {
        self.qos_profile_name = Some(profile_name.to_string());
        self
    }

    pub fn quality_profile(self, profile: &QosProfile) -> Self {
        self.quality(profile.name())
    }

    pub fn reuse_message_structures(mut self) -> Self {
        self.reuse = true;
        self
    }

    pub fn build(&self) -> Result<String, GatewayError> {
        Ok(self.build_descriptor()?.to_string())
    }

    pub fn build_descriptor(&self) -> Result<EndpointDescriptor, GatewayError> {
        let type_id = self
            .type_id
            .as_deref()
            .ok_or_else(|| GatewayError::malformed("", "content type is required"))?;
        let topic = self
            .topic
            .as_deref()
            .unwrap_or_else(|| simple_name(type_id));

        Ok(EndpointDescriptor::new(topic, self.domain_id, type_id)?
            .with_qos_profile(self.qos_profile_name.as_deref())
            .with_reuse_inbound(self.reuse))
    }
}

fn simple_name(type_id: &str) -> &str {
    type_id
        .rsplit(['.', ':'])
        .next()
        .unwrap_or(type_id)
}

#[cfg(test)]
mod tests {
    use super::EndpointUriBuilder;
    use crate::descriptor::EndpointDescriptor;
    use crate::error::GatewayError;
    use crate::qos::QosProfile;

    #[test]
    fn defaults_topic_and_domain() {
        let uri = EndpointUriBuilder::new()
            .content("demo::idl::Heartbeat")
            .build()
            .unwrap();

        assert_eq!(uri, "dds:Heartbeat:0/demo::idl::Heartbeat");
    }

    #[test]
    fn explicit_parts_parse_back() {
        let uri = EndpointUriBuilder::new()
            .content("demo.ChatMessage")
            .topic("Lobby")
            .domain(42)
            .quality_profile(&QosProfile::low())
            .build()
            .unwrap();

        let descriptor = EndpointDescriptor::from_uri(&uri).unwrap();
        assert_eq!(descriptor.topic_name(), "Lobby");
        assert_eq!(descriptor.domain_id(), 42);
        assert_eq!(descriptor.type_id(), "demo.ChatMessage");
        assert_eq!(descriptor.qos_profile_name(), Some("low"));
        assert!(!descriptor.reuse_inbound());
    }

    #[test]
    fn missing_content_is_malformed() {
        assert!(matches!(
            EndpointUriBuilder::new().topic("Lobby").build(),
            Err(GatewayError::MalformedAddress { .. })
        ));
    }

    #[test]
    fn topic_outside_grammar_is_malformed() {
        assert!(matches!(
            EndpointUriBuilder::new()
                .content("demo.Chat")
                .topic("two words")
                .build(),
            Err(GatewayError::MalformedAddress { .. })
        ));
    }
}
