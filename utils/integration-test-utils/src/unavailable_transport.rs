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

use async_trait::async_trait;
use dds_gateway::transport::{
    ParticipantAttributes, ParticipantHandle, PubSubTransport, PublisherAttributes,
    PublisherHandle, SampleInfo, SubscriberAttributes, SubscriberHandle, SubscriberListener,
    TransportError, TransportErrorKind,
};
use dds_gateway::types::{Payload, TypeAdapter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

/// A transport that cannot allocate anything.
#[derive(Default)]
pub struct UnavailableTransport {
    attempts: AtomicUsize,
}

impl UnavailableTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many participant allocations were attempted.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn unavailable(&self, what: &str) -> TransportError {
        TransportError::fail_with_kind(
            TransportErrorKind::Unavailable,
            format!("unable to allocate {what}"),
        )
    }
}

#[async_trait]
impl PubSubTransport for UnavailableTransport {
    async fn create_participant(
        &self,
        attributes: ParticipantAttributes,
    ) -> Result<ParticipantHandle, TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        debug!("refusing participant for domain {}", attributes.domain_id);
        Err(self.unavailable("participant"))
    }

    async fn create_publisher(
        &self,
        _participant: &ParticipantHandle,
        _adapter: Arc<dyn TypeAdapter>,
        _attributes: PublisherAttributes,
    ) -> Result<PublisherHandle, TransportError> {
        Err(self.unavailable("publisher"))
    }

    async fn create_subscriber(
        &self,
        _participant: &ParticipantHandle,
        _adapter: Arc<dyn TypeAdapter>,
        _attributes: SubscriberAttributes,
        _listener: Arc<dyn SubscriberListener>,
    ) -> Result<SubscriberHandle, TransportError> {
        Err(self.unavailable("subscriber"))
    }

    async fn write(
        &self,
        _publisher: &PublisherHandle,
        _payload: &dyn Payload,
    ) -> Result<(), TransportError> {
        Err(self.unavailable("write buffer"))
    }

    fn decode_next(
        &self,
        _subscriber: &SubscriberHandle,
    ) -> Result<Option<Box<dyn Payload>>, TransportError> {
        Ok(None)
    }

    fn decode_next_into(
        &self,
        _subscriber: &SubscriberHandle,
        _target: &mut dyn Payload,
        _info: &mut SampleInfo,
    ) -> Result<bool, TransportError> {
        Ok(false)
    }

    async fn remove_participant(
        &self,
        _participant: &ParticipantHandle,
    ) -> Result<(), TransportError> {
        Ok(())
    }
}
