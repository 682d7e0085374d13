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

//! The publish/subscribe middleware seam.
//!
//! The gateway never talks to a middleware directly; everything goes through
//! [`PubSubTransport`]. A transport allocates participants, publishers and
//! subscribers, encodes outbound payloads through the [`TypeAdapter`] handed
//! to it at publisher/subscriber creation, and notifies a
//! [`SubscriberListener`] whenever a subscriber has data to take.

mod attributes;
mod handles;
mod status;

pub use attributes::{
    EndpointQos, HistoryQosPolicy, LivelinessQosPolicy, ParticipantAttributes,
    PublisherAttributes, ReaderQos, SubscriberAttributes, TopicAttributes, WriterQos,
};
pub use handles::{
    Guid, MatchingInfo, MatchingStatus, ParticipantHandle, PublisherHandle, SampleInfo,
    SubscriberHandle,
};
pub use status::{TransportError, TransportErrorKind};

use crate::types::{Payload, TypeAdapter};
use async_trait::async_trait;
use std::sync::Arc;

/// Callbacks a transport raises for a subscriber.
#[async_trait]
pub trait SubscriberListener: Send + Sync {
    /// At least one sample is ready to be taken from `subscriber`.
    async fn on_new_data_message(&self, subscriber: &SubscriberHandle);

    async fn on_subscription_matched(&self, _subscriber: &SubscriberHandle, _info: MatchingInfo) {}
}

#[async_trait]
pub trait PubSubTransport: Send + Sync {
    async fn create_participant(
        &self,
        attributes: ParticipantAttributes,
    ) -> Result<ParticipantHandle, TransportError>;

    async fn create_publisher(
        &self,
        participant: &ParticipantHandle,
        adapter: Arc<dyn TypeAdapter>,
        attributes: PublisherAttributes,
    ) -> Result<PublisherHandle, TransportError>;

    async fn create_subscriber(
        &self,
        participant: &ParticipantHandle,
        adapter: Arc<dyn TypeAdapter>,
        attributes: SubscriberAttributes,
        listener: Arc<dyn SubscriberListener>,
    ) -> Result<SubscriberHandle, TransportError>;

    async fn write(
        &self,
        publisher: &PublisherHandle,
        payload: &dyn Payload,
    ) -> Result<(), TransportError>;

    /// Takes the next pending sample into a freshly allocated payload.
    ///
    /// Returns `Ok(None)` when nothing is pending.
    fn decode_next(
        &self,
        subscriber: &SubscriberHandle,
    ) -> Result<Option<Box<dyn Payload>>, TransportError>;

    /// Takes the next pending sample, overwriting `target` and `info` in place.
    ///
    /// Returns `Ok(false)` when nothing is pending; `target` is left untouched.
    fn decode_next_into(
        &self,
        subscriber: &SubscriberHandle,
        target: &mut dyn Payload,
        info: &mut SampleInfo,
    ) -> Result<bool, TransportError>;

    /// Releases a participant together with every publisher and subscriber it owns.
    async fn remove_participant(&self, participant: &ParticipantHandle)
        -> Result<(), TransportError>;
}
