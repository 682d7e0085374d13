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

#![allow(dead_code)]

use async_trait::async_trait;
use dds_gateway::qos::QosProfileRegistry;
use dds_gateway::transport::{
    MatchingInfo, ParticipantAttributes, ParticipantHandle, PubSubTransport, PublisherAttributes,
    PublisherHandle, SampleInfo, SubscriberAttributes, SubscriberHandle, SubscriberListener,
    TransportError, TransportErrorKind,
};
use dds_gateway::types::{Payload, TypeAdapter};
use dds_gateway::DdsGateway;
use integration_test_utils::{test_type_registry, TEST_IDL_TYPE_ID};
use loopback_transport::LoopbackTransport;
use std::sync::Arc;
use std::time::Duration;

pub const MESSAGE_COUNT: u32 = 20;
pub const WAIT_WINDOW: Duration = Duration::from_millis(250);
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// `dds:<topic>:0/<TestIdl>` with optional query parameters.
pub fn test_uri(topic: &str, qos: Option<&str>, reuse: bool) -> String {
    let mut uri = format!("dds:{topic}:0/{TEST_IDL_TYPE_ID}");
    let mut separator = '?';
    if let Some(qos) = qos {
        uri.push_str(&format!("{separator}qos={qos}"));
        separator = '&';
    }
    if reuse {
        uri.push_str(&format!("{separator}reuse=true"));
    }
    uri
}

/// A gateway with its own profile registry over `transport`.
pub fn gateway(name: &str, transport: Arc<dyn PubSubTransport>) -> DdsGateway {
    DdsGateway::new(
        name,
        transport,
        Arc::new(QosProfileRegistry::new()),
        test_type_registry(),
    )
}

/// Delays every allocation so concurrent callers overlap inside the transport.
pub struct DelayedTransport {
    inner: Arc<LoopbackTransport>,
    delay: Duration,
}

impl DelayedTransport {
    pub fn new(inner: Arc<LoopbackTransport>, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl PubSubTransport for DelayedTransport {
    async fn create_participant(
        &self,
        attributes: ParticipantAttributes,
    ) -> Result<ParticipantHandle, TransportError> {
        tokio::time::sleep(self.delay).await;
        self.inner.create_participant(attributes).await
    }

    async fn create_publisher(
        &self,
        participant: &ParticipantHandle,
        adapter: Arc<dyn TypeAdapter>,
        attributes: PublisherAttributes,
    ) -> Result<PublisherHandle, TransportError> {
        tokio::time::sleep(self.delay).await;
        self.inner
            .create_publisher(participant, adapter, attributes)
            .await
    }

    async fn create_subscriber(
        &self,
        participant: &ParticipantHandle,
        adapter: Arc<dyn TypeAdapter>,
        attributes: SubscriberAttributes,
        listener: Arc<dyn SubscriberListener>,
    ) -> Result<SubscriberHandle, TransportError> {
        tokio::time::sleep(self.delay).await;
        self.inner
            .create_subscriber(participant, adapter, attributes, listener)
            .await
    }

    async fn write(
        &self,
        publisher: &PublisherHandle,
        payload: &dyn Payload,
    ) -> Result<(), TransportError> {
        self.inner.write(publisher, payload).await
    }

    fn decode_next(
        &self,
        subscriber: &SubscriberHandle,
    ) -> Result<Option<Box<dyn Payload>>, TransportError> {
        self.inner.decode_next(subscriber)
    }

    fn decode_next_into(
        &self,
        subscriber: &SubscriberHandle,
        target: &mut dyn Payload,
        info: &mut SampleInfo,
    ) -> Result<bool, TransportError> {
        self.inner.decode_next_into(subscriber, target, info)
    }

    async fn remove_participant(
        &self,
        participant: &ParticipantHandle,
    ) -> Result<(), TransportError> {
        self.inner.remove_participant(participant).await
    }
}

/// Raises every new-data notification twice, so every other one finds nothing to take.
struct DoubledNotifications {
    inner: Arc<dyn SubscriberListener>,
}

#[async_trait]
impl SubscriberListener for DoubledNotifications {
    async fn on_new_data_message(&self, subscriber: &SubscriberHandle) {
        self.inner.on_new_data_message(subscriber).await;
        self.inner.on_new_data_message(subscriber).await;
    }

    async fn on_subscription_matched(&self, subscriber: &SubscriberHandle, info: MatchingInfo) {
        self.inner.on_subscription_matched(subscriber, info).await;
    }
}

/// Loopback transport with injected misbehaviour.
pub struct FaultyTransport {
    inner: Arc<LoopbackTransport>,
    double_notifications: bool,
    fail_writes: bool,
}

impl FaultyTransport {
    pub fn doubled_notifications(inner: Arc<LoopbackTransport>) -> Self {
        Self {
            inner,
            double_notifications: true,
            fail_writes: false,
        }
    }

    pub fn failing_writes(inner: Arc<LoopbackTransport>) -> Self {
        Self {
            inner,
            double_notifications: false,
            fail_writes: true,
        }
    }
}

#[async_trait]
impl PubSubTransport for FaultyTransport {
    async fn create_participant(
        &self,
        attributes: ParticipantAttributes,
    ) -> Result<ParticipantHandle, TransportError> {
        self.inner.create_participant(attributes).await
    }

    async fn create_publisher(
        &self,
        participant: &ParticipantHandle,
        adapter: Arc<dyn TypeAdapter>,
        attributes: PublisherAttributes,
    ) -> Result<PublisherHandle, TransportError> {
        self.inner
            .create_publisher(participant, adapter, attributes)
            .await
    }

    async fn create_subscriber(
        &self,
        participant: &ParticipantHandle,
        adapter: Arc<dyn TypeAdapter>,
        attributes: SubscriberAttributes,
        listener: Arc<dyn SubscriberListener>,
    ) -> Result<SubscriberHandle, TransportError> {
        let listener: Arc<dyn SubscriberListener> = if self.double_notifications {
            Arc::new(DoubledNotifications { inner: listener })
        } else {
            listener
        };
        self.inner
            .create_subscriber(participant, adapter, attributes, listener)
            .await
    }

    async fn write(
        &self,
        publisher: &PublisherHandle,
        payload: &dyn Payload,
    ) -> Result<(), TransportError> {
        if self.fail_writes {
            return Err(TransportError::fail_with_kind(
                TransportErrorKind::Io,
                "link down",
            ));
        }
        self.inner.write(publisher, payload).await
    }

    fn decode_next(
        &self,
        subscriber: &SubscriberHandle,
    ) -> Result<Option<Box<dyn Payload>>, TransportError> {
        self.inner.decode_next(subscriber)
    }

    fn decode_next_into(
        &self,
        subscriber: &SubscriberHandle,
        target: &mut dyn Payload,
        info: &mut SampleInfo,
    ) -> Result<bool, TransportError> {
        self.inner.decode_next_into(subscriber, target, info)
    }

    async fn remove_participant(
        &self,
        participant: &ParticipantHandle,
    ) -> Result<(), TransportError> {
        self.inner.remove_participant(participant).await
    }
}
