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

//! Lazy, single-execution allocation and teardown of one endpoint's
//! participant, publisher and subscriber.

use crate::descriptor::EndpointDescriptor;
use crate::error::GatewayError;
use crate::observability::{events, fields};
use crate::qos::{QosConfigurator, QosProfile, ReliabilityKind};
use crate::transport::{
    ParticipantAttributes, ParticipantHandle, PubSubTransport, PublisherAttributes,
    PublisherHandle, SubscriberAttributes, SubscriberHandle, SubscriberListener,
};
use crate::types::{TypeAdapter, TypeSupport};
use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, warn};

const COMPONENT: &str = "endpoint_session";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionState {
    Uninitialized,
    ParticipantReady,
    Ready { publisher: bool, subscriber: bool },
    Stopped,
}

/// Transport resources for one query-stripped endpoint address.
///
/// Each handle is created at most once, even under concurrent callers; the
/// subscriber binds its listener at creation and never again. Allocation runs
/// under a shared lifecycle guard and `stop` under an exclusive one, so a
/// stop waits for in-flight allocations and then releases them.
pub struct EndpointSession {
    descriptor: EndpointDescriptor,
    address: String,
    transport: Arc<dyn PubSubTransport>,
    type_support: TypeSupport,
    adapter: Arc<dyn TypeAdapter>,
    configurator: QosConfigurator,
    participant: OnceCell<Arc<ParticipantHandle>>,
    publisher: OnceCell<Arc<PublisherHandle>>,
    subscriber: OnceCell<Arc<SubscriberHandle>>,
    subscriber_listener: Mutex<Option<Arc<dyn SubscriberListener>>>,
    lifecycle: RwLock<()>,
    stopped: AtomicBool,
}

impl EndpointSession {
    pub fn new(
        descriptor: EndpointDescriptor,
        transport: Arc<dyn PubSubTransport>,
        type_support: TypeSupport,
        qos_profile: Option<Arc<QosProfile>>,
    ) -> Self {
        let adapter = type_support.create_adapter();
        Self {
            address: descriptor.endpoint_address(),
            descriptor,
            transport,
            type_support,
            adapter,
            configurator: QosConfigurator::new(qos_profile),
            participant: OnceCell::new(),
            publisher: OnceCell::new(),
            subscriber: OnceCell::new(),
            subscriber_listener: Mutex::new(None),
            lifecycle: RwLock::new(()),
            stopped: AtomicBool::new(false),
        }
    }

    pub fn descriptor(&self) -> &EndpointDescriptor {
        &self.descriptor
    }

    pub fn endpoint_address(&self) -> &str {
        &self.address
    }

    pub fn qos_profile(&self) -> Option<&Arc<QosProfile>> {
        self.configurator.profile()
    }

    pub fn type_support(&self) -> &TypeSupport {
        &self.type_support
    }

    pub(crate) fn transport(&self) -> &Arc<dyn PubSubTransport> {
        &self.transport
    }

    /// The publisher, if one was created; never allocates.
    pub fn publisher(&self) -> Option<Arc<PublisherHandle>> {
        self.publisher.get().cloned()
    }

    /// The subscriber, if one was created; never allocates.
    pub fn subscriber(&self) -> Option<Arc<SubscriberHandle>> {
        self.subscriber.get().cloned()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    pub fn state(&self) -> SessionState {
        if self.is_stopped() {
            return SessionState::Stopped;
        }
        if !self.participant.initialized() {
            return SessionState::Uninitialized;
        }
        match (self.publisher.initialized(), self.subscriber.initialized()) {
            (false, false) => SessionState::ParticipantReady,
            (publisher, subscriber) => SessionState::Ready {
                publisher,
                subscriber,
            },
        }
    }

    fn ensure_running(&self) -> Result<(), GatewayError> {
        if self.is_stopped() {
            return Err(GatewayError::SessionStopped(self.address.clone()));
        }
        Ok(())
    }

    pub async fn ensure_participant(&self) -> Result<Arc<ParticipantHandle>, GatewayError> {
        let _running = self.lifecycle.read().await;
        self.ensure_running()?;
        self.allocate_participant().await
    }

    /// Participant allocation; callers hold the lifecycle read guard.
    async fn allocate_participant(&self) -> Result<Arc<ParticipantHandle>, GatewayError> {
        let participant = self
            .participant
            .get_or_try_init(|| async {
                let attributes = ParticipantAttributes::new(
                    self.descriptor.domain_id(),
                    self.descriptor.topic_name(),
                );
                match self.transport.create_participant(attributes).await {
                    Ok(handle) => {
                        debug!(
                            event = events::SESSION_PARTICIPANT_CREATE_OK,
                            component = COMPONENT,
                            endpoint = %self.address,
                            domain_id = self.descriptor.domain_id(),
                            guid = %handle.guid(),
                            "participant created"
                        );
                        Ok(Arc::new(handle))
                    }
                    Err(err) => {
                        warn!(
                            event = events::SESSION_PARTICIPANT_CREATE_FAILED,
                            component = COMPONENT,
                            endpoint = %self.address,
                            domain_id = self.descriptor.domain_id(),
                            err = %err,
                            "unable to create participant"
                        );
                        Err(GatewayError::TransportUnavailable(err))
                    }
                }
            })
            .await?;
        Ok(participant.clone())
    }

    /// Returns the endpoint publisher, creating it on first use.
    pub async fn get_publisher(&self) -> Result<Arc<PublisherHandle>, GatewayError> {
        let _running = self.lifecycle.read().await;
        self.ensure_running()?;
        let publisher = self
            .publisher
            .get_or_try_init(|| async {
                let participant = self.allocate_participant().await?;
                let mut attributes = PublisherAttributes::new(
                    self.descriptor.topic_name(),
                    self.descriptor.type_id(),
                    ReliabilityKind::Reliable,
                );
                self.configurator.configure_publisher(&mut attributes);

                match self
                    .transport
                    .create_publisher(&participant, self.adapter.clone(), attributes)
                    .await
                {
                    Ok(handle) => {
                        debug!(
                            event = events::SESSION_PUBLISHER_CREATE_OK,
                            component = COMPONENT,
                            endpoint = %self.address,
                            qos_profile = %self.profile_label(),
                            guid = %handle.guid(),
                            "publisher created"
                        );
                        Ok(Arc::new(handle))
                    }
                    Err(err) => {
                        warn!(
                            event = events::SESSION_PUBLISHER_CREATE_FAILED,
                            component = COMPONENT,
                            endpoint = %self.address,
                            err = %err,
                            "unable to create publisher"
                        );
                        Err(GatewayError::TransportUnavailable(err))
                    }
                }
            })
            .await?;
        Ok(publisher.clone())
    }

    /// Returns the endpoint subscriber, creating it on first use with `listener` bound.
    ///
    /// Fails with `SubscriberInUse` when the subscriber already exists for a different listener.
    pub async fn get_subscriber(
        &self,
        listener: Arc<dyn SubscriberListener>,
    ) -> Result<Arc<SubscriberHandle>, GatewayError> {
        let _running = self.lifecycle.read().await;
        self.ensure_running()?;
        let subscriber = self
            .subscriber
            .get_or_try_init(|| async {
                let participant = self.allocate_participant().await?;
                let mut attributes = SubscriberAttributes::new(
                    self.descriptor.topic_name(),
                    self.descriptor.type_id(),
                    ReliabilityKind::Reliable,
                );
                self.configurator.configure_subscriber(&mut attributes);

                match self
                    .transport
                    .create_subscriber(
                        &participant,
                        self.adapter.clone(),
                        attributes,
                        listener.clone(),
                    )
                    .await
                {
                    Ok(handle) => {
                        *self
                            .subscriber_listener
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner) = Some(listener.clone());
                        debug!(
                            event = events::SESSION_SUBSCRIBER_CREATE_OK,
                            component = COMPONENT,
                            endpoint = %self.address,
                            qos_profile = %self.profile_label(),
                            guid = %handle.guid(),
                            "subscriber created"
                        );
                        Ok(Arc::new(handle))
                    }
                    Err(err) => {
                        warn!(
                            event = events::SESSION_SUBSCRIBER_CREATE_FAILED,
                            component = COMPONENT,
                            endpoint = %self.address,
                            err = %err,
                            "unable to create subscriber"
                        );
                        Err(GatewayError::TransportUnavailable(err))
                    }
                }
            })
            .await?;

        if !self.is_bound_listener(&listener) {
            return Err(GatewayError::SubscriberInUse(self.address.clone()));
        }
        Ok(subscriber.clone())
    }

    fn is_bound_listener(&self, listener: &Arc<dyn SubscriberListener>) -> bool {
        self.subscriber_listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|bound| {
                std::ptr::addr_eq(Arc::as_ptr(bound), Arc::as_ptr(listener))
            })
    }

    /// Releases the participant, and with it every publisher and subscriber.
    ///
    /// Waits for in-flight allocations first. Idempotent. Teardown failures
    /// are logged, never returned.
    pub async fn stop(&self) {
        if self.is_stopped() {
            return;
        }
        let _stopping = self.lifecycle.write().await;
        if self.stopped.swap(true, Ordering::AcqRel) {
            return;
        }

        if let Some(participant) = self.participant.get() {
            match self.transport.remove_participant(participant).await {
                Ok(()) => info!(
                    event = events::SESSION_STOP_OK,
                    component = COMPONENT,
                    endpoint = %self.address,
                    guid = %participant.guid(),
                    "endpoint session stopped"
                ),
                Err(err) => warn!(
                    event = events::SESSION_STOP_FAILED,
                    component = COMPONENT,
                    endpoint = %self.address,
                    guid = %participant.guid(),
                    err = %err,
                    "unable to remove participant"
                ),
            }
        }
        self.subscriber_listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    fn profile_label(&self) -> String {
        fields::format_optional(self.configurator.profile().map(|profile| profile.name()))
    }
}

impl Debug for EndpointSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointSession")
            .field("address", &self.address)
            .field("qos_profile", &self.profile_label())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
