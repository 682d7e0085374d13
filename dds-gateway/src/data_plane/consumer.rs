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

//! Inbound notification path.

use crate::data_plane::delivery::{InboundHandler, InboundMessage};
use crate::error::GatewayError;
use crate::observability::{events, fields};
use crate::session::EndpointSession;
use crate::transport::{
    MatchingInfo, SampleInfo, SubscriberHandle, SubscriberListener, TransportError,
};
use crate::types::PayloadCell;
use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::{error, info, trace, warn, Level};

const COMPONENT: &str = "consumer";

/// How a consumer allocates the payloads it delivers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeliveryStrategy {
    /// A new payload instance per delivered sample.
    FreshAllocation,
    /// One payload instance, allocated at start and overwritten for every sample.
    ReusingAllocation,
}

impl DeliveryStrategy {
    pub fn from_reuse_flag(reuse: bool) -> Self {
        if reuse {
            DeliveryStrategy::ReusingAllocation
        } else {
            DeliveryStrategy::FreshAllocation
        }
    }
}

struct ReusedSample {
    payload: Arc<PayloadCell>,
    info: Mutex<SampleInfo>,
}

struct ConsumerCore {
    session: Arc<EndpointSession>,
    handler: Arc<dyn InboundHandler>,
    strategy: DeliveryStrategy,
    endpoint_address: Arc<str>,
    type_id: Arc<str>,
    reused: OnceLock<ReusedSample>,
    active: AtomicBool,
    delivered: AtomicU64,
}

impl ConsumerCore {
    /// Takes one sample off the subscriber according to the delivery strategy.
    ///
    /// Kept synchronous so no payload lock outlives the decode.
    fn take_next(
        &self,
        subscriber: &SubscriberHandle,
    ) -> Result<Option<Arc<PayloadCell>>, TransportError> {
        let transport = self.session.transport();
        match (self.strategy, self.reused.get()) {
            (DeliveryStrategy::ReusingAllocation, Some(reused)) => {
                let mut payload = reused.payload.write();
                let mut info = reused.info.lock().unwrap_or_else(PoisonError::into_inner);
                if transport.decode_next_into(subscriber, &mut **payload, &mut info)? {
                    Ok(Some(reused.payload.clone()))
                } else {
                    Ok(None)
                }
            }
            _ => Ok(transport
                .decode_next(subscriber)?
                .map(|payload| Arc::new(PayloadCell::new(payload)))),
        }
    }

    async fn deliver(&self, payload: Arc<PayloadCell>) {
        let sequence = self.delivered.fetch_add(1, Ordering::AcqRel) + 1;
        if tracing::enabled!(Level::TRACE) {
            trace!(
                event = events::CONSUMER_DELIVER,
                component = COMPONENT,
                endpoint = &*self.endpoint_address,
                sequence,
                value = ?*payload.read(),
                "delivering sample"
            );
        }

        let message = InboundMessage::new(
            self.endpoint_address.clone(),
            self.type_id.clone(),
            payload,
        );
        match AssertUnwindSafe(self.handler.process(message))
            .catch_unwind()
            .await
        {
            Ok(Ok(())) => {}
            Ok(Err(err)) => error!(
                event = events::CONSUMER_HANDLER_FAILED,
                component = COMPONENT,
                endpoint = &*self.endpoint_address,
                sequence,
                err = %err,
                "inbound handler failed"
            ),
            Err(panic) => error!(
                event = events::CONSUMER_HANDLER_PANICKED,
                component = COMPONENT,
                endpoint = &*self.endpoint_address,
                sequence,
                reason = panic_message(panic.as_ref()),
                "inbound handler panicked"
            ),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[async_trait]
impl SubscriberListener for ConsumerCore {
    async fn on_new_data_message(&self, subscriber: &SubscriberHandle) {
        if !self.active.load(Ordering::Acquire) {
            // Take the sample anyway so a restarted consumer does not lag behind.
            let discarded = self.session.transport().decode_next(subscriber);
            trace!(
                event = events::CONSUMER_DROP_INACTIVE,
                component = COMPONENT,
                endpoint = &*self.endpoint_address,
                reason = fields::REASON_CONSUMER_INACTIVE,
                discarded = matches!(discarded, Ok(Some(_))),
                "dropping sample"
            );
            return;
        }

        match self.take_next(subscriber) {
            Ok(Some(payload)) => self.deliver(payload).await,
            Ok(None) => trace!(
                event = events::CONSUMER_DELIVER,
                component = COMPONENT,
                endpoint = &*self.endpoint_address,
                delivered = false,
                "no sample available"
            ),
            Err(err) => warn!(
                event = events::CONSUMER_DECODE_FAILED,
                component = COMPONENT,
                endpoint = &*self.endpoint_address,
                err = %err,
                "unable to decode sample"
            ),
        }
    }

    async fn on_subscription_matched(&self, subscriber: &SubscriberHandle, info: MatchingInfo) {
        info!(
            event = events::CONSUMER_SUBSCRIPTION_MATCHED,
            component = COMPONENT,
            endpoint = &*self.endpoint_address,
            guid = %subscriber.guid(),
            remote_guid = %info.remote_guid,
            status = ?info.status,
            "subscription matching changed"
        );
    }
}

/// Delivers every sample of one endpoint to an [`InboundHandler`].
///
/// The handler is awaited before the next sample is taken. Handler errors and
/// panics are logged and never reach the transport.
pub struct Consumer {
    core: Arc<ConsumerCore>,
}

impl Consumer {
    pub fn new(
        session: Arc<EndpointSession>,
        strategy: DeliveryStrategy,
        handler: Arc<dyn InboundHandler>,
    ) -> Self {
        let endpoint_address: Arc<str> = Arc::from(session.endpoint_address());
        let type_id: Arc<str> = Arc::from(session.descriptor().type_id());
        Self {
            core: Arc::new(ConsumerCore {
                session,
                handler,
                strategy,
                endpoint_address,
                type_id,
                reused: OnceLock::new(),
                active: AtomicBool::new(false),
                delivered: AtomicU64::new(0),
            }),
        }
    }

    pub fn endpoint_address(&self) -> &str {
        &self.core.endpoint_address
    }

    pub fn delivery_strategy(&self) -> DeliveryStrategy {
        self.core.strategy
    }

    pub fn session(&self) -> &Arc<EndpointSession> {
        &self.core.session
    }

    /// Number of samples handed to the handler so far.
    pub fn delivered_count(&self) -> u64 {
        self.core.delivered.load(Ordering::Acquire)
    }

    pub fn is_active(&self) -> bool {
        self.core.active.load(Ordering::Acquire)
    }

    /// Binds this consumer to the endpoint subscriber, creating it if needed.
    pub async fn start(&self) -> Result<(), GatewayError> {
        let core = &self.core;
        if core.strategy == DeliveryStrategy::ReusingAllocation {
            core.reused.get_or_init(|| ReusedSample {
                payload: Arc::new(PayloadCell::new(core.session.type_support().create_payload())),
                info: Mutex::new(SampleInfo::default()),
            });
        }

        // Transient-local history may be replayed while the subscriber is created.
        core.active.store(true, Ordering::Release);
        let listener: Arc<dyn SubscriberListener> = core.clone();
        match core.session.get_subscriber(listener).await {
            Ok(subscriber) => {
                info!(
                    event = events::CONSUMER_START,
                    component = COMPONENT,
                    endpoint = &*core.endpoint_address,
                    guid = %subscriber.guid(),
                    delivery_mode = ?core.strategy,
                    "consumer started"
                );
                Ok(())
            }
            Err(err) => {
                core.active.store(false, Ordering::Release);
                warn!(
                    event = events::CONSUMER_START_FAILED,
                    component = COMPONENT,
                    endpoint = &*core.endpoint_address,
                    err = %err,
                    "unable to start consumer"
                );
                Err(err)
            }
        }
    }

    /// Stops delivery; samples arriving afterwards are taken and dropped.
    pub fn stop(&self) {
        if self.core.active.swap(false, Ordering::AcqRel) {
            info!(
                event = events::CONSUMER_STOP,
                component = COMPONENT,
                endpoint = &*self.core.endpoint_address,
                delivered = self.delivered_count(),
                "consumer stopped"
            );
        }
    }
}
