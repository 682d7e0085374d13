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

//! Gateway facade: resolves endpoint uris into shared sessions and hands out
//! producers and consumers for them.

use crate::data_plane::{Consumer, DeliveryStrategy, InboundHandler, Producer};
use crate::descriptor::EndpointDescriptor;
use crate::error::GatewayError;
use crate::observability::{events, fields};
use crate::qos::QosProfileRegistry;
use crate::session::EndpointSession;
use crate::transport::PubSubTransport;
use crate::types::TypeRegistry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const COMPONENT: &str = "gateway";

/// Entry point for endpoint uris.
///
/// Sessions are keyed by the query-stripped address: two uris that differ only
/// in their `reuse` flag share a session, while naming a different QoS profile
/// for a live address fails with `QosConflict`.
pub struct DdsGateway {
    name: String,
    transport: Arc<dyn PubSubTransport>,
    qos_profiles: Arc<QosProfileRegistry>,
    types: Arc<TypeRegistry>,
    sessions: Mutex<HashMap<String, Arc<EndpointSession>>>,
}

impl DdsGateway {
    pub fn new(
        name: &str,
        transport: Arc<dyn PubSubTransport>,
        qos_profiles: Arc<QosProfileRegistry>,
        types: Arc<TypeRegistry>,
    ) -> Self {
        debug!(
            event = events::GATEWAY_START,
            component = COMPONENT,
            gateway = name,
            "gateway created"
        );
        Self {
            name: name.to_string(),
            transport,
            qos_profiles,
            types,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// A gateway backed by the process-wide [`QosProfileRegistry::global`].
    pub fn with_global_profiles(
        name: &str,
        transport: Arc<dyn PubSubTransport>,
        types: Arc<TypeRegistry>,
    ) -> Self {
        Self::new(name, transport, QosProfileRegistry::global(), types)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qos_profiles(&self) -> &Arc<QosProfileRegistry> {
        &self.qos_profiles
    }

    pub fn types(&self) -> &Arc<TypeRegistry> {
        &self.types
    }

    /// Returns the session for `uri`, creating it on first resolution.
    pub async fn resolve_endpoint(&self, uri: &str) -> Result<Arc<EndpointSession>, GatewayError> {
        let descriptor = self.parse(uri)?;
        self.resolve(descriptor).await
    }

    /// A producer for `uri`; call [`Producer::start`] before sending.
    pub async fn create_producer(&self, uri: &str) -> Result<Producer, GatewayError> {
        let session = self.resolve_endpoint(uri).await?;
        Ok(Producer::new(session))
    }

    /// A consumer for `uri` delivering to `handler`; the `reuse` flag of this
    /// uri picks its allocation strategy. Call [`Consumer::start`] to bind it.
    pub async fn create_consumer(
        &self,
        uri: &str,
        handler: Arc<dyn InboundHandler>,
    ) -> Result<Consumer, GatewayError> {
        let descriptor = self.parse(uri)?;
        let strategy = DeliveryStrategy::from_reuse_flag(descriptor.reuse_inbound());
        let session = self.resolve(descriptor).await?;
        Ok(Consumer::new(session, strategy, handler))
    }

    /// Addresses of the live sessions, sorted.
    pub async fn endpoint_addresses(&self) -> Vec<String> {
        let mut addresses: Vec<String> = self.sessions.lock().await.keys().cloned().collect();
        addresses.sort();
        addresses
    }

    /// Stops every session this gateway resolved.
    pub async fn stop(&self) {
        let sessions: Vec<Arc<EndpointSession>> = {
            let mut sessions = self.sessions.lock().await;
            sessions.drain().map(|(_, session)| session).collect()
        };
        let stopped = sessions.len();
        for session in sessions {
            session.stop().await;
        }
        info!(
            event = events::GATEWAY_STOP,
            component = COMPONENT,
            gateway = %self.name,
            sessions = stopped,
            "gateway stopped"
        );
    }

    fn parse(&self, uri: &str) -> Result<EndpointDescriptor, GatewayError> {
        EndpointDescriptor::from_uri(uri).inspect_err(|err| {
            warn!(
                event = events::ENDPOINT_RESOLVE_FAILED,
                component = COMPONENT,
                gateway = %self.name,
                endpoint = uri,
                err = %err,
                "unable to parse endpoint uri"
            )
        })
    }

    async fn resolve(
        &self,
        descriptor: EndpointDescriptor,
    ) -> Result<Arc<EndpointSession>, GatewayError> {
        let profile = match descriptor.qos_profile_name() {
            Some(name) => Some(self.qos_profiles.lookup(name).ok_or_else(|| {
                warn!(
                    event = events::QOS_PROFILE_MISSING,
                    component = COMPONENT,
                    gateway = %self.name,
                    qos_profile = name,
                    "endpoint names an unregistered QoS profile"
                );
                GatewayError::ProfileNotFound(name.to_string())
            })?),
            None => None,
        };
        let type_support = self.types.resolve(descriptor.type_id())?;
        let address = descriptor.endpoint_address();

        let mut sessions = self.sessions.lock().await;
        if let Some(existing) = sessions.get(&address).filter(|session| !session.is_stopped()) {
            let existing_profile = existing.qos_profile().map(|profile| profile.name().to_string());
            let requested_profile = descriptor.qos_profile_name().map(str::to_string);
            if existing_profile != requested_profile {
                warn!(
                    event = events::SESSION_QOS_CONFLICT,
                    component = COMPONENT,
                    gateway = %self.name,
                    endpoint = %address,
                    existing = %fields::format_optional(existing_profile.as_deref()),
                    requested = %fields::format_optional(requested_profile.as_deref()),
                    "endpoint already resolved with another QoS profile"
                );
                return Err(GatewayError::QosConflict {
                    address,
                    existing: existing_profile,
                    requested: requested_profile,
                });
            }
            debug!(
                event = events::SESSION_REUSE,
                component = COMPONENT,
                gateway = %self.name,
                endpoint = %address,
                "reusing endpoint session"
            );
            return Ok(existing.clone());
        }

        let session = Arc::new(EndpointSession::new(
            descriptor,
            self.transport.clone(),
            type_support,
            profile,
        ));
        info!(
            event = events::SESSION_CREATE,
            component = COMPONENT,
            gateway = %self.name,
            endpoint = %address,
            qos_profile = %fields::format_optional(session.qos_profile().map(|p| p.name())),
            "endpoint session created"
        );
        sessions.insert(address, session.clone());
        Ok(session)
    }
}
