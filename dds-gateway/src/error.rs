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

//! Failure taxonomy for endpoint resolution, session lifecycle and the data paths.

use crate::transport::TransportError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors surfaced synchronously to the caller that resolved or drove an endpoint.
#[derive(Debug)]
pub enum GatewayError {
    /// The address does not match `<topic>:<domain>/<typeId>`.
    MalformedAddress { address: String, reason: String },
    /// A QoS profile was named explicitly but is not registered.
    ProfileNotFound(String),
    /// No type support is registered for the payload type id.
    SerializerUnavailable(String),
    /// The transport could not allocate a participant, publisher or subscriber.
    TransportUnavailable(TransportError),
    /// The transport failed while writing a sample.
    TransportWriteFailure(TransportError),
    /// The transport rejected the shape of the payload.
    SerializationFailure(TransportError),
    /// A producer or consumer was used before it was started.
    NotStarted(String),
    /// The endpoint session was already stopped.
    SessionStopped(String),
    /// The endpoint subscriber already delivers to another consumer.
    SubscriberInUse(String),
    /// The endpoint is already resolved under another QoS profile.
    QosConflict {
        address: String,
        existing: Option<String>,
        requested: Option<String>,
    },
}

impl GatewayError {
    pub(crate) fn malformed(address: &str, reason: &str) -> Self {
        GatewayError::MalformedAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }
}

fn profile_label(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or("<none>")
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::MalformedAddress { address, reason } => {
                write!(f, "invalid DDS address '{address}': {reason}")
            }
            GatewayError::ProfileNotFound(name) => {
                write!(f, "no QoS profile registered under '{name}'")
            }
            GatewayError::SerializerUnavailable(type_id) => {
                write!(f, "no type support registered for '{type_id}'")
            }
            GatewayError::TransportUnavailable(err) => {
                write!(f, "transport unable to allocate resources: {err}")
            }
            GatewayError::TransportWriteFailure(err) => {
                write!(f, "transport write failed: {err}")
            }
            GatewayError::SerializationFailure(err) => {
                write!(f, "payload rejected by transport: {err}")
            }
            GatewayError::NotStarted(address) => {
                write!(f, "endpoint '{address}' is not started")
            }
            GatewayError::SessionStopped(address) => {
                write!(f, "endpoint session '{address}' is stopped")
            }
            GatewayError::SubscriberInUse(address) => {
                write!(f, "endpoint '{address}' already has a bound consumer")
            }
            GatewayError::QosConflict {
                address,
                existing,
                requested,
            } => write!(
                f,
                "endpoint '{address}' already resolved with QoS profile '{}', requested '{}'",
                profile_label(existing),
                profile_label(requested)
            ),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GatewayError::TransportUnavailable(err)
            | GatewayError::TransportWriteFailure(err)
            | GatewayError::SerializationFailure(err) => Some(err),
            _ => None,
        }
    }
}
