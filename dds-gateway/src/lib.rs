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

//! # dds-gateway
//!
//! `dds-gateway` exposes a topic/domain/type addressed publish-subscribe
//! transport as uniformly addressable endpoints.
//!
//! An endpoint is described by a compact uri:
//!
//! ```text
//! dds:<topic>:<domain>/<typeId>[?qos=<profile>][&reuse=<bool>]
//! ```
//!
//! [`DdsGateway`] resolves a uri into a shared [`EndpointSession`], applying the
//! named [`QosProfile`] onto the transport attributes, and hands out a
//! [`Producer`] for the write path or a [`Consumer`] for the read path.
//!
//! ```
//! use dds_gateway::descriptor::{EndpointDescriptor, EndpointUriBuilder};
//! use dds_gateway::qos::{QosProfileRegistry, ReliabilityKind, PROFILE_HIGH};
//!
//! let uri = EndpointUriBuilder::new()
//!     .content("demo.ChatMessage")
//!     .domain(3)
//!     .quality(PROFILE_HIGH)
//!     .build()
//!     .unwrap();
//! let descriptor = EndpointDescriptor::from_uri(&uri).unwrap();
//!
//! let profiles = QosProfileRegistry::new();
//! let profile = profiles.lookup(descriptor.qos_profile_name().unwrap()).unwrap();
//! assert_eq!(profile.reliability(), Some(ReliabilityKind::Reliable));
//! ```
//!
//! ## Internal architecture map
//!
//! - Descriptor: uri parsing and building
//! - QoS: profile registry and configurator
//! - Types: payload trait, codecs and the type registry
//! - Transport: the middleware seam implemented outside this crate
//! - Session: lazy participant/publisher/subscriber allocation per address
//! - Data plane: producer write path and consumer notification path
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events and never installs a global
//! subscriber. Binaries and tests initialise `tracing_subscriber` themselves.

pub mod data_plane;
pub mod descriptor;
mod error;
mod gateway;
#[doc(hidden)]
pub mod observability;
pub mod qos;
pub mod session;
pub mod transport;
pub mod types;

pub use data_plane::{Consumer, DeliveryStrategy, InboundHandler, InboundMessage, Producer};
pub use descriptor::{EndpointDescriptor, EndpointUriBuilder};
pub use error::GatewayError;
pub use gateway::DdsGateway;
pub use qos::{QosProfile, QosProfileRegistry};
pub use session::{EndpointSession, SessionState};
