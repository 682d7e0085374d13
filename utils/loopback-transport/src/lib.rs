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

//! In-process [`PubSubTransport`](dds_gateway::transport::PubSubTransport).
//!
//! Participants, publishers and subscribers live in one process. Samples are
//! serialized by the writer's adapter and decoded by the reader's, publishers
//! and subscribers only see each other when domain, topic, type and QoS are
//! compatible, and transient-local writers replay their history to late
//! joining transient-local readers. Each subscriber gets its own notification
//! thread.

mod dispatch_runtime;
mod loopback;
mod matching;

pub use loopback::{LoopbackStats, LoopbackTransport, DEFAULT_MAX_SAMPLES};
pub use matching::{endpoints_match, qos_compatible};
