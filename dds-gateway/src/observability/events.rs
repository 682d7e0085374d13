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

//! Canonical structured event names used across `dds-gateway`.

// QoS and type registry events.
pub const QOS_PROFILE_REGISTERED: &str = "qos_profile_registered";
pub const QOS_PROFILE_REPLACED: &str = "qos_profile_replaced";
pub const QOS_PROFILE_MISSING: &str = "qos_profile_missing";
pub const TYPE_SUPPORT_REGISTERED: &str = "type_support_registered";
pub const TYPE_SUPPORT_MISSING: &str = "type_support_missing";

// Endpoint resolution and session lifecycle events.
pub const ENDPOINT_RESOLVE_FAILED: &str = "endpoint_resolve_failed";
pub const SESSION_CREATE: &str = "session_create";
pub const SESSION_REUSE: &str = "session_reuse";
pub const SESSION_QOS_CONFLICT: &str = "session_qos_conflict";
pub const SESSION_PARTICIPANT_CREATE_OK: &str = "session_participant_create_ok";
pub const SESSION_PARTICIPANT_CREATE_FAILED: &str = "session_participant_create_failed";
pub const SESSION_PUBLISHER_CREATE_OK: &str = "session_publisher_create_ok";
pub const SESSION_PUBLISHER_CREATE_FAILED: &str = "session_publisher_create_failed";
pub const SESSION_SUBSCRIBER_CREATE_OK: &str = "session_subscriber_create_ok";
pub const SESSION_SUBSCRIBER_CREATE_FAILED: &str = "session_subscriber_create_failed";
pub const SESSION_STOP_OK: &str = "session_stop_ok";
pub const SESSION_STOP_FAILED: &str = "session_stop_failed";
pub const GATEWAY_START: &str = "gateway_start";
pub const GATEWAY_STOP: &str = "gateway_stop";

// Producer events.
pub const PRODUCER_START: &str = "producer_start";
pub const PRODUCER_STOP: &str = "producer_stop";
pub const PRODUCER_SEND_OK: &str = "producer_send_ok";
pub const PRODUCER_SEND_FAILED: &str = "producer_send_failed";

// Consumer events.
pub const CONSUMER_START: &str = "consumer_start";
pub const CONSUMER_START_FAILED: &str = "consumer_start_failed";
pub const CONSUMER_STOP: &str = "consumer_stop";
pub const CONSUMER_DELIVER: &str = "consumer_deliver";
pub const CONSUMER_DROP_INACTIVE: &str = "consumer_drop_inactive";
pub const CONSUMER_DECODE_FAILED: &str = "consumer_decode_failed";
pub const CONSUMER_HANDLER_FAILED: &str = "consumer_handler_failed";
pub const CONSUMER_HANDLER_PANICKED: &str = "consumer_handler_panicked";
pub const CONSUMER_SUBSCRIPTION_MATCHED: &str = "consumer_subscription_matched";

// Runtime events for transport dispatch threads.
pub const RUNTIME_SPAWN_OK: &str = "runtime_spawn_ok";
pub const RUNTIME_SPAWN_FAILED: &str = "runtime_spawn_failed";
pub const RUNTIME_DISPATCH_CLOSED: &str = "runtime_dispatch_closed";
