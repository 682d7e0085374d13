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

mod support;

use dds_gateway::qos::PROFILE_HIGH;
use dds_gateway::{GatewayError, SessionState};
use integration_test_utils::{test_message, RecordingHandler, UnavailableTransport};
use loopback_transport::LoopbackTransport;
use std::sync::Arc;
use std::time::Duration;
use support::{gateway, test_uri, DelayedTransport, FaultyTransport};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_get_publisher_allocates_once() {
    integration_test_utils::init_logging();
    let loopback = Arc::new(LoopbackTransport::new("lifecycle"));
    let transport = Arc::new(DelayedTransport::new(
        loopback.clone(),
        Duration::from_millis(20),
    ));
    let gateway = gateway("lifecycle", transport);
    let session = gateway
        .resolve_endpoint(&test_uri("Chat", Some(PROFILE_HIGH), false))
        .await
        .unwrap();

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let session = session.clone();
        tasks.push(tokio::spawn(async move { session.get_publisher().await }));
    }
    let mut guids = Vec::new();
    for task in tasks {
        let publisher = task.await.unwrap().expect("publisher should be created");
        guids.push(publisher.guid());
    }

    guids.dedup();
    assert_eq!(guids.len(), 1);
    let stats = loopback.stats();
    assert_eq!(stats.participants_created, 1);
    assert_eq!(stats.publishers_created, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn session_state_follows_allocation_and_stop() {
    integration_test_utils::init_logging();
    let loopback = Arc::new(LoopbackTransport::new("lifecycle"));
    let gateway = gateway("lifecycle", loopback.clone());
    let session = gateway
        .resolve_endpoint(&test_uri("Chat", Some(PROFILE_HIGH), false))
        .await
        .unwrap();

    assert_eq!(session.state(), SessionState::Uninitialized);
    session.ensure_participant().await.unwrap();
    assert_eq!(session.state(), SessionState::ParticipantReady);
    session.get_publisher().await.unwrap();
    assert_eq!(
        session.state(),
        SessionState::Ready {
            publisher: true,
            subscriber: false
        }
    );
    assert!(session.subscriber().is_none());

    session.stop().await;
    session.stop().await;

    assert_eq!(session.state(), SessionState::Stopped);
    assert_eq!(loopback.stats().participants_removed, 1);
    assert!(matches!(
        session.get_publisher().await,
        Err(GatewayError::SessionStopped(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn publisher_attributes_carry_the_profile() {
    integration_test_utils::init_logging();
    let gateway = gateway("lifecycle", Arc::new(LoopbackTransport::new("lifecycle")));
    let session = gateway
        .resolve_endpoint(&test_uri("Chat", Some(PROFILE_HIGH), false))
        .await
        .unwrap();

    let publisher = session.get_publisher().await.unwrap();

    let attributes = publisher.attributes();
    assert_eq!(attributes.topic.topic_name, "Chat");
    assert_eq!(attributes.topic.type_name, integration_test_utils::TEST_IDL_TYPE_ID);
    assert_eq!(
        attributes.qos.durability,
        dds_gateway::qos::DurabilityKind::TransientLocal
    );
    assert_eq!(
        attributes.topic.history.kind,
        dds_gateway::qos::HistoryKind::KeepAll
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unavailable_transport_surfaces_on_start() {
    integration_test_utils::init_logging();
    let transport = Arc::new(UnavailableTransport::new());
    let gateway = gateway("lifecycle", transport.clone());
    let uri = test_uri("Chat", None, false);

    let producer = gateway.create_producer(&uri).await.unwrap();
    assert!(matches!(
        producer.start().await,
        Err(GatewayError::TransportUnavailable(_))
    ));
    assert!(!producer.is_started().await);

    let consumer = gateway
        .create_consumer(&uri, RecordingHandler::new())
        .await
        .unwrap();
    assert!(matches!(
        consumer.start().await,
        Err(GatewayError::TransportUnavailable(_))
    ));
    assert!(!consumer.is_active());
    assert_eq!(transport.attempts(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn producer_requires_start() {
    integration_test_utils::init_logging();
    let gateway = gateway("lifecycle", Arc::new(LoopbackTransport::new("lifecycle")));
    let producer = gateway
        .create_producer(&test_uri("Chat", None, false))
        .await
        .unwrap();

    assert!(matches!(
        producer.send(&test_message(0)).await,
        Err(GatewayError::NotStarted(_))
    ));

    producer.start().await.unwrap();
    producer.send(&test_message(1)).await.unwrap();
    producer.stop().await;

    assert!(matches!(
        producer.send(&test_message(2)).await,
        Err(GatewayError::NotStarted(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_payload_type_is_a_serialization_failure() {
    integration_test_utils::init_logging();
    let gateway = gateway("lifecycle", Arc::new(LoopbackTransport::new("lifecycle")));
    let producer = gateway
        .create_producer(&test_uri("Chat", None, false))
        .await
        .unwrap();
    producer.start().await.unwrap();

    assert!(matches!(
        producer.send(&String::from("not a TestIdl")).await,
        Err(GatewayError::SerializationFailure(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn second_consumer_on_one_address_is_rejected() {
    integration_test_utils::init_logging();
    let gateway = gateway("lifecycle", Arc::new(LoopbackTransport::new("lifecycle")));
    let uri = test_uri("Chat", Some(PROFILE_HIGH), false);

    let first = gateway
        .create_consumer(&uri, RecordingHandler::new())
        .await
        .unwrap();
    first.start().await.unwrap();
    let second = gateway
        .create_consumer(&uri, RecordingHandler::new())
        .await
        .unwrap();

    assert!(matches!(
        second.start().await,
        Err(GatewayError::SubscriberInUse(_))
    ));
    assert!(first.is_active());
    assert!(!second.is_active());

    first.stop();
    first.start().await.expect("a consumer may restart on its own subscriber");
}

#[tokio::test(flavor = "multi_thread")]
async fn stop_during_allocation_releases_the_participant() {
    integration_test_utils::init_logging();
    let loopback = Arc::new(LoopbackTransport::new("lifecycle"));
    let transport = Arc::new(DelayedTransport::new(
        loopback.clone(),
        Duration::from_millis(50),
    ));
    let gateway = gateway("lifecycle", transport);
    let session = gateway
        .resolve_endpoint(&test_uri("Chat", Some(PROFILE_HIGH), false))
        .await
        .unwrap();

    let allocating = {
        let session = session.clone();
        tokio::spawn(async move { session.get_publisher().await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    gateway.stop().await;
    let _ = allocating.await.unwrap();

    assert!(session.is_stopped());
    let stats = loopback.stats();
    assert_eq!(stats.participants_removed, stats.participants_created);
    assert!(matches!(
        session.get_publisher().await,
        Err(GatewayError::SessionStopped(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_write_is_a_transport_write_failure() {
    integration_test_utils::init_logging();
    let transport = Arc::new(FaultyTransport::failing_writes(Arc::new(
        LoopbackTransport::new("lifecycle"),
    )));
    let gateway = gateway("lifecycle", transport);
    let producer = gateway
        .create_producer(&test_uri("Chat", None, false))
        .await
        .unwrap();
    producer.start().await.unwrap();

    match producer.send(&test_message(0)).await {
        Err(GatewayError::TransportWriteFailure(err)) => {
            assert_eq!(err.kind(), dds_gateway::transport::TransportErrorKind::Io)
        }
        other => panic!("expected TransportWriteFailure, got {other:?}"),
    }
    assert!(producer.is_started().await);
}
