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
use dds_gateway::DeliveryStrategy;
use integration_test_utils::{
    send_test_messages, test_message, wait_for_count, FailingHandler, PanickingHandler,
    RecordingHandler, TestIdl,
};
use loopback_transport::LoopbackTransport;
use std::sync::Arc;
use support::{gateway, test_uri, FaultyTransport, DELIVERY_TIMEOUT, MESSAGE_COUNT, WAIT_WINDOW};

fn ids(messages: &[TestIdl]) -> Vec<u32> {
    messages.iter().map(|message| message.id).collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn fresh_allocation_delivers_distinct_payloads_in_order() {
    integration_test_utils::init_logging();
    let gateway = gateway("reuse", Arc::new(LoopbackTransport::new("reuse")));
    let uri = test_uri("Chat", None, false);

    let handler = RecordingHandler::new();
    let consumer = gateway.create_consumer(&uri, handler.clone()).await.unwrap();
    assert_eq!(consumer.delivery_strategy(), DeliveryStrategy::FreshAllocation);
    consumer.start().await.unwrap();
    let producer = gateway.create_producer(&uri).await.unwrap();
    producer.start().await.unwrap();

    send_test_messages(&producer, MESSAGE_COUNT).await.unwrap();
    let expected = MESSAGE_COUNT as usize;
    assert_eq!(
        wait_for_count(expected, DELIVERY_TIMEOUT, || handler.count()).await,
        expected
    );

    assert_eq!(handler.distinct_instances().await, expected);
    let ids: Vec<u32> = handler
        .messages()
        .await
        .iter()
        .filter_map(|message| message.payload().with(|payload: &TestIdl| payload.id))
        .collect();
    assert_eq!(ids, (0..MESSAGE_COUNT).collect::<Vec<_>>());
    assert_eq!(consumer.delivered_count(), MESSAGE_COUNT as u64);
}

#[tokio::test(flavor = "multi_thread")]
async fn reusing_allocation_overwrites_one_payload() {
    integration_test_utils::init_logging();
    let gateway = gateway("reuse", Arc::new(LoopbackTransport::new("reuse")));

    let handler = RecordingHandler::new();
    let consumer = gateway
        .create_consumer(&test_uri("Chat", None, true), handler.clone())
        .await
        .unwrap();
    assert_eq!(
        consumer.delivery_strategy(),
        DeliveryStrategy::ReusingAllocation
    );
    consumer.start().await.unwrap();
    let producer = gateway
        .create_producer(&test_uri("Chat", None, false))
        .await
        .unwrap();
    producer.start().await.unwrap();

    send_test_messages(&producer, MESSAGE_COUNT).await.unwrap();
    let expected = MESSAGE_COUNT as usize;
    assert_eq!(
        wait_for_count(expected, DELIVERY_TIMEOUT, || handler.count()).await,
        expected
    );

    assert_eq!(handler.distinct_instances().await, 1);
    assert_eq!(
        ids(&handler.delivered::<TestIdl>().await),
        (0..MESSAGE_COUNT).collect::<Vec<_>>()
    );
    let last = test_message(MESSAGE_COUNT - 1);
    for message in handler.messages().await {
        assert_eq!(message.payload().get_cloned::<TestIdl>(), Some(last.clone()));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn high_profile_reuse_delivers_each_sample_through_one_instance() {
    integration_test_utils::init_logging();
    let transport = Arc::new(LoopbackTransport::new("reuse"));
    let sender = gateway("sender", transport.clone());
    let receiver = gateway("receiver", transport.clone());

    let handler = RecordingHandler::new();
    let consumer = receiver
        .create_consumer(&test_uri("Chat", Some(PROFILE_HIGH), true), handler.clone())
        .await
        .unwrap();
    consumer.start().await.unwrap();
    let producer = sender
        .create_producer(&test_uri("Chat", Some(PROFILE_HIGH), false))
        .await
        .unwrap();
    producer.start().await.unwrap();

    send_test_messages(&producer, MESSAGE_COUNT).await.unwrap();
    let expected = MESSAGE_COUNT as usize;
    assert_eq!(
        wait_for_count(expected, DELIVERY_TIMEOUT, || handler.count()).await,
        expected
    );

    assert_eq!(handler.distinct_instances().await, 1);
    let delivered = handler.delivered::<TestIdl>().await;
    assert_eq!(ids(&delivered), (0..MESSAGE_COUNT).collect::<Vec<_>>());
    assert_eq!(delivered[5], test_message(5));
}

#[tokio::test(flavor = "multi_thread")]
async fn notification_without_sample_delivers_nothing() {
    integration_test_utils::init_logging();
    let transport = Arc::new(FaultyTransport::doubled_notifications(Arc::new(
        LoopbackTransport::new("reuse"),
    )));
    let gateway = gateway("reuse", transport);
    let uri = test_uri("Chat", None, true);

    let handler = RecordingHandler::new();
    let consumer = gateway.create_consumer(&uri, handler.clone()).await.unwrap();
    consumer.start().await.unwrap();
    let producer = gateway.create_producer(&uri).await.unwrap();
    producer.start().await.unwrap();

    send_test_messages(&producer, MESSAGE_COUNT).await.unwrap();
    let expected = MESSAGE_COUNT as usize;
    assert_eq!(
        wait_for_count(expected, DELIVERY_TIMEOUT, || handler.count()).await,
        expected
    );
    tokio::time::sleep(WAIT_WINDOW).await;

    assert_eq!(handler.count(), expected);
    assert_eq!(consumer.delivered_count(), MESSAGE_COUNT as u64);
    assert_eq!(
        ids(&handler.delivered::<TestIdl>().await),
        (0..MESSAGE_COUNT).collect::<Vec<_>>()
    );
    assert!(consumer.is_active());
}

#[tokio::test(flavor = "multi_thread")]
async fn restarted_consumer_skips_samples_sent_while_stopped() {
    integration_test_utils::init_logging();
    let transport = Arc::new(LoopbackTransport::new("reuse"));
    let gateway = gateway("reuse", transport.clone());
    let uri = test_uri("Chat", None, false);

    let handler = RecordingHandler::new();
    let consumer = gateway.create_consumer(&uri, handler.clone()).await.unwrap();
    consumer.start().await.unwrap();
    consumer.stop();
    let producer = gateway.create_producer(&uri).await.unwrap();
    producer.start().await.unwrap();

    send_test_messages(&producer, 5).await.unwrap();
    let subscriber = consumer.session().subscriber().expect("subscriber exists");
    let drained = wait_for_count(5, DELIVERY_TIMEOUT, || {
        5 - transport.pending_samples(&subscriber).min(5)
    })
    .await;
    assert_eq!(drained, 5);

    consumer.start().await.unwrap();
    producer.send(&test_message(100)).await.unwrap();
    assert_eq!(wait_for_count(1, DELIVERY_TIMEOUT, || handler.count()).await, 1);
    tokio::time::sleep(WAIT_WINDOW).await;

    assert_eq!(ids(&handler.delivered::<TestIdl>().await), vec![100]);
}

#[tokio::test(flavor = "multi_thread")]
async fn failing_handler_does_not_stop_delivery() {
    integration_test_utils::init_logging();
    let gateway = gateway("reuse", Arc::new(LoopbackTransport::new("reuse")));
    let uri = test_uri("Chat", None, false);

    let handler = FailingHandler::new();
    let consumer = gateway.create_consumer(&uri, handler.clone()).await.unwrap();
    consumer.start().await.unwrap();
    let producer = gateway.create_producer(&uri).await.unwrap();
    producer.start().await.unwrap();

    send_test_messages(&producer, MESSAGE_COUNT).await.unwrap();
    let expected = MESSAGE_COUNT as usize;
    assert_eq!(
        wait_for_count(expected, DELIVERY_TIMEOUT, || handler.attempts()).await,
        expected
    );
    assert!(consumer.is_active());
}

#[tokio::test(flavor = "multi_thread")]
async fn panicking_handler_does_not_stop_delivery() {
    integration_test_utils::init_logging();
    let gateway = gateway("reuse", Arc::new(LoopbackTransport::new("reuse")));
    let uri = test_uri("Chat", None, true);

    let handler = PanickingHandler::new();
    let consumer = gateway.create_consumer(&uri, handler.clone()).await.unwrap();
    consumer.start().await.unwrap();
    let producer = gateway.create_producer(&uri).await.unwrap();
    producer.start().await.unwrap();

    send_test_messages(&producer, MESSAGE_COUNT).await.unwrap();
    let expected = MESSAGE_COUNT as usize;
    assert_eq!(
        wait_for_count(expected, DELIVERY_TIMEOUT, || handler.attempts()).await,
        expected
    );
    assert_eq!(consumer.delivered_count(), MESSAGE_COUNT as u64);
}

#[tokio::test(flavor = "multi_thread")]
async fn stopped_consumer_drops_notifications() {
    integration_test_utils::init_logging();
    let transport = Arc::new(LoopbackTransport::new("reuse"));
    let gateway = gateway("reuse", transport.clone());
    let uri = test_uri("Chat", None, false);

    let handler = RecordingHandler::new();
    let consumer = gateway.create_consumer(&uri, handler.clone()).await.unwrap();
    consumer.start().await.unwrap();
    consumer.stop();
    let producer = gateway.create_producer(&uri).await.unwrap();
    producer.start().await.unwrap();

    send_test_messages(&producer, MESSAGE_COUNT).await.unwrap();
    let written = wait_for_count(MESSAGE_COUNT as usize, DELIVERY_TIMEOUT, || {
        transport.stats().samples_delivered as usize
    })
    .await;

    assert_eq!(written, MESSAGE_COUNT as usize);
    tokio::time::sleep(WAIT_WINDOW).await;
    assert_eq!(handler.count(), 0);
}
