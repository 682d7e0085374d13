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

//! Runtime helper for subscriber notification loops.

use dds_gateway::observability::{events, fields};
use dds_gateway::transport::{MatchingInfo, SubscriberHandle, SubscriberListener};
use std::sync::Arc;
use std::thread;
use tokio::runtime::Builder;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

const COMPONENT: &str = "loopback_dispatch";
const READER_DISPATCH_THREAD_PREFIX: &str = "loopback-reader";

#[derive(Clone, Copy, Debug)]
pub(crate) enum ReaderEvent {
    NewData,
    Matched(MatchingInfo),
}

/// Runs `listener` callbacks for one subscriber on a dedicated thread.
///
/// The loop ends once every sender for `receiver` is dropped.
pub(crate) fn spawn_reader_dispatch_loop(
    subscriber: SubscriberHandle,
    listener: Arc<dyn SubscriberListener>,
    mut receiver: UnboundedReceiver<ReaderEvent>,
) -> std::io::Result<thread::JoinHandle<()>> {
    let thread_name = format!("{READER_DISPATCH_THREAD_PREFIX}-{}", subscriber.guid());
    let runtime = Builder::new_current_thread().enable_all().build()?;

    let spawned = thread::Builder::new()
        .name(thread_name.clone())
        .spawn(move || {
            runtime.block_on(async move {
                while let Some(event) = receiver.recv().await {
                    match event {
                        ReaderEvent::NewData => listener.on_new_data_message(&subscriber).await,
                        ReaderEvent::Matched(info) => {
                            listener.on_subscription_matched(&subscriber, info).await
                        }
                    }
                }
                debug!(
                    event = events::RUNTIME_DISPATCH_CLOSED,
                    component = COMPONENT,
                    worker_thread = %fields::current_thread_name_or_default(),
                    reason = fields::REASON_CHANNEL_CLOSED,
                    "reader dispatch loop finished"
                );
            });
        });

    match &spawned {
        Ok(_) => debug!(
            event = events::RUNTIME_SPAWN_OK,
            component = COMPONENT,
            worker_thread = %thread_name,
            "reader dispatch thread spawned"
        ),
        Err(err) => warn!(
            event = events::RUNTIME_SPAWN_FAILED,
            component = COMPONENT,
            worker_thread = %thread_name,
            err = %err,
            "unable to spawn reader dispatch thread"
        ),
    }
    spawned
}
