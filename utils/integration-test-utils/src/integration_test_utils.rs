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

use dds_gateway::{GatewayError, Producer};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Installs a test-friendly `tracing` subscriber once per process.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Polls `current` until it reaches `expected` or `timeout` elapses; returns the last value seen.
pub async fn wait_for_count(
    expected: usize,
    timeout: Duration,
    current: impl Fn() -> usize,
) -> usize {
    let deadline = Instant::now() + timeout;
    loop {
        let seen = current();
        if seen >= expected || Instant::now() >= deadline {
            return seen;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Sends `count` [`TestIdl`](crate::TestIdl) messages with ids `0..count`.
pub async fn send_test_messages(producer: &Producer, count: u32) -> Result<(), GatewayError> {
    for id in 0..count {
        producer.send(&crate::test_message(id)).await?;
    }
    Ok(())
}
