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

//! Shared field values and value-format helpers.

pub const NONE: &str = "none";
pub const REASON_CONSUMER_INACTIVE: &str = "consumer_inactive";
pub const REASON_CHANNEL_CLOSED: &str = "channel_closed";
pub const DEFAULT_WORKER_THREAD: &str = "unknown-thread";

pub fn format_optional(value: Option<&str>) -> String {
    value.unwrap_or(NONE).to_string()
}

pub fn thread_name_or_default(thread_name: Option<&str>) -> String {
    thread_name.unwrap_or(DEFAULT_WORKER_THREAD).to_string()
}

pub fn current_thread_name_or_default() -> String {
    thread_name_or_default(std::thread::current().name())
}

#[cfg(test)]
mod tests {
    use super::{format_optional, thread_name_or_default, DEFAULT_WORKER_THREAD, NONE};

    #[test]
    fn format_optional_falls_back_to_none() {
        assert_eq!(format_optional(Some("high")), "high");
        assert_eq!(format_optional(None), NONE);
    }

    #[test]
    fn thread_name_or_default_uses_fallback() {
        assert_eq!(thread_name_or_default(None), DEFAULT_WORKER_THREAD);
        assert_eq!(thread_name_or_default(Some("reader-1")), "reader-1");
    }
}
