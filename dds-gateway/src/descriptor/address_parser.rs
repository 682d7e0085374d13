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

//! Parsing of endpoint addresses into [`EndpointDescriptor`]s.

use crate::error::GatewayError;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;

/// Scheme prefix of a full endpoint uri.
pub const SCHEME: &str = "dds";
pub const QUERY_QOS: &str = "qos";
pub const QUERY_REUSE: &str = "reuse";

const NULL_PROFILE: &str = "null";
const ADDRESS_PATTERN: &str = r"^([A-Za-z0-9_]+):([0-9]+)/([A-Za-z0-9_]+(?:(?:\.|::)[A-Za-z0-9_]+)*)$";

fn address_regex() -> &'static Regex {
    static ADDRESS_REGEX: OnceLock<Regex> = OnceLock::new();
    ADDRESS_REGEX
        .get_or_init(|| Regex::new(ADDRESS_PATTERN).expect("address pattern is a valid regex"))
}

/// Structured form of an endpoint address.
///
/// # Examples
///
/// ```
/// use dds_gateway::descriptor::EndpointDescriptor;
///
/// let descriptor: EndpointDescriptor = "dds:Chat:0/demo.ChatMessage?qos=high&reuse=true"
///     .parse()
///     .unwrap();
///
/// assert_eq!(descriptor.topic_name(), "Chat");
/// assert_eq!(descriptor.domain_id(), 0);
/// assert_eq!(descriptor.type_id(), "demo.ChatMessage");
/// assert_eq!(descriptor.qos_profile_name(), Some("high"));
/// assert!(descriptor.reuse_inbound());
/// assert_eq!(descriptor.endpoint_address(), "dds:Chat:0/demo.ChatMessage");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EndpointDescriptor {
    topic_name: String,
    domain_id: u32,
    type_id: String,
    qos_profile_name: Option<String>,
    reuse_inbound: bool,
}

impl EndpointDescriptor {
    /// Creates a descriptor without a QoS profile and with reuse disabled.
    ///
    /// Returns `MalformedAddress` if the topic or type id fall outside the address grammar.
    pub fn new(topic_name: &str, domain_id: u32, type_id: &str) -> Result<Self, GatewayError> {
        let address = format!("{topic_name}:{domain_id}/{type_id}");
        if !address_regex().is_match(&address) {
            return Err(GatewayError::malformed(
                &address,
                "expected <topic>:<domain>/<typeId>",
            ));
        }
        Ok(Self {
            topic_name: topic_name.to_string(),
            domain_id,
            type_id: type_id.to_string(),
            qos_profile_name: None,
            reuse_inbound: false,
        })
    }

    pub fn with_qos_profile(mut self, name: Option<&str>) -> Self {
        self.qos_profile_name = normalize_profile_name(name);
        self
    }

    pub fn with_reuse_inbound(mut self, reuse_inbound: bool) -> Self {
        self.reuse_inbound = reuse_inbound;
        self
    }

    /// Parses the part of an address after the `dds:` scheme.
    pub fn parse(remaining: &str) -> Result<Self, GatewayError> {
        let (path, query) = match remaining.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (remaining, None),
        };

        let captures = address_regex().captures(path).ok_or_else(|| {
            GatewayError::malformed(remaining, "expected <topic>:<domain>/<typeId>")
        })?;
        let domain_id = captures[2]
            .parse::<u32>()
            .map_err(|_| GatewayError::malformed(remaining, "domain id out of range"))?;

        let mut descriptor = Self {
            topic_name: captures[1].to_string(),
            domain_id,
            type_id: captures[3].to_string(),
            qos_profile_name: None,
            reuse_inbound: false,
        };

        for (key, value) in query.into_iter().flat_map(query_pairs) {
            match key {
                QUERY_QOS => descriptor.qos_profile_name = normalize_profile_name(Some(value)),
                QUERY_REUSE => descriptor.reuse_inbound = value.eq_ignore_ascii_case("true"),
                _ => {}
            }
        }

        Ok(descriptor)
    }

    /// Parses a full uri, with or without the `dds:` scheme.
    ///
    /// A leading `dds:` is only taken as the scheme when a `<topic>:<domain>`
    /// segment follows it, so a topic literally named `dds` still parses.
    pub fn from_uri(uri: &str) -> Result<Self, GatewayError> {
        let remaining = match uri
            .strip_prefix(SCHEME)
            .and_then(|rest| rest.strip_prefix(':'))
        {
            Some(rest) if rest.split('/').next().is_some_and(|head| head.contains(':')) => rest,
            _ => uri,
        };
        Self::parse(remaining)
    }

    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }

    pub fn domain_id(&self) -> u32 {
        self.domain_id
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    pub fn qos_profile_name(&self) -> Option<&str> {
        self.qos_profile_name.as_deref()
    }

    pub fn reuse_inbound(&self) -> bool {
        self.reuse_inbound
    }

    /// The uri without its query; sessions are keyed by it.
    pub fn endpoint_address(&self) -> String {
        format!(
            "{SCHEME}:{}:{}/{}",
            self.topic_name, self.domain_id, self.type_id
        )
    }
}

impl FromStr for EndpointDescriptor {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uri(s)
    }
}

impl Display for EndpointDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.endpoint_address())?;
        let mut separator = '?';
        if let Some(name) = &self.qos_profile_name {
            write!(f, "{separator}{QUERY_QOS}={name}")?;
            separator = '&';
        }
        if self.reuse_inbound {
            write!(f, "{separator}{QUERY_REUSE}=true")?;
        }
        Ok(())
    }
}

fn query_pairs(query: &str) -> impl Iterator<Item = (&str, &str)> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
}

fn normalize_profile_name(name: Option<&str>) -> Option<String> {
    name.filter(|name| !name.is_empty() && *name != NULL_PROFILE)
        .map(str::to_string)
}
