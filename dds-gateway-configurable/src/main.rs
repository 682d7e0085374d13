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

mod config;
mod handlers;
mod heartbeat;

use crate::config::Config;
use crate::handlers::{ForwardingHandler, MonitorHandler};
use clap::Parser;
use dds_gateway::descriptor::EndpointDescriptor;
use dds_gateway::qos::QosProfileRegistry;
use dds_gateway::transport::PubSubTransport;
use dds_gateway::{Consumer, DdsGateway, GatewayError};
use loopback_transport::LoopbackTransport;
use qos_profiles_static_file::QosProfilesStaticFile;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command()]
struct GatewayArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt::try_init();

    info!("Started dds-gateway-configurable");

    let args = GatewayArgs::parse();
    let config = Config::from_file(&args.config)?;

    let qos_profiles = Arc::new(QosProfileRegistry::new());
    for profile in config.qos_profiles.iter().cloned() {
        qos_profiles.register(profile);
    }
    if let Some(path) = &config.qos_profiles_file {
        let loaded = QosProfilesStaticFile::new(path.clone()).load_into(&qos_profiles)?;
        info!("Loaded {loaded} QoS profiles from {path}");
    }

    let transport: Arc<dyn PubSubTransport> =
        Arc::new(LoopbackTransport::new(&config.gateway.name));
    let gateway = DdsGateway::new(
        &config.gateway.name,
        transport,
        qos_profiles,
        heartbeat::type_registry(),
    );

    // Consumers are only kept alive for their side effects.
    let mut consumers: Vec<Consumer> = Vec::new();

    for route in &config.routes {
        let from = EndpointDescriptor::from_uri(&route.from)?;
        let to = EndpointDescriptor::from_uri(&route.to)?;
        if from.endpoint_address() == to.endpoint_address() {
            return Err(GatewayError::MalformedAddress {
                address: route.to.clone(),
                reason: "a route cannot forward an endpoint onto itself".to_string(),
            }
            .into());
        }

        let producer = Arc::new(gateway.create_producer(&route.to).await?);
        producer.start().await?;
        let consumer = gateway
            .create_consumer(&route.from, Arc::new(ForwardingHandler::new(producer)))
            .await?;
        consumer.start().await?;
        info!("Forwarding {} -> {}", route.from, route.to);
        consumers.push(consumer);
    }

    for monitor in &config.monitors {
        let consumer = gateway
            .create_consumer(monitor, Arc::new(MonitorHandler))
            .await?;
        consumer.start().await?;
        info!("Monitoring {monitor}");
        consumers.push(consumer);
    }

    let heartbeat_task = match &config.heartbeat {
        Some(heartbeat) => {
            let producer = Arc::new(gateway.create_producer(&heartbeat.endpoint).await?);
            producer.start().await?;
            Some(heartbeat::spawn_heartbeat(
                config.gateway.name.clone(),
                producer,
                Duration::from_millis(heartbeat.period_ms.max(1)),
            ))
        }
        None => None,
    };

    tokio::signal::ctrl_c().await?;
    info!("Shutting down dds-gateway-configurable");

    if let Some(task) = heartbeat_task {
        task.abort();
    }
    for consumer in &consumers {
        consumer.stop();
    }
    gateway.stop().await;

    Ok(())
}
