use crate::generator::profile::{build_event_stream_from_config, GeneratorConfig};
use crate::gui_bridge::model::ReadoutModel;
use crate::workflow::runner::Runner;
use anyhow::Result;
use compasscore::prelude::SensorEvent;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn readout_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

/// Bridge that hosts the readout HTTP endpoint and fuses incoming payloads.
pub struct GuiBridge {
    state: Arc<RwLock<ReadoutModel>>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        let state = Arc::new(RwLock::new(ReadoutModel::default()));
        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("readout")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<ReadoutModel>>| warp::reply::json(&*state.read().unwrap()));

        let ingest_route = warp::path("ingest")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |events: Vec<SensorEvent>,
                 state: Arc<RwLock<ReadoutModel>>,
                 runner: Arc<Runner>| async move {
                    match runner.execute(&events) {
                        Ok(result) => {
                            let mut guard = state.write().unwrap();
                            *guard = ReadoutModel::from_result(&result);
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({"status": "ok"})),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("ingest error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        let generator_route = warp::path("ingest-config")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(
                |config: GeneratorConfig,
                 state: Arc<RwLock<ReadoutModel>>,
                 runner: Arc<Runner>| async move {
                    match build_event_stream_from_config(&config)
                        .and_then(|events| runner.execute(&events))
                    {
                        Ok(result) => {
                            let mut guard = state.write().unwrap();
                            *guard = ReadoutModel::from_result(&result);
                            if let Some(name) = config.scenario.as_ref() {
                                println!(
                                    "[GUI] Scenario {} -> heading {:.1} deg",
                                    name, guard.heading_deg
                                );
                            }
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "heading_deg": guard.heading_deg,
                                    "altitude_m": guard.altitude_m,
                                    "description": config.description.clone().unwrap_or_default()
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("ingest-config error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = get_route.or(ingest_route).or(generator_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(readout_bind_address()).await;
            });
        });

        Self { state }
    }

    pub fn publish(&self, model: &ReadoutModel) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[GUI] heading: {:.1} deg, altitude: {:.1} m, accuracy: {}",
            guard.heading_deg, guard.altitude_m, guard.accuracy
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> ReadoutModel {
        self.state.read().unwrap().clone()
    }
}
