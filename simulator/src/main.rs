use anyhow::Context;
use clap::Parser;
use generator::profile::build_event_stream_from_config;
use gui_bridge::bridge::GuiBridge;
use gui_bridge::model::ReadoutModel;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline compass readout driver")]
struct Args {
    /// Run a single synthetic sensor pass and emit a readout summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 256)]
    samples: usize,
    #[arg(long, default_value_t = 0.0)]
    heading_deg: f32,
    #[arg(long, default_value_t = 1013.25)]
    pressure_hpa: f32,
    /// Keep the HTTP bridge alive for incoming sensor payloads
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.samples, args.heading_deg, args.pressure_hpa)
    };

    let runner = Runner::new(workflow_config.clone());
    let gui_bridge = GuiBridge::new(Arc::new(runner.clone()));
    let events = build_event_stream_from_config(&workflow_config.to_generator_config())?;

    if args.offline {
        let result = runner.execute(&events)?;

        println!(
            "Offline run -> heading {:.1} deg, altitude {:.1} m, accuracy {}, samples {}",
            result.heading_deg.unwrap_or(0.0),
            result.altitude_m.unwrap_or(0.0),
            result.accuracy.unwrap_or(0),
            result.samples_ingested
        );

        let model = ReadoutModel::from_result(&result);
        gui_bridge.publish(&model)?;
        gui_bridge.publish_status("Offline readout results ready.");

        let report = format!(
            "heading={:.2} altitude={:.2} accuracy={} samples={} notes={:?}\n",
            model.heading_deg, model.altitude_m, model.accuracy, model.samples_ingested, model.notes
        );
        let report_path = PathBuf::from("tools/data/offline_readout.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(report.as_bytes())?;
    }
    if args.serve {
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
