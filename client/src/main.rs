//! Entry point: parse CLI args, run the handshake, then drive the per-tick
//! scheduler loop until the judge server reports the match over.

mod agent;
mod comm;
mod config;
mod scheduler;
mod store;

use std::net::TcpStream;
use std::time::{Duration, Instant};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use uav_core::{BoundingBox, Coordinate, CommandFrame, UavPrice, WorldModel};

use config::Cli;
use scheduler::Scheduler;

/// Leaves headroom below the judge server's ~1s per-tick budget for the
/// outbound command's own network latency.
const TICK_BUDGET: Duration = Duration::from_millis(900);

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "uav_fleet=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let seed = cli.resolved_seed();
    tracing::info!(seed, host = %cli.host, port = cli.port, "starting UAV fleet controller");

    if let Err(err) = run(&cli, seed) {
        tracing::error!(error = %err, "fatal error, aborting match");
        std::process::exit(1);
    }
    Ok(())
}

fn run(cli: &Cli, seed: u64) -> anyhow::Result<()> {
    let mut stream = TcpStream::connect((cli.host.as_str(), cli.port))?;
    let map_frame = comm::handshake(&mut stream, &cli.token)?;

    let world = build_world(&map_frame);
    let mut scheduler = Scheduler::new(&world);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut timeouts: u32 = 0;
    let mut tick_durations: Vec<f64> = Vec::new();

    loop {
        let frame: uav_core::ServerFrame = comm::read_frame(&mut stream)?;
        if frame.is_match_over() {
            report_summary(&frame, timeouts, &tick_durations);
            break;
        }

        let tick_start = Instant::now();
        let deadline = tick_start + TICK_BUDGET;
        let output = scheduler.tick(&world, &frame, &mut rng, deadline)?;
        let elapsed = tick_start.elapsed();
        tick_durations.push(elapsed.as_secs_f64());
        if output.stats.timed_out {
            timeouts += 1;
            tracing::warn!(time = frame.time, elapsed_ms = elapsed.as_millis() as u64, "tick deadline exceeded");
        }

        let command = CommandFrame::new(cli.token.clone(), output.uav_info, output.purchase);
        comm::write_frame(&mut stream, &command)?;
    }

    Ok(())
}

fn report_summary(frame: &uav_core::ServerFrame, timeouts: u32, tick_durations: &[f64]) {
    let mean = if tick_durations.is_empty() {
        0.0
    } else {
        tick_durations.iter().sum::<f64>() / tick_durations.len() as f64
    };
    let max = tick_durations.iter().cloned().fold(0.0_f64, f64::max);
    tracing::info!(
        we_value = frame.we_value,
        enemy_value = frame.enemy_value,
        timeouts,
        mean_tick_secs = mean,
        max_tick_secs = max,
        "match over"
    );
}

fn build_world(map_frame: &uav_core::MapFrame) -> WorldModel {
    let map_range = Coordinate::new(
        map_frame.map.x.saturating_sub(1),
        map_frame.map.y.saturating_sub(1),
        map_frame.map.z.saturating_sub(1),
    );
    let parking = Coordinate::new(map_frame.parking.x, map_frame.parking.y, 0);
    let buildings: Vec<BoundingBox> = map_frame.building.iter().map(BoundingBox::from).collect();
    let fogs: Vec<BoundingBox> = map_frame.fog.iter().map(BoundingBox::from).collect();
    let uav_prices: std::collections::BTreeMap<String, UavPrice> = map_frame
        .uav_price
        .iter()
        .map(|w| (w.uav_type.clone(), UavPrice::from(w)))
        .collect();

    WorldModel::new(map_range, parking, map_frame.h_low, map_frame.h_high, buildings, fogs, uav_prices)
}
