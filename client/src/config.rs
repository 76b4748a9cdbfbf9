//! CLI surface: `host port token` plus an optional `--seed` for
//! reproducible idle-scatter runs, per spec §4.4's determinism clause.

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "uav-fleet", about = "Competitive UAV fleet controller")]
pub struct Cli {
    pub host: String,
    pub port: u16,
    pub token: String,

    /// RNG seed for idle-scatter point generation and altitude tie-breaks.
    /// Defaults to the current time so unseeded runs still vary.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
