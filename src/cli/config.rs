//! Options shared across CLI commands

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::app::{App, AppBuilder};

/// Flags every command accepts
#[derive(Args, Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonArgs {
    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Extra diagnostics on stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl CommonArgs {
    /// App seeded from `--seed` when given
    pub fn app(&self) -> App {
        match self.seed {
            Some(seed) => AppBuilder::new().with_default_seed(seed).build(),
            None => App::new(),
        }
    }
}
