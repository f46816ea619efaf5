//! Replay command - step through a snapshot log

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use pawnstorm_core::{read_snapshots, Replay};

#[derive(Args)]
pub struct ReplayArgs {
    /// Snapshot log (history or search log)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Frame to show (clamped to the last frame)
    #[arg(long, default_value = "0")]
    pub index: usize,

    /// Relative steps after seeking, e.g. "++-" (forward, forward, back)
    #[arg(long, default_value = "")]
    pub steps: String,

    /// Print every frame
    #[arg(long)]
    pub all: bool,
}

/// Run replay command
pub fn run(args: ReplayArgs) -> Result<()> {
    let snapshots = read_snapshots(&args.file)
        .with_context(|| format!("Failed to read snapshot log: {}", args.file.display()))?;
    let mut replay = Replay::new(snapshots);
    if replay.is_empty() {
        bail!("Snapshot log is empty: {}", args.file.display());
    }

    tracing::info!("Loaded {} snapshots", replay.len());

    if args.all {
        for index in 0..replay.len() {
            replay.seek(index);
            print_frame(&replay)?;
        }
        return Ok(());
    }

    replay.seek(args.index);
    apply_steps(&mut replay, &args.steps)?;
    print_frame(&replay)
}

/// Walk the cursor: '+' forward, '-' back, 'r' reset
fn apply_steps(replay: &mut Replay, steps: &str) -> Result<()> {
    for step in steps.chars() {
        match step {
            '+' => {
                replay.step_forward();
            }
            '-' => {
                replay.step_back();
            }
            'r' => replay.reset(),
            other => bail!("Unknown replay step {:?} (use '+', '-' or 'r')", other),
        }
    }
    Ok(())
}

fn print_frame(replay: &Replay) -> Result<()> {
    let Some(frame) = replay.position() else {
        return Ok(());
    };
    let position =
        frame.with_context(|| format!("Malformed snapshot at frame {}", replay.index()))?;

    println!("Current timeframe [{}/{}]", replay.index(), replay.len());
    println!("{}\n", position);
    Ok(())
}
