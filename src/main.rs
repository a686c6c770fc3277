mod animation;
mod app;
mod canvas;
mod colors;
mod config;
mod geometry;
mod raster;
mod renderer;
mod terminal;

use clap::{Parser, Subcommand};
use config::constants::STEPS_PER_TICK;
use config::{DrawMode, FrameConfig, PrintSize, ShowConfig};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recursive-tree")]
#[command(version)]
#[command(about = "Recursive fractal trees drawn in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the colorful tree grow one level at a time
    Show {
        /// Also draw the plain and colorful reference trees
        #[arg(short, long)]
        all: bool,

        /// Check the timer once per tick instead of twice
        #[arg(long)]
        single_step: bool,
    },

    /// Print one frame to stdout (no interactive display)
    Print {
        /// Also draw the plain and colorful reference trees
        #[arg(short, long)]
        all: bool,

        /// Depth of the center tree (default: complete tree)
        #[arg(short, long)]
        depth: Option<u32>,

        /// Width in terminal columns (default: terminal width)
        #[arg(short = 'W', long)]
        width: Option<u16>,

        /// Height in terminal rows (default: terminal height)
        #[arg(short = 'H', long)]
        height: Option<u16>,
    },

    /// Save one full-size frame as an image (format from the extension)
    Export {
        /// Output file, e.g. tree.png
        output: PathBuf,

        /// Also draw the plain and colorful reference trees
        #[arg(short, long)]
        all: bool,

        /// Depth of the center tree (default: complete tree)
        #[arg(short, long)]
        depth: Option<u32>,
    },
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { all, single_step } => {
            let config = ShowConfig {
                mode: DrawMode::from_flag(all),
                steps_per_tick: if single_step { 1 } else { STEPS_PER_TICK },
            };
            app::run_show(config)?;
        }
        Commands::Print {
            all,
            depth,
            width,
            height,
        } => {
            let frame = FrameConfig {
                mode: DrawMode::from_flag(all),
                depth,
            };
            app::run_print(frame, PrintSize { cols: width, rows: height })?;
        }
        Commands::Export { output, all, depth } => {
            let frame = FrameConfig {
                mode: DrawMode::from_flag(all),
                depth,
            };
            app::run_export(&output, frame)?;
        }
    }

    Ok(())
}
