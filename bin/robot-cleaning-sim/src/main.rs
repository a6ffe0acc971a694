/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

//! Robot cleaning simulation CLI.
//!
//! Commands:
//! - run: average time-steps for one configuration
//! - robots: sweep the number of robots for both strategies
//! - aspect: sweep the room's aspect ratio for both strategies

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use robot_cleaner::experiment::{
    self, DEFAULT_ROBOT_COUNTS, DEFAULT_ROOM_AREA, DEFAULT_ROOM_WIDTHS,
};
use robot_cleaner::simulation::DEFAULT_MAX_STEPS;
use robot_cleaner::{
    CoverageHistory, MovementStrategy, Plot, PlotSink, Position, Robot, Room, Rng,
    SimulationConfig, TrialObserver,
};

#[derive(Parser)]
#[command(name = "robot-cleaning-sim")]
#[command(version)]
#[command(about = "Simulate cleaning robots in a rectangular room")]
struct Cli {
    /// Random seed. A random one is picked and logged if omitted.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average time-steps to clean a room
    Run {
        /// Number of robots
        #[arg(long, default_value = "1")]
        robots: usize,

        /// Robot speed in tiles per time-step
        #[arg(long, default_value = "1.0")]
        speed: f64,

        /// Room width
        #[arg(long, default_value = "20")]
        width: usize,

        /// Room height
        #[arg(long, default_value = "20")]
        height: usize,

        /// Fraction of the room to clean
        #[arg(long, default_value = "0.8")]
        coverage: f64,

        /// Number of trials to average
        #[arg(long, default_value = "20")]
        trials: usize,

        /// Movement strategy: standard or random_walk
        #[arg(long, default_value = "standard")]
        strategy: String,

        /// Give up on a trial after this many time-steps
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: u64,

        /// Print the room after every time-step
        #[arg(long)]
        animate: bool,

        /// Print coverage after every time-step of every trial
        #[arg(long, conflicts_with = "animate")]
        trace: bool,
    },

    /// Sweep the number of robots
    Robots {
        /// Robot counts to test (comma-separated)
        #[arg(long, default_values_t = DEFAULT_ROBOT_COUNTS, value_delimiter = ',')]
        counts: Vec<usize>,

        /// Room width
        #[arg(long, default_value = "20")]
        width: usize,

        /// Room height
        #[arg(long, default_value = "20")]
        height: usize,

        /// Fraction of the room to clean
        #[arg(long, default_value = "0.8")]
        coverage: f64,

        /// Number of trials per point
        #[arg(long, default_value = "20")]
        trials: usize,

        /// Write the plot as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Sweep the room's aspect ratio at a fixed area
    Aspect {
        /// Room widths to test (comma-separated)
        #[arg(long, default_values_t = DEFAULT_ROOM_WIDTHS, value_delimiter = ',')]
        widths: Vec<usize>,

        /// Room area; height is area / width
        #[arg(long, default_value_t = DEFAULT_ROOM_AREA)]
        area: usize,

        /// Number of robots
        #[arg(long, default_value = "2")]
        robots: usize,

        /// Fraction of the room to clean
        #[arg(long, default_value = "0.8")]
        coverage: f64,

        /// Number of trials per point
        #[arg(long, default_value = "200")]
        trials: usize,

        /// Write the plot as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Prints every frame of a trial to stdout.
struct AsciiAnimation {
    step: u64,
}

impl TrialObserver for AsciiAnimation {
    fn start(&mut self, robot_count: usize, width: usize, height: usize) {
        self.step = 0;
        println!("{} robots in a {}x{} room", robot_count, width, height);
    }

    fn update(&mut self, room: &Room, robots: &[Robot]) {
        self.step += 1;
        let positions: Vec<Position> = robots.iter().map(Robot::position).collect();
        println!(
            "\nstep {} coverage {:.1}%\n{}",
            self.step,
            room.coverage() * 100.0,
            room.render(&positions)
        );
    }

    fn done(&mut self) {
        println!("done after {} steps", self.step);
    }
}

/// Prints plots as a table, one row per x value.
struct TablePrinter;

impl PlotSink for TablePrinter {
    fn plot(&mut self, plot: &Plot) {
        println!("{}", format_table(plot));
    }
}

fn format_table(plot: &Plot) -> String {
    let mut s = format!("{}\n{:>12}", plot.title, plot.x_label);
    for series in &plot.series {
        s.push_str(&format!(" {:>16}", series.label));
    }
    s.push_str(&format!("  ({})", plot.y_label));

    let rows = plot.series.first().map_or(0, |series| series.x.len());
    for row in 0..rows {
        s.push_str(&format!("\n{:>12.2}", plot.series[0].x[row]));
        for series in &plot.series {
            s.push_str(&format!(" {:>16}", series.y[row]));
        }
    }
    s
}

fn write_plot(plot: &Plot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(plot)?;
    std::fs::write(path, json).with_context(|| format!("writing plot to {}", path.display()))?;
    info!(path = %path.display(), "plot written");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, "starting");
    let mut rng = Rng::seed_from_u64(seed);

    match cli.command {
        Commands::Run {
            robots,
            speed,
            width,
            height,
            coverage,
            trials,
            strategy,
            max_steps,
            animate,
            trace,
        } => {
            let strategy: MovementStrategy = strategy.parse()?;
            let config = SimulationConfig {
                max_steps: Some(max_steps),
                ..SimulationConfig::new(robots, speed, width, height, coverage, trials, strategy)
            };

            let mean = if animate {
                let mut animation = AsciiAnimation { step: 0 };
                robot_cleaner::run_simulation_with_observer(&config, &mut rng, &mut animation)?
            } else if trace {
                let mut history = CoverageHistory::new();
                let mean =
                    robot_cleaner::run_simulation_with_observer(&config, &mut rng, &mut history)?;
                for (trial, coverage) in history.trials().iter().enumerate() {
                    let line: Vec<String> = coverage.iter().map(|c| format!("{:.3}", c)).collect();
                    println!("trial {}: {}", trial, line.join(" "));
                }
                mean
            } else {
                robot_cleaner::run_simulation(&config, &mut rng)?
            };

            println!("\n=== Simulation Result ===");
            println!("Strategy: {}", strategy);
            println!("Robots: {}", robots);
            println!("Room: {}x{}", width, height);
            println!("Coverage: {:.0}%", coverage * 100.0);
            println!("Trials: {}", trials);
            println!("Mean time-steps: {}", mean);
        }
        Commands::Robots {
            counts,
            width,
            height,
            coverage,
            trials,
            output,
        } => {
            let base = SimulationConfig {
                width,
                height,
                min_coverage: coverage,
                trial_count: trials,
                ..experiment::robot_count_base()
            };
            let plot =
                experiment::plot_by_robot_count(&counts, &base, &mut rng, &mut TablePrinter)?;
            if let Some(path) = output {
                write_plot(&plot, &path)?;
            }
        }
        Commands::Aspect {
            widths,
            area,
            robots,
            coverage,
            trials,
            output,
        } => {
            let base = SimulationConfig {
                robot_count: robots,
                min_coverage: coverage,
                trial_count: trials,
                ..experiment::aspect_ratio_base()
            };
            let plot = experiment::plot_by_aspect_ratio(
                &widths,
                area,
                &base,
                &mut rng,
                &mut TablePrinter,
            )?;
            if let Some(path) = output {
                write_plot(&plot, &path)?;
            }
        }
    }

    Ok(())
}
