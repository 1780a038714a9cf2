// Hide console window on Windows for release builds (GUI app).
// In debug builds, keep the console so panics/backtraces are visible.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use clap::Parser;
use colored::Colorize;

use dicetray::dice3d::{DiceTrayPlugin, TrayTuning, MAX_DICE};

/// Dice Tray - pick up a handful of dice and throw them
#[derive(Parser)]
#[command(name = "dicetray")]
#[command(
    author,
    version,
    about = "Dice Tray - drag, throw and read a set of six-sided dice"
)]
struct Cli {
    /// Number of dice on the tray (1-9)
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=MAX_DICE as i64))]
    dice: u8,

    /// RON file overriding the default tuning values
    #[arg(short, long)]
    tuning: Option<PathBuf>,

    /// Print the effective tuning as RON and exit
    #[arg(long)]
    print_tuning: bool,
}

fn load_tuning(path: Option<&PathBuf>) -> TrayTuning {
    let Some(path) = path else {
        return TrayTuning::default();
    };

    match TrayTuning::load(path) {
        Ok(tuning) => tuning,
        Err(e) => {
            eprintln!(
                "{} Ignoring tuning file '{}': {}",
                "Warning:".yellow().bold(),
                path.display(),
                e
            );
            TrayTuning::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let tuning = load_tuning(cli.tuning.as_ref());

    if cli.print_tuning {
        match tuning.to_ron_pretty() {
            Ok(text) => {
                eprintln!("{}", "Effective tuning:".green().bold());
                println!("{}", text);
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                std::process::exit(1);
            }
        }
        return;
    }

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Dice Tray".to_string(),
                        resolution: (1280u32, 720u32).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "info,wgpu=error,dicetray=debug".to_string(),
                    ..default()
                }),
        )
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(DiceTrayPlugin::new(tuning, cli.dice as usize))
        .run();
}
