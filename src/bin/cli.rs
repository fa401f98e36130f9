//! trailclaim CLI - Debug tool for walk replay and claim geometry
//!
//! Usage:
//!   trailclaim-cli replay <folder-or-file> [--min-movement <m>] [--corridor-radius <m>]
//!
//! Replays GPX files through the claim engine and shows verbose output
//! of the filter decisions, corridor geometry and loop detection,
//! helping to understand how a recorded walk turns into claims.

use clap::{Parser, Subcommand};
use gpx::read;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use trailclaim::{ClaimEngine, FilterOutcome, GpsFix, TrackConfig};

#[derive(Parser)]
#[command(name = "trailclaim-cli")]
#[command(about = "Debug tool for walk replay and claim geometry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose per-fix output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay GPX walks through the filter, tracker and loop detector
    Replay {
        /// GPX file or folder of GPX files
        path: PathBuf,

        /// Minimum movement between accepted fixes in meters
        #[arg(long, default_value = "5.0")]
        min_movement: f64,

        /// Corridor radius in meters
        #[arg(long, default_value = "10.0")]
        corridor_radius: f64,

        /// Maximum jump between consecutive fixes in meters
        #[arg(long, default_value = "100.0")]
        max_jump: f64,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            path,
            min_movement,
            corridor_radius,
            max_jump,
        } => {
            let config = TrackConfig {
                min_movement_m: min_movement,
                corridor_radius_m: corridor_radius,
                max_jump_m: max_jump,
                ..TrackConfig::default()
            };
            replay(&path, config, cli.verbose);
        }
    }
}

fn replay(path: &Path, config: TrackConfig, verbose: bool) {
    let files = collect_gpx_files(path);
    if files.is_empty() {
        eprintln!("no GPX files found under {}", path.display());
        std::process::exit(1);
    }

    for file in files {
        println!("=== {} ===", file.display());
        match load_fixes(&file) {
            Ok(fixes) => replay_walk(&file, fixes, config.clone(), verbose),
            Err(e) => eprintln!("  skipping: {e}"),
        }
    }
}

fn replay_walk(file: &Path, fixes: Vec<GpsFix>, config: TrackConfig, verbose: bool) {
    let session_id = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "walk".to_string());

    let mut engine = ClaimEngine::new();
    engine
        .create_session(&session_id, config)
        .expect("fresh engine cannot already hold the session");

    let mut accepted = 0usize;
    let mut rejected_accuracy = 0usize;
    let mut rejected_jump = 0usize;
    let mut rejected_close = 0usize;
    let mut rejected_invalid = 0usize;

    for (i, fix) in fixes.iter().enumerate() {
        let outcome = engine
            .filter_and_append(&session_id, *fix)
            .expect("session exists");
        match outcome {
            FilterOutcome::Accepted(_) => accepted += 1,
            FilterOutcome::RejectedLowAccuracy => rejected_accuracy += 1,
            FilterOutcome::RejectedJump => rejected_jump += 1,
            FilterOutcome::RejectedTooClose => rejected_close += 1,
            FilterOutcome::RejectedInvalid => rejected_invalid += 1,
        }
        if verbose && !outcome.is_accepted() {
            println!("  fix {i}: {outcome:?}");
        }
    }

    println!(
        "  fixes: {} read, {} accepted ({} low-accuracy, {} jump, {} too-close, {} invalid)",
        fixes.len(),
        accepted,
        rejected_accuracy,
        rejected_jump,
        rejected_close,
        rejected_invalid
    );

    let length = engine.current_length(&session_id).expect("session exists");
    let corridor = engine
        .current_corridor_area(&session_id, None)
        .expect("session exists");
    println!("  length: {length:.1} m, corridor area: {corridor:.1} m²");

    let loops = engine
        .poll_intersections(&session_id)
        .expect("session exists");
    if loops.is_empty() {
        println!("  no self-intersections");
    } else {
        for (i, l) in loops.iter().enumerate() {
            println!(
                "  loop {}: segments {}-{}, {} ring points, {:.1} m²",
                i,
                l.segment_start,
                l.segment_end,
                l.ring.len(),
                l.area_m2
            );
        }
    }

    match engine.finalize(&session_id).expect("session exists") {
        Some(claim) => println!(
            "  finalized: {} ring points, {:.1} m², center ({:.5}, {:.5})",
            claim.ring.len(),
            claim.area_m2,
            claim.center.latitude,
            claim.center.longitude
        ),
        None => println!("  finalized: path too short to enclose area"),
    }
}

fn collect_gpx_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = fs::read_dir(path)
        .into_iter()
        .flatten()
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "gpx"))
        .collect();
    files.sort();
    files
}

fn load_fixes(path: &Path) -> Result<Vec<GpsFix>, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let gpx = read(BufReader::new(file)).map_err(|e| e.to_string())?;

    let fixes: Vec<GpsFix> = gpx
        .tracks
        .iter()
        .flat_map(|track| &track.segments)
        .flat_map(|segment| &segment.points)
        .map(|waypoint| {
            let point = waypoint.point();
            GpsFix::new(point.y(), point.x())
        })
        .collect();

    if fixes.is_empty() {
        return Err("no track points".to_string());
    }
    Ok(fixes)
}
