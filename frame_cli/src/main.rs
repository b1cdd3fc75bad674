//! # Studlist CLI
//!
//! Terminal front end for the framing engine. Reads a project file (JSON),
//! validates it and prints the bill of materials, a cut list, or the member
//! layout of one wall.
//!
//! ```text
//! studlist sample > house.json
//! studlist estimate house.json --cut-list
//! studlist members house.json --wall North
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use frame_core::materials::pack_groups;
use frame_core::members::member_counts;
use frame_core::units::format_fraction;
use frame_core::{
    extract_cuts_with, generate_members, MaterialItem, Opening, Project, RawCutSet, WallSpec,
};

#[derive(Parser)]
#[command(name = "studlist", version, about = "Wall framing estimates and cut lists")]
struct Cli {
    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the bill of materials for a project
    Estimate {
        #[arg(value_name = "PROJECT")]
        input: PathBuf,

        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,

        /// Also print how cuts are laid out on each stock piece
        #[arg(long)]
        cut_list: bool,
    },
    /// Print the framing members of one wall
    Members {
        #[arg(value_name = "PROJECT")]
        input: PathBuf,

        /// Wall label
        #[arg(short, long)]
        wall: String,

        #[arg(long)]
        json: bool,
    },
    /// Write a sample project to stdout
    Sample,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_project(path: &PathBuf) -> Result<Project> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read project file: {:?}", path))?;
    let project = Project::from_json(&content)
        .with_context(|| format!("Failed to parse project file: {:?}", path))?;

    if let Err(e) = project.validate() {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        bail!("project validation failed ({})", e.error_code());
    }
    info!(walls = project.walls.len(), floors = project.floors.len(), "loaded project");
    Ok(project)
}

fn print_items(title: &str, items: &[MaterialItem]) {
    println!("{}", title);
    println!("{}", "─".repeat(title.chars().count().max(40)));
    if items.is_empty() {
        println!("  (nothing)");
    }
    for item in items {
        println!("  {:>4}  {:<28} {}", item.quantity, item.description, item.length);
    }
    println!();
}

fn print_cut_list(project: &Project) {
    let mut cuts = RawCutSet::default();
    for wall in &project.walls {
        cuts.merge(&extract_cuts_with(&wall.spec, &project.settings));
    }

    println!("CUT LIST");
    println!("{}", "─".repeat(40));
    for group in pack_groups(&cuts, &project.settings) {
        println!("  {}", group.description());
        for (i, bin) in group.bins.iter().enumerate() {
            let pieces: Vec<String> = bin.cuts.iter().map(|c| format_fraction(*c)).collect();
            println!(
                "    #{:<3} {:>4}\"  [{}]  waste {}\"",
                i + 1,
                format_fraction(bin.stock_length),
                pieces.join(", "),
                format_fraction(bin.waste())
            );
        }
    }
    println!();
}

fn estimate(input: &PathBuf, json: bool, cut_list: bool) -> Result<()> {
    let project = load_project(input)?;
    let report = project.calculate();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Studlist - {} ({})", project.meta.job_id, project.meta.client);
    println!();
    print_items("PROJECT TOTAL", &report.project_list);

    for floor in &project.floors {
        if let Some(items) = report.by_floor.get(&floor.id) {
            print_items(&format!("FLOOR: {}", floor.name), items);
        }
    }
    for wall in &project.walls {
        if let Some(items) = report.by_wall.get(&wall.id) {
            print_items(&format!("WALL: {}", wall.label), items);
        }
    }

    if cut_list {
        print_cut_list(&project);
    }
    Ok(())
}

fn members(input: &PathBuf, label: &str, json: bool) -> Result<()> {
    let project = load_project(input)?;
    let Some(wall) = project.find_wall(label) else {
        bail!("no wall labelled '{}'", label);
    };
    let members = generate_members(&wall.spec);
    debug!(wall = label, members = members.len(), "generated members");

    if json {
        println!("{}", serde_json::to_string_pretty(&members)?);
        return Ok(());
    }

    for member in &members {
        println!(
            "  {:<22} {:<10} x={:>8.2} y={:>8.2} z={:>5.2}  {:.3} x {:.3} x {:.3}",
            member.id,
            member.kind.display_name(),
            member.position.x,
            member.position.y,
            member.position.z,
            member.size.width,
            member.size.height,
            member.size.depth
        );
    }
    println!();
    for (kind, count) in member_counts(&members) {
        println!("  {:<10} {}", kind.display_name(), count);
    }
    Ok(())
}

fn sample() -> Result<()> {
    let mut project = Project::new("Estimator", "25-001", "Sample Homes");
    let level1 = project.add_floor("Level 1");

    let north = WallSpec::new(192.0, 97.125).with_opening(Opening::window(36.0, 48.0));
    project.add_wall("North", Some(level1), north);

    let mut east = WallSpec::new(288.0, 97.125)
        .with_opening(Opening::door(36.0, 80.0).centered_at(60.0))
        .with_opening(Opening::window(30.0, 36.0).with_quantity(2).with_drop(6.0));
    east.blocking_rows = 1;
    east.pt_bottom_plate = true;
    east.sheathing = true;
    project.add_wall("East", Some(level1), east);

    println!("{}", project.to_json()?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Estimate { input, json, cut_list } => estimate(&input, json, cut_list),
        Command::Members { input, wall, json } => members(&input, &wall, json),
        Command::Sample => sample(),
    }
}
