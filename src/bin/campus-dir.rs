//! Campus Directory CLI
//!
//! Command-line front end for searching and editing the location guide.

use std::path::PathBuf;
use std::process;

use campus_directory::config::{DEFAULT_BUCKET_COUNT, DEFAULT_DATA_FILE};
use campus_directory::{Config, Directory, DirectoryError, LocationEntry, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// Campus Location Guidebook
#[derive(Parser, Debug)]
#[command(name = "campus-dir")]
#[command(about = "Find campus locations by task key")]
#[command(version)]
struct Args {
    /// Location data file
    #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Number of hash buckets
    #[arg(short, long, default_value_t = DEFAULT_BUCKET_COUNT)]
    buckets: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for a location by task key
    Search {
        /// Task key (e.g. 'library', 'c_lab')
        key: String,

        /// Print the entry as JSON
        #[arg(long)]
        json: bool,
    },

    /// View all available locations
    List {
        /// Print the entries as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Add a new location
    Add {
        /// Unique task key (e.g. 'physics_lab')
        key: String,

        /// Building name
        building: String,

        /// Floor (e.g. '1st', 'Ground')
        floor: String,

        /// Room or facility code
        room: String,

        /// Short description
        description: String,
    },

    /// Delete a location by task key
    Delete {
        /// Task key to delete
        key: String,
    },

    /// Show bucket occupancy of the table
    Stats,
}

fn main() {
    // Logs go to stderr, command output to stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,campus_directory=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("Campus Directory v{}", campus_directory::VERSION);

    let config = Config::builder()
        .data_file(&args.data_file)
        .bucket_count(args.buckets)
        .build();

    if let Err(e) = run(config, args.command) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(config: Config, command: Commands) -> Result<()> {
    let mut directory = Directory::open(config)?;

    match command {
        Commands::Search { key, json } => match directory.search_by_key(&key) {
            Some(entry) if json => println!("{}", to_json(entry)?),
            Some(entry) => print_entry(entry),
            None => println!("Location for key '{key}' not found in the directory."),
        },
        Commands::List { json } => {
            let entries: Vec<&LocationEntry> = directory.list_all().collect();
            if json {
                println!("{}", to_json(&entries)?);
            } else {
                print_table(&entries);
            }
        }
        Commands::Add {
            key,
            building,
            floor,
            room,
            description,
        } => {
            let added = directory.add_location(&key, &building, &floor, &room, &description)?;
            println!("Success! Location '{}' has been added to the guide.", added.key);
        }
        Commands::Delete { key } => {
            let removed = directory.delete_location(&key)?;
            println!("Success! Location '{}' has been deleted from the guide.", removed.key);
        }
        Commands::Stats => {
            let stats = directory.stats();
            println!("Locations:        {}", stats.entries);
            println!("Buckets:          {}", stats.buckets);
            println!("Occupied buckets: {}", stats.occupied_buckets);
            println!("Longest chain:    {}", stats.longest_chain);
        }
    }

    Ok(())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| DirectoryError::Serialization(e.to_string()))
}

fn print_entry(entry: &LocationEntry) {
    println!("Key: {}", entry.key);
    println!("Building: {}", entry.building);
    println!("Floor: {}", entry.floor);
    println!("Room/Facility: {}", entry.room);
    println!("Description: {}", entry.description);
}

fn print_table(entries: &[&LocationEntry]) {
    const RULE: &str =
        "+-----------------+---------------------+-------------+-----------+------------------------+";

    println!("{RULE}");
    println!(
        "| {:<15} | {:<19} | {:<11} | {:<9} | {:<22} |",
        "Task Key", "Building", "Floor", "Room", "Description"
    );
    println!("{RULE}");
    for entry in entries {
        println!(
            "| {:<15} | {:<19} | {:<11} | {:<9} | {:<22} |",
            entry.key, entry.building, entry.floor, entry.room, entry.description
        );
    }
    println!("{RULE}");
    println!();
    println!("Total locations found: {}", entries.len());
}
