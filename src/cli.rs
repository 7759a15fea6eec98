// src/cli.rs
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use set_logger_lib::{SortField, WeightUnit};

#[derive(Parser, Debug)]
#[command(author, version, about = "Log gym sets against today's workout session", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show today's session, its statistics and logged sets
    Status {
        /// Column to sort the set table by (SetCount, ExerciseName, Reps, Weight, Unit, RPE, Notes, CreatedDate)
        #[arg(short, long, default_value_t = SortField::SetCount)]
        sort: SortField,
        /// Sort descending instead of ascending
        #[arg(short, long)]
        desc: bool,
        /// Print statistics only, without the set table
        #[arg(long)]
        hide_table: bool,
    },
    /// Start today's workout session
    Start,
    /// End today's workout session (asks for confirmation)
    End {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// List available muscle groups
    Groups,
    /// List exercises for a muscle group
    Exercises {
        /// Muscle group name (e.g., "Chest")
        muscle_group: String,
    },
    /// Log a set in today's session
    Add {
        /// Muscle group the exercise belongs to
        #[arg(short, long)]
        group: String,
        /// Exercise ID or name within the muscle group
        #[arg(short, long)]
        exercise: String,
        /// Number of repetitions
        #[arg(short, long)]
        reps: String,
        /// Weight lifted, in the chosen unit
        #[arg(short, long)]
        weight: Option<String>,
        /// Unit the weight was entered in (kg or lbs); defaults to the configured unit
        #[arg(short, long)]
        unit: Option<WeightUnit>,
        /// Rate of Perceived Exertion (1-10)
        #[arg(long)]
        rpe: Option<String>,
        /// Free-form notes about the set
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Show the path to the config file
    ConfigPath,
    /// Print a shell completion script to stdout
    GenerateCompletion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

// Function to parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
