//src/main.rs
mod cli; // Keep cli module for parsing args

use anyhow::{bail, Context, Result};
use chrono::Local;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::io::{stdin, stdout, Write};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use set_logger_lib::{
    format_session_date, get_config_path_util, load_config_util, Config, Field, HttpRepository,
    Notifier, SessionController, Severity, SortDirection, ViewState, WorkoutSet,
};

/// Prints notifications to stderr and asks confirmations on the terminal.
struct TerminalNotifier {
    auto_confirm: bool,
}

impl Notifier for TerminalNotifier {
    fn notify(&self, title: &str, message: &str, severity: Severity) {
        eprintln!("[{severity}] {title}: {message}");
    }

    async fn confirm(&self, prompt: &str) -> bool {
        if self.auto_confirm {
            return true;
        }
        print!("{prompt} (y/N): ");
        if stdout().flush().is_err() {
            return false;
        }
        let mut input = String::new();
        if stdin().read_line(&mut input).is_err() {
            return false;
        }
        matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

type Controller = SessionController<HttpRepository, TerminalNotifier>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli_args = cli::parse_args();

    if let cli::Commands::GenerateCompletion { shell } = cli_args.command {
        let mut cmd = cli::build_cli_command();
        let bin_name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, bin_name, &mut stdout());
        return Ok(());
    }

    let config_path =
        get_config_path_util().context("Failed to determine configuration file path")?;
    if let cli::Commands::ConfigPath = cli_args.command {
        println!("{}", config_path.display());
        return Ok(());
    }

    let config = load_config_util(&config_path)
        .with_context(|| format!("Failed to load config from {config_path:?}"))?
        .with_env_overrides();
    let base_url = config.require_base_url(&config_path)?.to_string();

    let auto_confirm = config.auto_confirm_end
        || matches!(cli_args.command, cli::Commands::End { yes: true });
    let repo = HttpRepository::new(base_url);
    info!("Using data service at {}", repo.base_url());
    let mut controller = SessionController::new(
        repo,
        TerminalNotifier { auto_confirm },
        &config,
    );
    controller.initialize().await;

    match cli_args.command {
        cli::Commands::GenerateCompletion { .. } | cli::Commands::ConfigPath => {
            unreachable!("handled before the controller is created")
        }
        cli::Commands::Status {
            sort,
            desc,
            hide_table,
        } => {
            let direction = if desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            controller.sort(sort, direction);
            if hide_table && controller.state().table_visible {
                controller.toggle_visibility();
            }
            print_status(controller.state(), &config);
        }
        cli::Commands::Start => {
            if !controller.create_session().await {
                bail!("No new session was started.");
            }
            print_header(controller.state());
        }
        cli::Commands::End { .. } => {
            if !controller.state().session_exists() {
                bail!("There is no workout session for today.");
            }
            if !controller.end_session().await {
                bail!("Workout session was not ended.");
            }
        }
        cli::Commands::Groups => {
            for group in &controller.state().muscle_groups {
                println!("{group}");
            }
        }
        cli::Commands::Exercises { muscle_group } => {
            controller.change_muscle_group(Some(&muscle_group)).await;
            print_exercises(&controller);
        }
        cli::Commands::Add {
            group,
            exercise,
            reps,
            weight,
            unit,
            rpe,
            notes,
        } => {
            controller.change_muscle_group(Some(&group)).await;
            let exercise_id = resolve_exercise(&controller, &exercise)?;
            controller.select_exercise(Some(&exercise_id));
            controller.set_field(Field::Reps, reps);
            controller.set_field(Field::Weight, weight.unwrap_or_default());
            controller.set_field(Field::Rpe, rpe.unwrap_or_default());
            controller.set_field(Field::Notes, notes.unwrap_or_default());
            if let Some(unit) = unit {
                controller.set_unit(unit);
            }

            if !controller.add_set().await {
                for err in controller.state().form.invalid.values() {
                    eprintln!("  {err}");
                }
                bail!("Set was not logged.");
            }
            if let Some(logged) = controller.state().form.selected_exercise() {
                println!("Logged a set of {}.", logged.name);
            }
            print_status(controller.state(), &config);
        }
    }

    Ok(())
}

/// Finds an exercise among the loaded options by ID or case-insensitive name.
fn resolve_exercise(controller: &Controller, identifier: &str) -> Result<String> {
    let options = &controller.state().form.exercise_options;
    let trimmed = identifier.trim();
    options
        .iter()
        .find(|e| e.id == trimmed || e.name.eq_ignore_ascii_case(trimmed))
        .map(|e| e.id.clone())
        .with_context(|| {
            let names: Vec<_> = options.iter().map(|e| e.name.as_str()).collect();
            format!(
                "Exercise '{}' not found in this muscle group. Available: {}",
                trimmed,
                if names.is_empty() {
                    "none".to_string()
                } else {
                    names.join(", ")
                }
            )
        })
}

fn print_header(state: &ViewState) {
    match &state.session {
        Some(session) => println!(
            "Workout session for {} (ID: {})",
            format_session_date(session.date),
            session.id
        ),
        None => println!("No workout session today. Use 'start' to begin one."),
    }
}

fn print_status(state: &ViewState, config: &Config) {
    print_header(state);
    if !state.session_exists() {
        return;
    }

    let stats = &state.statistics;
    let max_weight = config.default_unit.from_kg(stats.max_weight);
    println!(
        "Sets: {}  Exercises: {}  Total reps: {}  Max weight: {:.1} {}",
        stats.total_sets, stats.unique_exercises, stats.total_reps, max_weight, config.default_unit
    );

    if state.table_visible {
        print_set_table(&state.display_sets);
    }
}

fn print_exercises(controller: &Controller) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(Color::Green),
            Cell::new("Name").fg(Color::Green),
        ]);
    for exercise in &controller.state().form.exercise_options {
        table.add_row(vec![Cell::new(&exercise.id), Cell::new(&exercise.name)]);
    }
    println!("{table}");
}

fn print_set_table(sets: &[WorkoutSet]) {
    if sets.is_empty() {
        println!("No sets logged yet.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").fg(Color::Green),
            Cell::new("Exercise").fg(Color::Green),
            Cell::new("Reps").fg(Color::Green),
            Cell::new("Weight").fg(Color::Green),
            Cell::new("RPE").fg(Color::Green),
            Cell::new("Notes").fg(Color::Green),
            Cell::new("Logged (Local)").fg(Color::Green),
        ]);

    for set in sets {
        table.add_row(vec![
            Cell::new(set.set_count.map_or("-".to_string(), |n| n.to_string())),
            Cell::new(
                set.exercise_name
                    .as_deref()
                    .unwrap_or(set.exercise_id.as_str()),
            ),
            Cell::new(set.reps.map_or("-".to_string(), |n| n.to_string())),
            Cell::new(
                set.display_weight()
                    .map_or("-".to_string(), |w| format!("{w:.1} {}", set.unit)),
            ),
            Cell::new(set.rpe.map_or("-".to_string(), |r| r.to_string())),
            Cell::new(set.notes.as_deref().unwrap_or("-")),
            Cell::new(set.created_at.map_or("-".to_string(), |ts| {
                ts.with_timezone(&Local).format("%H:%M").to_string()
            })),
        ]);
    }
    println!("{table}");
}
