//! Command-line front end for the Life OS store.
//!
//! # Responsibility
//! - Run one store operation per invocation against a SQLite-backed store.
//! - Print results as JSON using the persisted field names.

use clap::{Parser, Subcommand};
use lifeos_core::clock::format_timestamp;
use lifeos_core::db::open_db;
use lifeos_core::insights::{
    average_energy, energy_trend, profile_stats, recent_activities, recent_moods, task_summary,
    MOOD_WINDOW, RECENT_ACTIVITY_LIMIT,
};
use lifeos_core::{
    default_log_level, init_logging, Clock, HabitFrequency, HapticDispatcher, HapticEffect,
    Impact, LocalStore, NewActivity, NewHabit, NewMoodEntry, NewTask, NoopNotificationPort,
    SettingsPatch, SqliteKeyValueStore, StressLevel, SystemClock, TaskPatch, TaskStatus,
};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;

const DEFAULT_DB_FILE_NAME: &str = "lifeos.sqlite3";

#[derive(Parser, Debug)]
#[command(name = "lifeos", version, about = "Tasks, habits, moods and activities in one local store")]
struct Cli {
    /// SQLite database file holding the document.
    #[arg(long = "db", global = true, env = "LIFEOS_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true, env = "LIFEOS_LOG_DIR")]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "LIFEOS_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the whole document
    Show,
    /// Print today's date
    Today,
    /// Print the seven-day strip around today
    Week,
    /// Dashboard, mood and profile summaries
    Stats,
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },
    Habit {
        #[command(subcommand)]
        command: HabitCommand,
    },
    Mood {
        #[command(subcommand)]
        command: MoodCommand,
    },
    Activity {
        #[command(subcommand)]
        command: ActivityCommand,
    },
    /// Change settings; omitted flags keep their value
    Settings {
        #[arg(long)]
        haptic_feedback: Option<bool>,
        #[arg(long)]
        neural_sync: Option<bool>,
        #[arg(long)]
        brightness: Option<u32>,
        #[arg(long)]
        user_name: Option<String>,
    },
    /// Replace everything with an empty document
    Reset,
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    Add {
        title: String,
        #[arg(long, default_value = "")]
        time: String,
        /// active|pending|completed
        #[arg(long, value_parser = parse_enum::<TaskStatus>)]
        status: Option<TaskStatus>,
    },
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long, value_parser = parse_enum::<TaskStatus>)]
        status: Option<TaskStatus>,
    },
    Toggle {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum HabitCommand {
    Add {
        name: String,
        #[arg(long, default_value = "target")]
        icon: String,
        /// daily|weekly
        #[arg(long, default_value = "daily", value_parser = parse_enum::<HabitFrequency>)]
        frequency: HabitFrequency,
    },
    /// Mark or clear a date (defaults to today)
    Toggle {
        id: String,
        #[arg(long)]
        date: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum MoodCommand {
    Add {
        #[arg(long)]
        energy: u32,
        #[arg(long)]
        focus: u32,
        /// low|medium|high
        #[arg(long, value_parser = parse_enum::<StressLevel>)]
        stress: StressLevel,
        #[arg(long)]
        notes: Option<String>,
        /// Defaults to today
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ActivityCommand {
    Add {
        title: String,
        #[arg(long)]
        duration: String,
        /// low|moderate|high
        #[arg(long, default_value = "moderate", value_parser = parse_enum::<Impact>)]
        impact: Impact,
        #[arg(long, default_value = "work")]
        category: String,
    },
    Delete {
        id: String,
    },
}

impl Command {
    /// Whether the command writes the document.
    fn mutates(&self) -> bool {
        !matches!(self, Self::Show | Self::Today | Self::Week | Self::Stats)
    }
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let db_path = cli
        .db_path
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

    match run(cli.command, &db_path) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}

fn run(command: Command, db_path: &Path) -> Result<String, String> {
    let conn = open_db(db_path)
        .map_err(|err| format!("failed to open {}: {err}", db_path.display()))?;
    let storage = SqliteKeyValueStore::try_new(&conn).map_err(|err| err.to_string())?;
    let mut store = LocalStore::new(storage);
    let haptics = HapticDispatcher::new(NoopNotificationPort);
    let mutates = command.mutates();

    let output = match command {
        Command::Show => to_json(&store.load())?,
        Command::Today => store.today(),
        Command::Week => to_json(&store.week_days())?,
        Command::Stats => {
            let doc = store.load();
            let moods = recent_moods(&doc, MOOD_WINDOW);
            to_json(&serde_json::json!({
                "tasks": task_summary(&doc),
                "profile": profile_stats(&doc),
                "averageEnergy": average_energy(&moods),
                "energyTrend": energy_trend(&moods),
                "recentActivities": recent_activities(&doc, RECENT_ACTIVITY_LIMIT),
            }))?
        }
        Command::Task { command } => run_task(&mut store, command)?,
        Command::Habit { command } => run_habit(&mut store, command)?,
        Command::Mood {
            command:
                MoodCommand::Add {
                    energy,
                    focus,
                    stress,
                    notes,
                    date,
                },
        } => {
            let date = date.unwrap_or_else(|| store.today());
            to_json(
                &store
                    .add_mood_entry(NewMoodEntry {
                        date,
                        energy,
                        stress,
                        focus,
                        notes,
                    })
                    .map_err(|err| err.to_string())?,
            )?
        }
        Command::Activity { command } => match command {
            ActivityCommand::Add {
                title,
                duration,
                impact,
                category,
            } => to_json(
                &store
                    .add_activity(NewActivity {
                        title,
                        duration,
                        impact,
                        category,
                        date: format_timestamp(SystemClock.now()),
                    })
                    .map_err(|err| err.to_string())?,
            )?,
            ActivityCommand::Delete { id } => {
                removed_json(store.delete_activity(&id).map_err(|err| err.to_string())?)?
            }
        },
        Command::Settings {
            haptic_feedback,
            neural_sync,
            brightness,
            user_name,
        } => to_json(
            &store
                .update_settings(SettingsPatch {
                    haptic_feedback,
                    neural_sync,
                    brightness,
                    user_name,
                })
                .map_err(|err| err.to_string())?,
        )?,
        Command::Reset => to_json(&store.reset_all_data().map_err(|err| err.to_string())?)?,
    };

    if mutates && haptics.fire(&store.load().settings, HapticEffect::Success) {
        debug!("event=cli_haptic module=cli status=ok");
    }
    Ok(output)
}

fn run_task(
    store: &mut LocalStore<SqliteKeyValueStore<'_>>,
    command: TaskCommand,
) -> Result<String, String> {
    match command {
        TaskCommand::Add {
            title,
            time,
            status,
        } => to_json(
            &store
                .add_task(NewTask {
                    title,
                    time,
                    status: status.unwrap_or_default(),
                })
                .map_err(|err| err.to_string())?,
        ),
        TaskCommand::Update {
            id,
            title,
            time,
            status,
        } => to_json(
            &store
                .update_task(&id, TaskPatch { title, time, status })
                .map_err(|err| err.to_string())?,
        ),
        TaskCommand::Toggle { id } => to_json(
            &store
                .toggle_task_status(&id)
                .map_err(|err| err.to_string())?,
        ),
        TaskCommand::Delete { id } => {
            removed_json(store.delete_task(&id).map_err(|err| err.to_string())?)
        }
    }
}

fn run_habit(
    store: &mut LocalStore<SqliteKeyValueStore<'_>>,
    command: HabitCommand,
) -> Result<String, String> {
    match command {
        HabitCommand::Add {
            name,
            icon,
            frequency,
        } => to_json(
            &store
                .add_habit(NewHabit {
                    name,
                    icon,
                    frequency,
                })
                .map_err(|err| err.to_string())?,
        ),
        HabitCommand::Toggle { id, date } => {
            let date = date.unwrap_or_else(|| store.today());
            to_json(
                &store
                    .toggle_habit_for_date(&id, &date)
                    .map_err(|err| err.to_string())?,
            )
        }
        HabitCommand::Delete { id } => {
            removed_json(store.delete_habit(&id).map_err(|err| err.to_string())?)
        }
    }
}

fn parse_enum<T: DeserializeOwned>(value: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_ascii_lowercase()))
        .map_err(|_| format!("unsupported value `{value}`"))
}

fn removed_json(removed: bool) -> Result<String, String> {
    to_json(&serde_json::json!({ "removed": removed }))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    fn mutates(args: &[&str]) -> bool {
        Cli::try_parse_from(args).unwrap().command.mutates()
    }

    #[test]
    fn read_only_commands_do_not_mutate() {
        for command in ["show", "today", "week", "stats"] {
            assert!(!mutates(&["lifeos", command]), "{command}");
        }
    }

    #[test]
    fn writing_commands_mutate() {
        assert!(mutates(&["lifeos", "task", "add", "Plan"]));
        assert!(mutates(&["lifeos", "habit", "toggle", "1"]));
        assert!(mutates(&["lifeos", "activity", "delete", "2"]));
        assert!(mutates(&["lifeos", "settings", "--brightness", "50"]));
        assert!(mutates(&["lifeos", "reset"]));
    }

    #[test]
    fn enum_flags_parse_case_insensitively() {
        let cli = Cli::try_parse_from(["lifeos", "task", "add", "Plan", "--status", "Active"]);
        assert!(cli.is_ok());
        let cli = Cli::try_parse_from(["lifeos", "task", "add", "Plan", "--status", "done"]);
        assert!(cli.is_err());
    }
}
