//! meet-tui - terminal video-conferencing client
//!
//! Meetings, participants and notifications are simulated locally; there is
//! no media or signaling backend.

mod config;
mod models;
mod notifier;
mod session;
mod tui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use models::{
    duration_label, timezone_label, JoinRequest, MeetingId, ScheduleForm,
    DEFAULT_DURATION_MINUTES, DEFAULT_TIMEZONE,
};
use tui::{LogBuffer, MeetingEntry, Route, Transition};

#[derive(Parser)]
#[command(name = "meet-tui")]
#[command(about = "Terminal client for video meetings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface
    Tui {
        /// Page to open first, e.g. /join or /meeting/<id>
        #[arg(long, default_value = "/")]
        route: Route,
    },

    /// Join a meeting directly
    Join {
        /// Meeting ID
        meeting_id: String,

        /// Join with the microphone muted
        #[arg(long)]
        muted: bool,

        /// Join with the camera off
        #[arg(long)]
        no_video: bool,

        /// Display name (defaults to the profile name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Create a new meeting ID and print its link
    New {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Validate and print a scheduled meeting
    Schedule {
        /// Meeting title
        #[arg(long)]
        title: String,

        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// Start time, on the half hour between 08:00 and 19:30
        #[arg(long)]
        time: String,

        /// Duration in minutes
        #[arg(long, default_value_t = DEFAULT_DURATION_MINUTES)]
        duration: u32,

        /// IANA timezone name
        #[arg(long, default_value = DEFAULT_TIMEZONE)]
        timezone: String,

        /// Optional description
        #[arg(long, default_value = "")]
        description: String,

        /// Invitee addresses, comma separated
        #[arg(long, default_value = "")]
        invite: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration and where it is read from
    Config,
}

impl Commands {
    fn uses_terminal_ui(&self) -> bool {
        matches!(self, Commands::Tui { .. } | Commands::Join { .. })
    }
}

/// Install the global subscriber. With a `LogBuffer` the output goes to the
/// debug log pane instead of stderr.
fn init_tracing(verbose: bool, log_buffer: Option<LogBuffer>) {
    let default_filter = if verbose { "debug" } else { "info" };
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()));

    match log_buffer {
        Some(buffer) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(buffer),
            )
            .init(),
        None => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

/// Where `meet-tui join` lands: the waiting room for protected meetings,
/// the meeting room otherwise.
fn join_transition(
    config: &Config,
    meeting_id: &str,
    name: Option<&str>,
    muted: bool,
    no_video: bool,
) -> Result<Transition> {
    let request = JoinRequest::new(
        meeting_id,
        name.unwrap_or(&config.profile.display_name),
    )?;

    let mut preferences = config.join_preferences();
    if muted {
        preferences.microphone_muted = true;
    }
    if no_video {
        preferences.camera_enabled = false;
    }

    let waiting = request.meeting_id.requires_waiting_room();
    let entry = MeetingEntry {
        meeting_id: request.meeting_id,
        display_name: request.display_name,
        preferences,
        remember_name: name.is_some(),
    };
    Ok(if waiting {
        Transition::EnterWaitingRoom(entry)
    } else {
        Transition::EnterMeeting(entry)
    })
}

fn print_new_meeting(config: &Config, json: bool) -> Result<()> {
    let id = MeetingId::generate()?;
    let link = id.link(&config.base_url);
    tracing::debug!("Generated meeting id {}", id);

    if json {
        let value = serde_json::json!({ "id": id, "link": link });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Meeting ID: {}", id);
        println!("Link:       {}", link);
    }
    Ok(())
}

fn print_scheduled_meeting(config: &Config, form: &ScheduleForm, json: bool) -> Result<()> {
    let meeting = form
        .submit(&config.base_url)
        .context("Invalid meeting schedule")?;
    tracing::info!("Scheduled meeting {}", meeting.id);

    if json {
        println!("{}", serde_json::to_string_pretty(&meeting)?);
        return Ok(());
    }

    println!("{}", meeting.title);
    println!("  When:     {}", meeting.when_label());
    println!("  Duration: {}", duration_label(meeting.duration_minutes));
    println!("  Timezone: {}", timezone_label(&meeting.timezone));
    println!("  Meeting:  {}", meeting.id);
    println!("  Link:     {}", meeting.link);
    if !meeting.invitees.is_empty() {
        println!("  Invited:  {}", meeting.invitees.join(", "));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_buffer = cli.command.uses_terminal_ui().then(LogBuffer::new);
    init_tracing(cli.verbose, log_buffer.clone());

    let config = Config::load()?;

    match cli.command {
        Commands::Tui { route } => {
            tui::run(config, Transition::Goto(route), log_buffer.unwrap_or_default()).await?;
        }
        Commands::Join {
            meeting_id,
            muted,
            no_video,
            name,
        } => {
            let start = join_transition(&config, &meeting_id, name.as_deref(), muted, no_video)?;
            tui::run(config, start, log_buffer.unwrap_or_default()).await?;
        }
        Commands::New { json } => {
            print_new_meeting(&config, json)?;
        }
        Commands::Schedule {
            title,
            date,
            time,
            duration,
            timezone,
            description,
            invite,
            json,
        } => {
            let form = ScheduleForm {
                title,
                description,
                date,
                start_time: time,
                duration_minutes: duration,
                timezone,
                invite_emails: invite,
                ..ScheduleForm::default()
            };
            print_scheduled_meeting(&config, &form, json)?;
        }
        Commands::Config => {
            println!("# {}", Config::config_path()?.display());
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}
