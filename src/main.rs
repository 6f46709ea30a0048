//! Evently command-line interface.
//!
//! Terminal front end for the event-management API: browse events one page
//! at a time, inspect a single event, create events, and register attendees.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use evently::client::{ApiClient, AttendeePages, EventPages};
use evently::config::ConfigLoader;
use evently::controller::ListController;
use evently::models::{NewAttendee, NewEvent};
use evently::notify::{ConsoleNotifier, Notify};
use evently::render;

#[derive(Parser)]
#[command(name = "evently", about = "Event management from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse and create events
    Events {
        #[command(subcommand)]
        action: EventsAction,
    },
    /// Browse and register attendees of an event
    Attendees {
        #[command(subcommand)]
        action: AttendeesAction,
    },
}

#[derive(Subcommand)]
enum EventsAction {
    /// List events, one page at a time
    List {
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    /// Show one event in detail
    Show { event_id: i64 },
    /// Create a new event
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
        /// Start time, RFC 3339 (e.g. 2026-09-01T09:00:00Z)
        #[arg(long)]
        start: DateTime<Utc>,
        /// End time, RFC 3339
        #[arg(long)]
        end: DateTime<Utc>,
        #[arg(long)]
        capacity: u32,
    },
}

#[derive(Subcommand)]
enum AttendeesAction {
    /// List the attendees of an event
    List {
        event_id: i64,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    /// Register an attendee for an event
    Register {
        event_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = ConfigLoader::new().load().context("loading configuration")?;
    evently::telemetry::init_tracing(&config).context("initializing telemetry")?;

    let client = ApiClient::from_config(&config);
    let notifier: Arc<dyn Notify> = Arc::new(ConsoleNotifier);

    let ok = match cli.command {
        Command::Events { action } => match action {
            EventsAction::List { page } => {
                let mut controller = ListController::new((), config.page_size, "events")
                    .starting_at(page)
                    .with_notifier(notifier);
                let source = EventPages::new(client);
                let ok = controller.load(&source).await
                    && matches!(
                        controller.state(),
                        evently::controller::ListState::Success(_)
                    );
                print!("{}", render::render_list(&controller, render::event_line));
                println!();
                ok
            }
            EventsAction::Show { event_id } => match client.get_event(event_id).await {
                Ok(event) => {
                    println!("{}", render::event_details(&event));
                    true
                }
                Err(err) => {
                    notifier.error(&err.to_string());
                    false
                }
            },
            EventsAction::Create {
                name,
                location,
                start,
                end,
                capacity,
            } => {
                let new_event = NewEvent {
                    name,
                    location,
                    start_time: start,
                    end_time: end,
                    max_capacity: capacity,
                };
                match client.create_event(&new_event).await {
                    Ok(event) => {
                        notifier.success(&format!("Created event #{}: {}", event.id, event.name));
                        true
                    }
                    Err(err) => {
                        notifier.error(&format!("Failed to create event: {err}"));
                        false
                    }
                }
            }
        },
        Command::Attendees { action } => match action {
            AttendeesAction::List { event_id, page } => {
                let mut controller = ListController::new(event_id, config.page_size, "attendees")
                    .starting_at(page)
                    .with_notifier(notifier);
                let source = AttendeePages::new(client);
                let ok = controller.load(&source).await
                    && matches!(
                        controller.state(),
                        evently::controller::ListState::Success(_)
                    );
                print!("{}", render::render_list(&controller, render::attendee_line));
                println!();
                ok
            }
            AttendeesAction::Register {
                event_id,
                name,
                email,
            } => {
                let attendee = NewAttendee { name, email };
                match client.register_attendee(event_id, &attendee).await {
                    Ok(created) => {
                        notifier.success(&format!(
                            "Registered {} for event #{}",
                            created.name, created.event_id
                        ));
                        true
                    }
                    Err(err) => {
                        notifier.error(&format!("Failed to register attendee: {err}"));
                        false
                    }
                }
            }
        },
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
