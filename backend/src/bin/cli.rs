use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use reqwest::Client;
use shared::{CreateMeetingResponse, Event, MeetingDraft, OverviewResponse};

#[derive(Parser)]
#[command(name = "lifeboard-cli")]
#[command(about = "CLI for the lifeboard calendar API")]
#[command(
    long_about = "A command-line interface for the lifeboard backend server.\n\n\
    Lists the unified calendar view (tasks, notes, and meetings merged into\n\
    one window) and manages meetings, the only category the dashboard can\n\
    create, update, or delete."
)]
struct Cli {
    /// Backend server URL to connect to.
    ///
    /// The CLI will make HTTP requests to this server's API endpoints.
    /// Use this to connect to a remote server or a different port.
    #[arg(
        short,
        long,
        default_value = "http://localhost:3000",
        env = "LIFEBOARD_API_URL"
    )]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the aggregated calendar view
    Events {
        #[command(subcommand)]
        action: EventAction,
    },
    /// Create, update, or delete meetings
    Meetings {
        #[command(subcommand)]
        action: MeetingAction,
    },
    /// Show record counts across the three sources
    Overview,
}

#[derive(Subcommand)]
enum EventAction {
    /// List events for the window around a reference date
    List {
        /// Reference instant in RFC 3339 (e.g. 2024-06-10T00:00:00Z).
        /// Defaults to now.
        #[arg(short, long, value_name = "RFC3339")]
        date: Option<String>,

        /// View granularity: month, week, work_week, day, or agenda.
        #[arg(short, long, default_value = "month")]
        view: String,

        /// Case-insensitive substring filter over title and description.
        #[arg(short, long, value_name = "TEXT")]
        query: Option<String>,

        /// Print the raw JSON response instead of the formatted list.
        #[arg(long)]
        json: bool,
    },

    /// Today's events
    Today,

    /// This week's events
    Week,
}

#[derive(Subcommand)]
enum MeetingAction {
    /// Create a new meeting
    Create {
        /// The meeting title, shown unprefixed on the calendar.
        title: String,

        /// A longer description with agenda or context.
        #[arg(short, long, value_name = "TEXT")]
        description: Option<String>,

        /// Start instant in RFC 3339.
        #[arg(short, long, value_name = "RFC3339")]
        start: String,

        /// End instant in RFC 3339.
        #[arg(short, long, value_name = "RFC3339")]
        end: String,

        /// Mark the meeting as all-day.
        #[arg(long)]
        all_day: bool,
    },

    /// Update an existing meeting's fields
    Update {
        /// The event id to update (e.g. meeting-12).
        /// Task and note ids are rejected; those records are read-only here.
        id: String,

        /// New title to replace the existing one.
        #[arg(short, long, value_name = "TEXT")]
        title: String,

        /// New description to replace the existing one.
        #[arg(short, long, value_name = "TEXT")]
        description: Option<String>,

        /// New start instant in RFC 3339.
        #[arg(short, long, value_name = "RFC3339")]
        start: String,

        /// New end instant in RFC 3339.
        #[arg(short, long, value_name = "RFC3339")]
        end: String,

        /// Mark the meeting as all-day.
        #[arg(long)]
        all_day: bool,
    },

    /// Permanently delete a meeting
    ///
    /// This action cannot be undone. The backing record is removed from the
    /// meeting service.
    Delete {
        /// The event id to delete (e.g. meeting-12).
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = Client::new();

    match cli.command {
        Commands::Events { action } => handle_events(&client, &cli.base_url, action).await?,
        Commands::Meetings { action } => handle_meetings(&client, &cli.base_url, action).await?,
        Commands::Overview => handle_overview(&client, &cli.base_url).await?,
    }

    Ok(())
}

fn parse_instant(value: &str) -> anyhow::Result<DateTime<Utc>> {
    value
        .parse()
        .with_context(|| format!("'{}' is not an RFC 3339 instant", value))
}

fn print_events(events: &[Event]) {
    if events.is_empty() {
        println!("No events in this window.");
        return;
    }
    for event in events {
        let span = if event.all_day {
            format!("{} (all day)", event.start.format("%Y-%m-%d"))
        } else {
            format!(
                "{} → {}",
                event.start.format("%Y-%m-%d %H:%M"),
                event.end.format("%Y-%m-%d %H:%M")
            )
        };
        println!("[{}] {}  {}", event.id, span, event.title);
        if let Some(description) = &event.description {
            if !description.is_empty() {
                println!("    {}", description);
            }
        }
    }
}

/// Surface non-2xx responses with the server's error body.
async fn ensure_success(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("server returned {}: {}", status, response.text().await?);
    }
    Ok(response)
}

async fn fetch_events(client: &Client, url: &str) -> anyhow::Result<Vec<Event>> {
    let response = ensure_success(client.get(url).send().await?).await?;
    Ok(response.json().await?)
}

async fn handle_events(client: &Client, base_url: &str, action: EventAction) -> anyhow::Result<()> {
    match action {
        EventAction::List {
            date,
            view,
            query,
            json,
        } => {
            let url = format!("{}/api/calendar/events", base_url);
            let mut params: Vec<(&str, String)> = vec![("view", view)];
            if let Some(date) = date {
                // Validate locally so a typo fails fast with a clear message.
                params.push(("date", parse_instant(&date)?.to_rfc3339()));
            }
            if let Some(query) = query {
                params.push(("q", query));
            }

            let response = ensure_success(client.get(&url).query(&params).send().await?).await?;
            let events: Vec<Event> = response.json().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else {
                print_events(&events);
            }
        }
        EventAction::Today => {
            let events =
                fetch_events(client, &format!("{}/api/calendar/events/today", base_url)).await?;
            print_events(&events);
        }
        EventAction::Week => {
            let events =
                fetch_events(client, &format!("{}/api/calendar/events/week", base_url)).await?;
            print_events(&events);
        }
    }

    Ok(())
}

async fn handle_meetings(
    client: &Client,
    base_url: &str,
    action: MeetingAction,
) -> anyhow::Result<()> {
    match action {
        MeetingAction::Create {
            title,
            description,
            start,
            end,
            all_day,
        } => {
            let draft = MeetingDraft {
                title,
                description,
                start: parse_instant(&start)?,
                end: parse_instant(&end)?,
                all_day,
            };
            let response = ensure_success(
                client
                    .post(format!("{}/api/calendar/events", base_url))
                    .json(&draft)
                    .send()
                    .await?,
            )
            .await?;
            let created: CreateMeetingResponse = response.json().await?;
            println!("Created meeting: [{}] {}", created.id, draft_title(&created));
        }
        MeetingAction::Update {
            id,
            title,
            description,
            start,
            end,
            all_day,
        } => {
            let draft = MeetingDraft {
                title: title.clone(),
                description,
                start: parse_instant(&start)?,
                end: parse_instant(&end)?,
                all_day,
            };
            ensure_success(
                client
                    .put(format!("{}/api/calendar/events/{}", base_url, id))
                    .json(&draft)
                    .send()
                    .await?,
            )
            .await?;
            println!("Updated meeting: [{}] {}", id, title);
        }
        MeetingAction::Delete { id } => {
            ensure_success(
                client
                    .delete(format!("{}/api/calendar/events/{}", base_url, id))
                    .send()
                    .await?,
            )
            .await?;
            println!("Deleted meeting {}", id);
        }
    }

    Ok(())
}

fn draft_title(created: &CreateMeetingResponse) -> &str {
    created
        .events
        .iter()
        .find(|event| event.id == created.id)
        .map(|event| event.title.as_str())
        .unwrap_or("(outside the current window)")
}

async fn handle_overview(client: &Client, base_url: &str) -> anyhow::Result<()> {
    let response =
        ensure_success(client.get(format!("{}/api/overview", base_url)).send().await?).await?;
    let overview: OverviewResponse = response.json().await?;
    println!("Tasks:    {}", overview.task_count);
    println!("Notes:    {}", overview.note_count);
    println!("Meetings: {}", overview.meeting_count);

    Ok(())
}
