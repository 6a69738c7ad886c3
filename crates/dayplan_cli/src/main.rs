//! Interactive day-schedule frontend.
//!
//! # Responsibility
//! - Render the selected day and its events in start-time order.
//! - Drive the cursor/form controller from line-based commands.
//! - Surface mutation notices and inline validation errors.

use chrono::{Local, NaiveDate};
use clap::Parser;
use dayplan_core::{
    db::{open_db, open_db_in_memory},
    failure_notice, success_notice, DateCursor, Event, EventForm, EventService, FormSubmission,
    MutationKind, Notice, SqliteEventRepository,
};
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dayplan", version, about = "Single-day event scheduler")]
struct Cli {
    /// Database file path.
    #[arg(long, default_value = "dayplan.db")]
    db: PathBuf,

    /// Use a throwaway in-memory database instead of a file.
    #[arg(long)]
    in_memory: bool,

    /// Directory for rolling log files; logging stays off when omitted.
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("dayplan: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or_else(|| dayplan_core::default_log_level());
        dayplan_core::init_logging(level, log_dir).map_err(Box::<dyn Error>::from)?;
    }

    let conn = if cli.in_memory {
        open_db_in_memory()?
    } else {
        open_db(&cli.db)?
    };
    let repo = SqliteEventRepository::try_new(&conn)?;
    let mut service = EventService::new(repo);

    let today = Local::now().date_naive();
    let mut cursor = DateCursor::new(today);

    println!("dayplan {} — type `help` for commands", dayplan_core::core_version());

    loop {
        let today = Local::now().date_naive();
        let day = match service.events_on(cursor.selected()) {
            Ok(day) => day,
            Err(err) => {
                eprintln!("failed to load events: {err}");
                Vec::new()
            }
        };
        render_day(cursor.selected(), today, &day);

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = read_input_line()? else {
            break;
        };
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");

        match command {
            "" => {}
            "help" => print_help(),
            "prev" | "p" => cursor.previous_day(),
            "next" | "n" => cursor.next_day(),
            "today" => cursor.jump_today(today),
            "tomorrow" => cursor.jump_tomorrow(today),
            "week" => cursor.jump_next_week(today),
            "add" => {
                let form = fill_form(EventForm::open_create(dayplan_core::day_key(
                    cursor.selected(),
                )))?;
                submit_form(&mut service, &form);
            }
            "edit" => match pick_event(parts.next(), &day) {
                Some(event) => {
                    let form = fill_form(EventForm::open_edit(event.clone()))?;
                    submit_form(&mut service, &form);
                }
                None => println!("usage: edit <event number from the list above>"),
            },
            "delete" => match pick_event(parts.next(), &day) {
                Some(event) => {
                    let notice = match service.delete_event(event.id) {
                        Ok(()) => success_notice(MutationKind::Delete),
                        Err(err) => failure_notice(MutationKind::Delete, &err),
                    };
                    print_notice(&notice);
                }
                None => println!("usage: delete <event number from the list above>"),
            },
            "json" => match serde_json::to_string_pretty(&day) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("failed to encode day: {err}"),
            },
            "quit" | "q" | "exit" => break,
            other => println!("unknown command `{other}`; type `help`"),
        }
    }

    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  prev | next        step one day back/forward");
    println!("  today | tomorrow   jump relative to the real current date");
    println!("  week               jump seven days ahead of today");
    println!("  add                create an event on the shown day");
    println!("  edit <n>           edit event <n> from the list");
    println!("  delete <n>         delete event <n> from the list");
    println!("  json               print the shown day as JSON");
    println!("  quit               leave");
}

fn render_day(selected: NaiveDate, today: NaiveDate, day: &[Event]) {
    let marker = if selected == today { " (today)" } else { "" };
    println!();
    println!("{}{marker}", selected.format("%A, %B %-d, %Y"));

    if day.is_empty() {
        println!("  no events scheduled");
        return;
    }

    for (index, event) in day.iter().enumerate() {
        println!(
            "  {}. {} - {}  {}",
            index + 1,
            format_time_12h(&event.start_time),
            format_time_12h(&event.end_time),
            event.title
        );
        if let Some(description) = &event.description {
            println!("     {description}");
        }
    }
}

/// Renders `HH:MM` as `h:mm am/pm`; falls back to the raw string when the
/// stored value does not parse.
fn format_time_12h(time: &str) -> String {
    let Some((hour_text, minute_text)) = time.split_once(':') else {
        return time.to_string();
    };
    let (Ok(hour), Ok(minute)) = (hour_text.parse::<u32>(), minute_text.parse::<u32>()) else {
        return time.to_string();
    };

    let suffix = if hour < 12 { "am" } else { "pm" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour}:{minute:02} {suffix}")
}

fn pick_event<'a>(arg: Option<&str>, day: &'a [Event]) -> Option<&'a Event> {
    let index: usize = arg?.parse().ok()?;
    if index == 0 {
        return None;
    }
    day.get(index - 1)
}

/// Prompts for each form field; a blank answer keeps the shown value.
fn fill_form(mut form: EventForm) -> io::Result<EventForm> {
    form.title = prompt_field("Title", &form.title)?;
    form.description = prompt_field("Description", &form.description)?;
    form.date = prompt_field("Date (YYYY-MM-DD)", &form.date)?;
    form.start_time = prompt_field("Start time (HH:MM)", &form.start_time)?;
    form.end_time = prompt_field("End time (HH:MM)", &form.end_time)?;
    Ok(form)
}

fn prompt_field(label: &str, current: &str) -> io::Result<String> {
    print!("{label} [{current}]: ");
    io::stdout().flush()?;

    match read_input_line()? {
        Some(answer) if !answer.trim().is_empty() => Ok(answer.trim().to_string()),
        _ => Ok(current.to_string()),
    }
}

/// Reads one line from stdin; `None` signals end of input.
fn read_input_line() -> io::Result<Option<String>> {
    let mut buffer = String::new();
    let read = io::stdin().read_line(&mut buffer)?;
    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(buffer.trim_end().to_string()))
    }
}

fn submit_form(service: &mut EventService<SqliteEventRepository<'_>>, form: &EventForm) {
    let submission = match form.submit() {
        Ok(submission) => submission,
        Err(errors) => {
            // Field errors block submission; nothing reaches the store.
            for error in &errors {
                println!("  {}: {error}", error.field());
            }
            return;
        }
    };

    let notice = match submission {
        FormSubmission::Create(draft) => match service.create_event(&draft) {
            Ok(_) => success_notice(MutationKind::Create),
            Err(err) => failure_notice(MutationKind::Create, &err),
        },
        FormSubmission::Update(id, patch) => match service.update_event(id, &patch) {
            Ok(_) => success_notice(MutationKind::Update),
            Err(err) => failure_notice(MutationKind::Update, &err),
        },
    };
    print_notice(&notice);
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::Success(message) => println!("{message}"),
        Notice::Failure(message) => println!("!! {message}"),
    }
}
