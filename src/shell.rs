use chrono::NaiveDate;

use crate::clock::Clock;
use crate::manager::{BookingManager, parse_min_capacity};
use crate::model::{
    Booking, BookingDraft, BookingForm, Room, RoomFilter, RoomStatus, RoomType, active_count,
};
use crate::present::{Presentation, Severity};
use crate::store::Storage;

/// Parsed command from a shell input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Rooms,
    Filter(RoomFilter),
    Search,
    Date(NaiveDate),
    From(String),
    To(String),
    Book(String),
    Confirm,
    Close,
    Bookings,
    Edit(String),
    Cancel(String),
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    Usage(&'static str),
    BadDate(String),
    BadRoomType(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Empty => write!(f, "empty command"),
            CommandError::Unknown(cmd) => write!(f, "unknown command: {cmd} (try 'help')"),
            CommandError::Usage(usage) => write!(f, "usage: {usage}"),
            CommandError::BadDate(raw) => write!(f, "bad date '{raw}', expected YYYY-MM-DD"),
            CommandError::BadRoomType(raw) => {
                write!(f, "unknown room type '{raw}', expected classroom, lab or auditorium")
            }
        }
    }
}

impl std::error::Error for CommandError {}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err(CommandError::Empty);
    };
    let args: Vec<&str> = parts.collect();

    match head.to_lowercase().as_str() {
        "rooms" => Ok(Command::Rooms),
        "bookings" => Ok(Command::Bookings),
        "filter" => parse_filter(&args),
        "search" => Ok(Command::Search),
        "date" => {
            let raw = args.first().ok_or(CommandError::Usage("date YYYY-MM-DD"))?;
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Command::Date)
                .map_err(|_| CommandError::BadDate(raw.to_string()))
        }
        // Times pass through untouched: the booking contract on them is
        // lexical ordering of "HH:MM", nothing more.
        "from" => {
            let raw = args.first().ok_or(CommandError::Usage("from HH:MM"))?;
            Ok(Command::From(raw.to_string()))
        }
        "to" => {
            let raw = args.first().ok_or(CommandError::Usage("to HH:MM"))?;
            Ok(Command::To(raw.to_string()))
        }
        "book" => {
            let raw = args.first().ok_or(CommandError::Usage("book <room_id>"))?;
            Ok(Command::Book(raw.to_string()))
        }
        "confirm" => Ok(Command::Confirm),
        "close" => Ok(Command::Close),
        "edit" => {
            let raw = args.first().ok_or(CommandError::Usage("edit <booking_id>"))?;
            Ok(Command::Edit(raw.to_string()))
        }
        "cancel" => {
            let raw = args
                .first()
                .ok_or(CommandError::Usage("cancel <booking_id>"))?;
            Ok(Command::Cancel(raw.to_string()))
        }
        "help" => Ok(Command::Help),
        "quit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_filter(args: &[&str]) -> Result<Command, CommandError> {
    let filter = match args {
        [] => RoomFilter::default(),
        [one] => {
            if let Some(kind) = RoomType::parse(one) {
                RoomFilter {
                    room_type: Some(kind),
                    min_capacity: 0,
                }
            } else if one.chars().all(|c| c.is_ascii_digit()) {
                RoomFilter {
                    room_type: None,
                    min_capacity: parse_min_capacity(one),
                }
            } else {
                return Err(CommandError::BadRoomType(one.to_string()));
            }
        }
        [kind_raw, capacity_raw, ..] => {
            let kind = RoomType::parse(kind_raw)
                .ok_or_else(|| CommandError::BadRoomType(kind_raw.to_string()))?;
            // Junk capacity behaves like the numeric input: no threshold.
            RoomFilter {
                room_type: Some(kind),
                min_capacity: parse_min_capacity(capacity_raw),
            }
        }
    };
    Ok(Command::Filter(filter))
}

// ── Shell ────────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
pub enum ShellOutcome {
    Continue,
    Quit,
}

/// Line-driven front end over the manager. Holds the one extra piece of
/// state the widget core refuses to own: the pending yes/no question a
/// cancellation asks before anything is removed.
pub struct Shell<S, C, P> {
    manager: BookingManager<S, C, P>,
    pending_cancel: Option<String>,
}

impl<S: Storage, C: Clock, P: Presentation> Shell<S, C, P> {
    pub fn new(manager: BookingManager<S, C, P>) -> Self {
        Self {
            manager,
            pending_cancel: None,
        }
    }

    pub fn manager(&self) -> &BookingManager<S, C, P> {
        &self.manager
    }

    pub fn handle_line(&mut self, line: &str) -> ShellOutcome {
        // A pending cancellation consumes the next line as its answer,
        // whatever that line looks like.
        if let Some(booking_id) = self.pending_cancel.take() {
            match line.trim() {
                "y" | "Y" | "yes" => self.manager.cancel_booking(&booking_id),
                _ => println!("Cancellation aborted."),
            }
            return ShellOutcome::Continue;
        }

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(CommandError::Empty) => return ShellOutcome::Continue,
            Err(e) => {
                println!("{e}");
                return ShellOutcome::Continue;
            }
        };

        match command {
            Command::Rooms => self.manager.render_rooms(),
            Command::Bookings => self.manager.render_bookings(),
            Command::Filter(filter) => self.manager.set_filter(filter),
            Command::Search => self.manager.search_rooms(),
            Command::Date(date) => self.manager.set_form_date(Some(date)),
            Command::From(start) => self.manager.set_form_start(Some(start)),
            Command::To(end) => self.manager.set_form_end(Some(end)),
            Command::Book(room_id) => self.manager.open_booking(&room_id),
            Command::Confirm => {
                // Validation failures were already pushed to the presenter.
                let _ = self.manager.confirm_booking();
            }
            Command::Close => self.manager.close_booking(),
            Command::Edit(booking_id) => self.manager.edit_booking(&booking_id),
            Command::Cancel(booking_id) => {
                println!("Are you sure you want to cancel this booking? [y/N]");
                self.pending_cancel = Some(booking_id);
            }
            Command::Help => print_help(),
            Command::Quit => return ShellOutcome::Quit,
        }
        ShellOutcome::Continue
    }
}

fn print_help() {
    println!("Commands:");
    println!("  rooms                     show the room list");
    println!("  filter [type] [capacity]  filter rooms by type and/or minimum seats");
    println!("  search                    search rooms with the current filter");
    println!("  date YYYY-MM-DD           set the booking date");
    println!("  from HH:MM                set the start time");
    println!("  to HH:MM                  set the end time");
    println!("  book <room_id>            open a booking on a room");
    println!("  confirm                   confirm the open booking");
    println!("  close                     close the open booking");
    println!("  bookings                  show your bookings");
    println!("  edit <booking_id>         load a booking's details into the form");
    println!("  cancel <booking_id>       cancel a booking");
    println!("  help                      this text");
    println!("  quit                      exit");
}

// ── Console rendering ────────────────────────────────────────────

/// Renders the widget as plain text on stdout. Stateless: every push is a
/// full snapshot, and a scrollback terminal needs no dismiss timers or
/// teardown.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePresenter;

impl Presentation for ConsolePresenter {
    fn render_rooms(&mut self, rooms: &[Room], filter: &RoomFilter) {
        println!();
        println!("Rooms ({})", describe_filter(filter));
        if rooms.is_empty() {
            println!("  No rooms found");
            println!("  Try adjusting your filters or search criteria");
            return;
        }
        for room in rooms {
            let action = match room.status {
                RoomStatus::Available => format!("[book {}]", room.id),
                RoomStatus::Occupied => "[unavailable]".to_string(),
            };
            println!("  {}  {}  {}  {}", room.name, room.kind, room.status, action);
            println!("    {} seats, {}", room.capacity, room.location);
            println!("    {}", feature_line(&room.features));
        }
    }

    fn render_bookings(&mut self, bookings: &[Booking]) {
        println!();
        if bookings.is_empty() {
            println!("Your bookings (0 bookings)");
            println!("  No bookings yet");
            return;
        }
        let active = active_count(bookings);
        let plural = if active == 1 { "" } else { "s" };
        println!("Your bookings ({active} active booking{plural})");
        for booking in bookings {
            println!("  {}  [{}]", booking.room_name, booking.status);
            println!(
                "    {}  {} - {}",
                format_date(booking.date),
                booking.start_time,
                booking.end_time
            );
            println!(
                "    {}  (edit {id} | cancel {id})",
                type_label(booking.room_type),
                id = booking.id
            );
        }
    }

    fn show_booking(&mut self, draft: &BookingDraft, form: &BookingForm) {
        let room = &draft.room;
        println!();
        println!("Booking Details");
        println!("  Room: {} ({})", room.name, room.kind);
        println!("  Capacity: {} seats", room.capacity);
        println!("  Location: {}", room.location);
        match form.date {
            Some(date) => println!("  Date: {}", format_date(date)),
            None => println!("  Date: (not set)"),
        }
        println!(
            "  Time: {} - {}",
            form.start_time.as_deref().unwrap_or("(not set)"),
            form.end_time.as_deref().unwrap_or("(not set)")
        );
        println!("  Features: {}", room.features.join(", "));
        println!(
            "  Note: Please ensure you cancel at least 2 hours before the scheduled \
             time if plans change."
        );
        println!("  Type 'confirm' to book this room, or 'close' to abandon.");
    }

    fn close_booking(&mut self) {
        // Nothing to tear down in a scrollback terminal.
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        println!("[{severity}] {message}");
    }
}

fn describe_filter(filter: &RoomFilter) -> String {
    match (filter.room_type, filter.min_capacity) {
        (None, 0) => "all rooms".to_string(),
        (Some(kind), 0) => format!("type {kind}"),
        (None, capacity) => format!("capacity >= {capacity}"),
        (Some(kind), capacity) => format!("type {kind}, capacity >= {capacity}"),
    }
}

/// First three features, then a "+N more" tail like the room cards show.
fn feature_line(features: &[String]) -> String {
    let mut line = features
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if features.len() > 3 {
        line.push_str(&format!(", +{} more", features.len() - 3));
    }
    line
}

fn format_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

fn type_label(kind: RoomType) -> &'static str {
    match kind {
        RoomType::Classroom => "Classroom",
        RoomType::Lab => "Lab",
        RoomType::Auditorium => "Auditorium",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::present::{PresenterEvent, RecordingPresenter};
    use crate::store::MemoryStorage;
    use chrono::NaiveDateTime;

    // ── Parsing ──────────────────────────────────────────────────

    #[test]
    fn parses_bare_commands() {
        assert_eq!(parse_command("rooms"), Ok(Command::Rooms));
        assert_eq!(parse_command("bookings"), Ok(Command::Bookings));
        assert_eq!(parse_command("search"), Ok(Command::Search));
        assert_eq!(parse_command("confirm"), Ok(Command::Confirm));
        assert_eq!(parse_command("close"), Ok(Command::Close));
        assert_eq!(parse_command("help"), Ok(Command::Help));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    fn commands_are_case_insensitive_on_the_verb() {
        assert_eq!(parse_command("ROOMS"), Ok(Command::Rooms));
        assert_eq!(
            parse_command("Book room_3"),
            Ok(Command::Book("room_3".into()))
        );
    }

    #[test]
    fn parses_filter_forms() {
        assert_eq!(
            parse_command("filter"),
            Ok(Command::Filter(RoomFilter::default()))
        );
        assert_eq!(
            parse_command("filter lab"),
            Ok(Command::Filter(RoomFilter {
                room_type: Some(RoomType::Lab),
                min_capacity: 0
            }))
        );
        assert_eq!(
            parse_command("filter 40"),
            Ok(Command::Filter(RoomFilter {
                room_type: None,
                min_capacity: 40
            }))
        );
        assert_eq!(
            parse_command("filter auditorium 120"),
            Ok(Command::Filter(RoomFilter {
                room_type: Some(RoomType::Auditorium),
                min_capacity: 120
            }))
        );
        assert_eq!(
            parse_command("filter gym"),
            Err(CommandError::BadRoomType("gym".into()))
        );
        // Junk capacity falls back to no threshold.
        assert_eq!(
            parse_command("filter lab lots"),
            Ok(Command::Filter(RoomFilter {
                room_type: Some(RoomType::Lab),
                min_capacity: 0
            }))
        );
    }

    #[test]
    fn parses_date_and_times() {
        assert_eq!(
            parse_command("date 2024-03-10"),
            Ok(Command::Date(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()))
        );
        assert_eq!(
            parse_command("date 10/03/2024"),
            Err(CommandError::BadDate("10/03/2024".into()))
        );
        assert_eq!(parse_command("from 09:00"), Ok(Command::From("09:00".into())));
        // Out-of-range times pass through; ordering on them is lexical.
        assert_eq!(parse_command("to 25:00"), Ok(Command::To("25:00".into())));
    }

    #[test]
    fn missing_arguments_report_usage() {
        assert_eq!(
            parse_command("book"),
            Err(CommandError::Usage("book <room_id>"))
        );
        assert_eq!(
            parse_command("cancel"),
            Err(CommandError::Usage("cancel <booking_id>"))
        );
        assert_eq!(parse_command("date"), Err(CommandError::Usage("date YYYY-MM-DD")));
    }

    #[test]
    fn unknown_and_empty_lines() {
        assert_eq!(
            parse_command("frobnicate"),
            Err(CommandError::Unknown("frobnicate".into()))
        );
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
    }

    // ── Dispatch ─────────────────────────────────────────────────

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn shell_rooms() -> Vec<Room> {
        vec![Room {
            id: "room_1".into(),
            name: "A1.01".into(),
            kind: RoomType::Classroom,
            capacity: 30,
            features: vec!["Projector".into()],
            status: RoomStatus::Available,
            location: "Building A, Floor 1".into(),
        }]
    }

    fn shell() -> (
        Shell<MemoryStorage, FixedClock, RecordingPresenter>,
        RecordingPresenter,
    ) {
        let presenter = RecordingPresenter::new();
        let manager = BookingManager::new(
            shell_rooms(),
            MemoryStorage::new(),
            FixedClock(noon()),
            presenter.clone(),
        );
        let shell = Shell::new(manager);
        presenter.take_events();
        (shell, presenter)
    }

    #[test]
    fn book_then_confirm_creates_a_booking() {
        let (mut shell, _presenter) = shell();
        assert_eq!(shell.handle_line("book room_1"), ShellOutcome::Continue);
        assert_eq!(shell.handle_line("confirm"), ShellOutcome::Continue);
        assert_eq!(shell.manager().bookings().len(), 4);
        assert_eq!(
            shell.manager().room("room_1").unwrap().status,
            RoomStatus::Occupied
        );
    }

    #[test]
    fn cancel_asks_first_and_yes_goes_through() {
        let (mut shell, presenter) = shell();
        shell.handle_line("cancel booking_1");
        // Nothing happened yet; the question is pending.
        assert!(shell.manager().booking("booking_1").is_some());
        assert!(presenter.take_events().is_empty());

        shell.handle_line("y");
        assert!(shell.manager().booking("booking_1").is_none());
        assert_eq!(
            presenter.last_notification(),
            Some(("Booking cancelled successfully.".into(), Severity::Success))
        );
    }

    #[test]
    fn cancel_aborts_on_anything_but_yes() {
        let (mut shell, presenter) = shell();
        shell.handle_line("cancel booking_1");
        shell.handle_line("n");
        assert!(shell.manager().booking("booking_1").is_some());
        assert!(presenter.take_events().is_empty());

        // The pending question swallows even command-looking answers.
        shell.handle_line("cancel booking_1");
        shell.handle_line("quit");
        assert!(shell.manager().booking("booking_1").is_some());
        // And that "quit" did not exit the shell.
        assert_eq!(shell.handle_line("rooms"), ShellOutcome::Continue);
    }

    #[test]
    fn quit_ends_the_session() {
        let (mut shell, _presenter) = shell();
        assert_eq!(shell.handle_line("quit"), ShellOutcome::Quit);
    }

    #[test]
    fn unknown_command_changes_nothing() {
        let (mut shell, presenter) = shell();
        assert_eq!(shell.handle_line("frobnicate"), ShellOutcome::Continue);
        assert!(presenter.take_events().is_empty());
        assert_eq!(shell.manager().bookings().len(), 3);
    }

    #[test]
    fn rooms_command_rerenders() {
        let (mut shell, presenter) = shell();
        shell.handle_line("rooms");
        assert_eq!(
            presenter.take_events(),
            vec![PresenterEvent::Rooms {
                shown: vec!["room_1".into()]
            }]
        );
    }

    #[test]
    fn date_and_time_commands_update_the_form() {
        let (mut shell, _presenter) = shell();
        shell.handle_line("date 2024-04-01");
        shell.handle_line("from 10:00");
        shell.handle_line("to 12:30");
        let form = shell.manager().form();
        assert_eq!(form.date, NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(form.start_time.as_deref(), Some("10:00"));
        assert_eq!(form.end_time.as_deref(), Some("12:30"));
    }

    // ── Console formatting helpers ───────────────────────────────

    #[test]
    fn feature_line_truncates_past_three() {
        let features: Vec<String> = ["Projector", "Whiteboard", "AC", "WiFi", "Audio System"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            feature_line(&features),
            "Projector, Whiteboard, AC, +2 more"
        );
        assert_eq!(feature_line(&features[..3]), "Projector, Whiteboard, AC");
        assert_eq!(feature_line(&features[..1]), "Projector");
    }

    #[test]
    fn dates_format_like_the_booking_cards() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(format_date(date), "Sun, Mar 10, 2024");
        let single_digit = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(single_digit), "Tue, Mar 5, 2024");
    }

    #[test]
    fn filter_descriptions() {
        assert_eq!(describe_filter(&RoomFilter::default()), "all rooms");
        assert_eq!(
            describe_filter(&RoomFilter {
                room_type: Some(RoomType::Lab),
                min_capacity: 0
            }),
            "type lab"
        );
        assert_eq!(
            describe_filter(&RoomFilter {
                room_type: Some(RoomType::Lab),
                min_capacity: 30
            }),
            "type lab, capacity >= 30"
        );
    }
}
