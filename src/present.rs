use crate::model::{Booking, BookingDraft, BookingForm, Room, RoomFilter, active_count};

/// Notification severity, rendered as a tag by console presenters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Push-only render sink. The manager pushes full snapshots after every
/// mutation; implementations never call back into the manager and hold no
/// booking state of their own. `show_booking`/`close_booking` bracket the
/// booking detail view on which a draft is confirmed or abandoned.
pub trait Presentation {
    fn render_rooms(&mut self, rooms: &[Room], filter: &RoomFilter);
    fn render_bookings(&mut self, bookings: &[Booking]);
    fn show_booking(&mut self, draft: &BookingDraft, form: &BookingForm);
    fn close_booking(&mut self);
    fn notify(&mut self, message: &str, severity: Severity);
}

// ── Recording sink ───────────────────────────────────────────────

/// One captured presentation push. Collections are reduced to ids so
/// assertions stay readable; the active count mirrors what the bookings
/// panel would display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Rooms { shown: Vec<String> },
    Bookings { shown: Vec<String>, active: usize },
    ShowBooking { room_id: String },
    CloseBooking,
    Notify { message: String, severity: Severity },
}

/// Presenter that records every push instead of rendering. Cloning returns a
/// handle onto the same event log, so a probe kept outside the manager sees
/// everything pushed after the manager took ownership of its clone.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    events: std::rc::Rc<std::cell::RefCell<Vec<PresenterEvent>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events.borrow().clone()
    }

    /// Drains the log, returning everything pushed since the last call.
    pub fn take_events(&self) -> Vec<PresenterEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn last_notification(&self) -> Option<(String, Severity)> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            PresenterEvent::Notify { message, severity } => {
                Some((message.clone(), *severity))
            }
            _ => None,
        })
    }
}

impl Presentation for RecordingPresenter {
    fn render_rooms(&mut self, rooms: &[Room], _filter: &RoomFilter) {
        self.events.borrow_mut().push(PresenterEvent::Rooms {
            shown: rooms.iter().map(|r| r.id.clone()).collect(),
        });
    }

    fn render_bookings(&mut self, bookings: &[Booking]) {
        self.events.borrow_mut().push(PresenterEvent::Bookings {
            shown: bookings.iter().map(|b| b.id.clone()).collect(),
            active: active_count(bookings),
        });
    }

    fn show_booking(&mut self, draft: &BookingDraft, _form: &BookingForm) {
        self.events.borrow_mut().push(PresenterEvent::ShowBooking {
            room_id: draft.room.id.clone(),
        });
    }

    fn close_booking(&mut self) {
        self.events.borrow_mut().push(PresenterEvent::CloseBooking);
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        self.events.borrow_mut().push(PresenterEvent::Notify {
            message: message.to_string(),
            severity,
        });
    }
}
