mod error;
mod filter;
mod lifecycle;
mod queries;

pub use error::BookingError;
pub use filter::{filter_rooms, parse_min_capacity};

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::clock::Clock;
use crate::model::{Booking, BookingDraft, BookingForm, Room, RoomFilter, RoomStatus};
use crate::present::Presentation;
use crate::store::{self, Storage};

/// The booking widget core. Owns the two collections (rooms, bookings) plus
/// the filter, form, and draft, and keeps them consistent under direct user
/// mutation; every collection change is followed by a persist and a render
/// push. One instance per session, explicitly owned by the entry point.
///
/// All operations are synchronous and run to completion on the caller's
/// thread; the presenter only ever receives pushes from inside them.
pub struct BookingManager<S, C, P> {
    rooms: Vec<Room>,
    bookings: Vec<Booking>,
    filter: RoomFilter,
    form: BookingForm,
    draft: Option<BookingDraft>,
    storage: S,
    clock: C,
    presenter: P,
}

impl<S: Storage, C: Clock, P: Presentation> BookingManager<S, C, P> {
    /// Builds the session: loads persisted bookings (falling back to the
    /// samples), pre-fills the form from the clock, then pushes the initial
    /// room and booking renders. Room statuses are whatever the seeded
    /// catalog says; loading bookings never touches them.
    pub fn new(rooms: Vec<Room>, storage: S, clock: C, presenter: P) -> Self {
        let now = clock.now();
        let bookings = store::load_bookings(&storage, now);
        let mut manager = Self {
            rooms,
            bookings,
            filter: RoomFilter::default(),
            form: default_form(now),
            draft: None,
            storage,
            clock,
            presenter,
        };
        manager.render_rooms();
        manager.render_bookings();
        manager
    }

    // ── Filter and form inputs ───────────────────────────────────

    pub fn set_filter(&mut self, filter: RoomFilter) {
        self.filter = filter;
        self.render_rooms();
    }

    pub fn set_form_date(&mut self, date: Option<NaiveDate>) {
        self.form.date = date;
        self.render_rooms();
    }

    pub fn set_form_start(&mut self, start: Option<String>) {
        self.form.start_time = start;
        self.render_rooms();
    }

    pub fn set_form_end(&mut self, end: Option<String>) {
        self.form.end_time = end;
        self.render_rooms();
    }

    // ── Shared helpers ───────────────────────────────────────────

    /// Push the filtered room list to the presenter (again).
    pub fn render_rooms(&mut self) {
        let visible = filter::filter_rooms(&self.rooms, &self.filter);
        self.presenter.render_rooms(&visible, &self.filter);
    }

    /// Push the bookings list to the presenter (again).
    pub fn render_bookings(&mut self) {
        self.presenter.render_bookings(&self.bookings);
    }

    pub(super) fn persist(&mut self) {
        store::save_bookings(&mut self.storage, &self.bookings);
    }

    /// Flip a room's occupancy. The id may be dangling (a booking can
    /// outlive its room across reseeds); then this does nothing.
    pub(super) fn set_room_status(&mut self, room_id: &str, status: RoomStatus) {
        if let Some(room) = self.rooms.iter_mut().find(|r| r.id == room_id) {
            room.status = status;
        }
    }
}

/// Form defaults: today, next full hour through the hour after. There is no
/// wrap at midnight: a 23:xx clock yields "24:00"/"25:00", still lexically
/// ordered but never parseable as a future instant, so confirming such a
/// booking makes it active.
fn default_form(now: NaiveDateTime) -> BookingForm {
    let hour = now.hour();
    BookingForm {
        date: Some(now.date()),
        start_time: Some(format!("{:02}:00", hour + 1)),
        end_time: Some(format!("{:02}:00", hour + 2)),
    }
}
