use tracing::{debug, info};
use ulid::Ulid;

use crate::clock::Clock;
use crate::model::{Booking, BookingDraft, RoomStatus, derive_status};
use crate::present::{Presentation, Severity};
use crate::store::Storage;

use super::{BookingError, BookingManager};

impl<S: Storage, C: Clock, P: Presentation> BookingManager<S, C, P> {
    /// Open the booking view on a room. Unknown or occupied rooms are a
    /// silent no-op; otherwise the room is snapshotted into the draft and
    /// the detail view is pushed with the current form values. Opening over
    /// an existing draft replaces it.
    pub fn open_booking(&mut self, room_id: &str) {
        let Some(room) = self.rooms.iter().find(|r| r.id == room_id) else {
            debug!(room_id, "open skipped: unknown room");
            return;
        };
        if room.status == RoomStatus::Occupied {
            debug!(room_id, "open skipped: room occupied");
            return;
        }
        let draft = BookingDraft { room: room.clone() };
        self.presenter.show_booking(&draft, &self.form);
        self.draft = Some(draft);
    }

    /// Abandon the draft, if any, and close the detail view. The close push
    /// goes out even when nothing was open.
    pub fn close_booking(&mut self) {
        self.presenter.close_booking();
        self.draft = None;
    }

    /// Turn the draft plus form into a persisted booking. Without a draft
    /// this is a silent no-op. Validation failures notify the user, return
    /// the error, and leave every collection untouched. On success the
    /// record is appended and saved, the room goes occupied, the draft
    /// closes, and the success notification goes out, in that order.
    pub fn confirm_booking(&mut self) -> Result<(), BookingError> {
        let Some(draft) = self.draft.clone() else {
            debug!("confirm skipped: no booking open");
            return Ok(());
        };

        let (date, start, end) = match (
            self.form.date,
            self.form.start_time.as_deref(),
            self.form.end_time.as_deref(),
        ) {
            (Some(d), Some(s), Some(e)) if !s.is_empty() && !e.is_empty() => {
                (d, s.to_string(), e.to_string())
            }
            _ => {
                metrics::counter!(crate::observability::VALIDATION_FAILURES_TOTAL).increment(1);
                self.presenter
                    .notify("Please fill in all date and time fields.", Severity::Error);
                return Err(BookingError::MissingDateTime);
            }
        };
        // Zero-padded "HH:MM" makes lexical order time order.
        if start >= end {
            metrics::counter!(crate::observability::VALIDATION_FAILURES_TOTAL).increment(1);
            self.presenter
                .notify("End time must be after start time.", Severity::Error);
            return Err(BookingError::EndNotAfterStart);
        }

        let now = self.clock.now();
        let status = derive_status(date, &start, now);
        let booking = Booking {
            id: format!("booking_{}", Ulid::new()),
            room_id: draft.room.id.clone(),
            room_name: draft.room.name.clone(),
            room_type: draft.room.kind,
            date,
            start_time: start,
            end_time: end,
            status,
            created_at: now,
        };
        info!(booking = %booking.id, room = %booking.room_id, %status, "booking confirmed");
        metrics::counter!(crate::observability::BOOKINGS_CONFIRMED_TOTAL).increment(1);

        self.bookings.push(booking);
        self.persist();
        self.render_bookings();
        self.set_room_status(&draft.room.id, RoomStatus::Occupied);
        self.render_rooms();
        self.close_booking();
        self.presenter
            .notify("Room booked successfully!", Severity::Success);
        Ok(())
    }

    /// Remove a booking outright and free its room. The caller is expected
    /// to have asked the user first; an unknown id is a silent no-op with
    /// no notification. Frees the room even if other bookings reference it.
    pub fn cancel_booking(&mut self, booking_id: &str) {
        let Some(index) = self.bookings.iter().position(|b| b.id == booking_id) else {
            debug!(booking_id, "cancel skipped: unknown booking");
            return;
        };
        let room_id = self.bookings[index].room_id.clone();
        self.set_room_status(&room_id, RoomStatus::Available);
        self.bookings.remove(index);
        info!(booking = booking_id, room = %room_id, "booking cancelled");
        metrics::counter!(crate::observability::BOOKINGS_CANCELLED_TOTAL).increment(1);

        self.persist();
        self.render_bookings();
        self.render_rooms();
        self.presenter
            .notify("Booking cancelled successfully.", Severity::Success);
    }

    /// Copy a booking's date and times forward into the form so a new
    /// search starts from them. The record itself is untouched; this is not
    /// an in-place edit. Unknown id: silent no-op.
    pub fn edit_booking(&mut self, booking_id: &str) {
        let Some(booking) = self.bookings.iter().find(|b| b.id == booking_id) else {
            debug!(booking_id, "edit skipped: unknown booking");
            return;
        };
        self.form.date = Some(booking.date);
        self.form.start_time = Some(booking.start_time.clone());
        self.form.end_time = Some(booking.end_time.clone());
        self.presenter.notify(
            "Booking details loaded. Modify the time and search for available rooms.",
            Severity::Info,
        );
    }

    /// Re-run the room render for the current filter and tell the user a
    /// search happened. Filtering never depends on the form's date or
    /// times; occupancy is the only availability there is.
    pub fn search_rooms(&mut self) {
        self.render_rooms();
        self.presenter
            .notify("Searching for available rooms...", Severity::Info);
    }
}
