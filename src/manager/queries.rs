use crate::clock::Clock;
use crate::model::{self, Booking, BookingDraft, BookingForm, Room, RoomFilter};
use crate::present::Presentation;
use crate::store::Storage;

use super::{BookingManager, filter};

impl<S: Storage, C: Clock, P: Presentation> BookingManager<S, C, P> {
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// The rooms the current filter lets through, in catalog order.
    pub fn visible_rooms(&self) -> Vec<Room> {
        filter::filter_rooms(&self.rooms, &self.filter)
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn booking(&self, booking_id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == booking_id)
    }

    /// What the bookings panel reports as "N active booking(s)".
    pub fn active_count(&self) -> usize {
        model::active_count(&self.bookings)
    }

    pub fn filter(&self) -> &RoomFilter {
        &self.filter
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn draft(&self) -> Option<&BookingDraft> {
        self.draft.as_ref()
    }
}
