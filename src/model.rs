use std::ops::RangeInclusive;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Fixed vocabulary the catalog draws room features from.
pub const FEATURE_VOCABULARY: [&str; 6] = [
    "Projector",
    "Whiteboard",
    "AC",
    "WiFi",
    "Audio System",
    "Video Conferencing",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Classroom,
    Lab,
    Auditorium,
}

impl RoomType {
    pub const ALL: [RoomType; 3] = [RoomType::Classroom, RoomType::Lab, RoomType::Auditorium];

    /// Inclusive capacity range for rooms of this type.
    pub fn capacity_range(&self) -> RangeInclusive<u32> {
        match self {
            RoomType::Classroom => 20..=50,
            RoomType::Lab => 15..=35,
            RoomType::Auditorium => 100..=300,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Classroom => "classroom",
            RoomType::Lab => "lab",
            RoomType::Auditorium => "auditorium",
        }
    }

    pub fn parse(s: &str) -> Option<RoomType> {
        match s {
            "classroom" => Some(RoomType::Classroom),
            "lab" => Some(RoomType::Lab),
            "auditorium" => Some(RoomType::Auditorium),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary occupancy flag. A room is a single slot, not a calendar of
/// reserved intervals: one confirmed booking occupies the whole room, and
/// cancelling any booking for it frees it again. Known model limitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Available,
    Occupied,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable room. Seeded once at startup by the catalog; every field except
/// `status` is immutable afterwards. Rooms are never persisted, the next
/// start reseeds them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub kind: RoomType,
    pub capacity: u32,
    /// 2 to 5 distinct entries from [`FEATURE_VOCABULARY`].
    pub features: Vec<String>,
    pub status: RoomStatus,
    pub location: String,
}

/// Label computed from the clock against the booking start and assigned at
/// confirmation (or literally, for seed data), never re-derived afterwards.
/// There is no completed state: a booking whose end has passed stays
/// `Active` until it is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Upcoming,
    Active,
    /// Vestigial: cancellation removes the record outright, so this value is
    /// never written. It stays so foreign documents containing it still
    /// parse and so [`active_count`] has something to exclude.
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Upcoming => "upcoming",
            BookingStatus::Active => "active",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A confirmed reservation. `room_id` is a weak reference; `room_name` and
/// `room_type` are snapshots of the room at booking time. Records are never
/// mutated in place: cancellation removes them entirely.
///
/// Serializes with camelCase keys so the persisted document keeps the shape
/// the storage key has always held. Times stay zero-padded "HH:MM" strings
/// whose ordering contract is plain lexical comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub room_id: String,
    pub room_name: String,
    pub room_type: RoomType,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

/// Status rule: strictly-future start instant means `Upcoming`, anything
/// else (including a start that cannot be parsed, e.g. a "24:00" default)
/// means `Active`.
pub fn derive_status(date: NaiveDate, start_time: &str, now: NaiveDateTime) -> BookingStatus {
    match NaiveTime::parse_from_str(start_time, "%H:%M") {
        Ok(start) if date.and_time(start) > now => BookingStatus::Upcoming,
        _ => BookingStatus::Active,
    }
}

/// Count of non-cancelled bookings, the figure the bookings panel reports.
/// In practice this equals the collection length (see [`BookingStatus::Cancelled`]).
pub fn active_count(bookings: &[Booking]) -> usize {
    bookings
        .iter()
        .filter(|b| b.status != BookingStatus::Cancelled)
        .count()
}

// ── Widget state ─────────────────────────────────────────────────

/// Active room filter: optional type plus a minimum capacity threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomFilter {
    pub room_type: Option<RoomType>,
    pub min_capacity: u32,
}

/// The booking input fields. `None` means the field is empty; confirmation
/// requires all three.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// A booking in progress: the room chosen for the open detail view, not yet
/// confirmed or persisted. Snapshots the room for the denormalized fields a
/// confirmed [`Booking`] carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub room: Room,
}
