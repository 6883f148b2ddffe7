use crate::model::{Room, RoomFilter};

// ── Room filtering ───────────────────────────────────────────────

/// Apply the filter: keep rooms whose type matches (no type set matches
/// everything) and whose capacity meets the threshold. Pure; an empty
/// result is a normal value, not an error.
pub fn filter_rooms(rooms: &[Room], filter: &RoomFilter) -> Vec<Room> {
    rooms
        .iter()
        .filter(|room| filter.room_type.is_none_or(|t| room.kind == t))
        .filter(|room| room.capacity >= filter.min_capacity)
        .cloned()
        .collect()
}

/// Map a raw capacity input to a threshold. Absent or non-numeric input
/// means no threshold, i.e. zero.
pub fn parse_min_capacity(input: &str) -> u32 {
    input.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RoomStatus, RoomType};

    fn room(id: &str, kind: RoomType, capacity: u32) -> Room {
        Room {
            id: id.into(),
            name: format!("A1.{id}"),
            kind,
            capacity,
            features: vec!["WiFi".into(), "AC".into()],
            status: RoomStatus::Available,
            location: "Building A, Floor 1".into(),
        }
    }

    fn sample() -> Vec<Room> {
        vec![
            room("1", RoomType::Classroom, 30),
            room("2", RoomType::Lab, 20),
            room("3", RoomType::Auditorium, 150),
            room("4", RoomType::Classroom, 45),
        ]
    }

    #[test]
    fn no_filter_keeps_everything_in_order() {
        let rooms = sample();
        let out = filter_rooms(&rooms, &RoomFilter::default());
        assert_eq!(out, rooms);
    }

    #[test]
    fn type_filter() {
        let rooms = sample();
        let filter = RoomFilter {
            room_type: Some(RoomType::Classroom),
            min_capacity: 0,
        };
        let out = filter_rooms(&rooms, &filter);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.kind == RoomType::Classroom));
    }

    #[test]
    fn capacity_filter_is_inclusive() {
        let rooms = sample();
        let filter = RoomFilter {
            room_type: None,
            min_capacity: 30,
        };
        let out = filter_rooms(&rooms, &filter);
        let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
        // capacity >= 30, so the 30-seat room stays.
        assert_eq!(ids, ["1", "3", "4"]);
    }

    #[test]
    fn both_criteria_combine_with_and() {
        let rooms = sample();
        let filter = RoomFilter {
            room_type: Some(RoomType::Classroom),
            min_capacity: 40,
        };
        let out = filter_rooms(&rooms, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "4");
    }

    #[test]
    fn empty_result_is_normal() {
        let rooms = sample();
        let filter = RoomFilter {
            room_type: Some(RoomType::Lab),
            min_capacity: 500,
        };
        assert!(filter_rooms(&rooms, &filter).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let rooms = sample();
        let filter = RoomFilter {
            room_type: Some(RoomType::Classroom),
            min_capacity: 25,
        };
        let once = filter_rooms(&rooms, &filter);
        let twice = filter_rooms(&once, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn raising_capacity_never_grows_the_result() {
        let rooms = sample();
        let mut previous = usize::MAX;
        for min_capacity in [0, 10, 20, 30, 100, 200, 1000] {
            let filter = RoomFilter {
                room_type: None,
                min_capacity,
            };
            let count = filter_rooms(&rooms, &filter).len();
            assert!(count <= previous, "min_capacity {min_capacity} grew the result");
            previous = count;
        }
    }

    #[test]
    fn min_capacity_parsing() {
        assert_eq!(parse_min_capacity("30"), 30);
        assert_eq!(parse_min_capacity("  25 "), 25);
        assert_eq!(parse_min_capacity(""), 0);
        assert_eq!(parse_min_capacity("abc"), 0);
        assert_eq!(parse_min_capacity("-5"), 0);
        assert_eq!(parse_min_capacity("12.5"), 0);
    }
}
