use rand::Rng;
use rand::seq::IndexedRandom;

use crate::model::{FEATURE_VOCABULARY, Room, RoomStatus, RoomType};

/// Size of the seeded catalog.
pub const ROOM_COUNT: usize = 20;

const BUILDINGS: [char; 4] = ['A', 'B', 'C', 'D'];
const FLOORS: std::ops::RangeInclusive<u32> = 1..=5;

/// Fraction of rooms seeded as available rather than occupied.
const AVAILABLE_SEED_RATIO: f64 = 0.7;

// ── Catalog seeding ──────────────────────────────────────────────

/// Seed the room catalog: [`ROOM_COUNT`] rooms with sequential `room_<n>`
/// ids and randomized everything else. Capacity is drawn from the range of
/// the room's actual type; the name and location agree on building and
/// floor. Roughly 70% of rooms start available.
pub fn generate_rooms<R: Rng + ?Sized>(rng: &mut R) -> Vec<Room> {
    (1..=ROOM_COUNT).map(|n| generate_room(rng, n)).collect()
}

fn generate_room<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Room {
    let kind = *RoomType::ALL
        .choose(rng)
        .unwrap_or(&RoomType::Classroom);
    let building = *BUILDINGS.choose(rng).unwrap_or(&'A');
    let floor = rng.random_range(FLOORS);
    let capacity = rng.random_range(kind.capacity_range());

    let feature_count = rng.random_range(2..=5);
    let features: Vec<String> = FEATURE_VOCABULARY
        .choose_multiple(rng, feature_count)
        .map(|f| f.to_string())
        .collect();

    let status = if rng.random_bool(AVAILABLE_SEED_RATIO) {
        RoomStatus::Available
    } else {
        RoomStatus::Occupied
    };

    Room {
        id: format!("room_{n}"),
        name: format!("{building}{floor}.{n:02}"),
        kind,
        capacity,
        features,
        status,
        location: format!("Building {building}, Floor {floor}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn seeds_twenty_rooms_with_sequential_ids() {
        let mut rng = StdRng::seed_from_u64(7);
        let rooms = generate_rooms(&mut rng);
        assert_eq!(rooms.len(), ROOM_COUNT);
        for (i, room) in rooms.iter().enumerate() {
            assert_eq!(room.id, format!("room_{}", i + 1));
        }
    }

    #[test]
    fn capacity_matches_room_type() {
        // Many seeds so every type shows up plenty of times.
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            for room in generate_rooms(&mut rng) {
                assert!(
                    room.kind.capacity_range().contains(&room.capacity),
                    "{} capacity {} outside range for {}",
                    room.id,
                    room.capacity,
                    room.kind
                );
            }
        }
    }

    #[test]
    fn features_are_distinct_and_from_vocabulary() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for room in generate_rooms(&mut rng) {
                assert!((2..=5).contains(&room.features.len()), "{}", room.id);
                let mut seen = std::collections::HashSet::new();
                for f in &room.features {
                    assert!(FEATURE_VOCABULARY.contains(&f.as_str()));
                    assert!(seen.insert(f), "duplicate feature in {}", room.id);
                }
            }
        }
    }

    #[test]
    fn name_and_location_agree() {
        let mut rng = StdRng::seed_from_u64(3);
        for (i, room) in generate_rooms(&mut rng).iter().enumerate() {
            let mut chars = room.name.chars();
            let building = chars.next().unwrap();
            let floor = chars.next().unwrap();
            assert!(BUILDINGS.contains(&building), "{}", room.name);
            assert!(('1'..='5').contains(&floor), "{}", room.name);
            assert_eq!(chars.next(), Some('.'));
            let number: String = chars.collect();
            assert_eq!(number, format!("{:02}", i + 1));
            assert_eq!(room.location, format!("Building {building}, Floor {floor}"));
        }
    }

    #[test]
    fn seeds_roughly_seventy_percent_available() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut available = 0usize;
        let mut total = 0usize;
        for _ in 0..50 {
            for room in generate_rooms(&mut rng) {
                total += 1;
                if room.status == RoomStatus::Available {
                    available += 1;
                }
            }
        }
        let ratio = available as f64 / total as f64;
        assert!((0.5..0.9).contains(&ratio), "availability ratio {ratio}");
    }
}
