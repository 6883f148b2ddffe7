use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::rc::Rc;

use chrono::{Days, NaiveDateTime};
use tracing::{debug, warn};

use crate::model::{Booking, BookingStatus, RoomType};

/// The single document key bookings persist under. Inherited from the
/// storage area of earlier releases; renaming it would orphan every
/// existing document.
pub const BOOKINGS_KEY: &str = "apiit_bookings";

// ── Storage capability ───────────────────────────────────────────

#[derive(Debug)]
pub struct StorageError(pub String);

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "storage: {}", self.0)
    }
}

impl std::error::Error for StorageError {}

/// Narrow persistence capability: serialized text by string key.
/// `get` distinguishes an absent key (`Ok(None)`) from a failed read.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Shared in-memory storage area. Clones are handles onto the same map, so
/// a handle kept outside the manager observes writes made through the
/// manager's handle. Also the storage double for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage: one `<key>.json` file per key under a data
/// directory. Writes go through a temp file and rename so a crash never
/// leaves a partial document behind.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens the store, creating the data directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| StorageError(format!("create {}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys become filenames; strip anything that could escape the dir.
        let safe: String = key
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError(format!("read {}: {e}", path.display()))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        let write = || -> io::Result<()> {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            fs::rename(&tmp_path, &path)
        };
        write().map_err(|e| StorageError(format!("write {}: {e}", path.display())))
    }
}

// ── Bookings gateway ─────────────────────────────────────────────

/// Load the persisted bookings collection. A storage failure, an absent
/// key, and an undecodable document all fall back to [`sample_bookings`];
/// nothing here is fatal. Loading never touches room statuses.
pub fn load_bookings<S: Storage>(storage: &S, now: NaiveDateTime) -> Vec<Booking> {
    match storage.get(BOOKINGS_KEY) {
        Ok(Some(text)) => match serde_json::from_str::<Vec<Booking>>(&text) {
            Ok(bookings) => bookings,
            Err(e) => {
                warn!(error = %e, "stored bookings unreadable, reseeding samples");
                metrics::counter!(crate::observability::SEED_FALLBACKS_TOTAL).increment(1);
                sample_bookings(now)
            }
        },
        Ok(None) => {
            debug!("no stored bookings, seeding samples");
            metrics::counter!(crate::observability::SEED_FALLBACKS_TOTAL).increment(1);
            sample_bookings(now)
        }
        Err(e) => {
            warn!(error = %e, "bookings load failed, reseeding samples");
            metrics::counter!(crate::observability::SEED_FALLBACKS_TOTAL).increment(1);
            sample_bookings(now)
        }
    }
}

/// Persist the whole collection as one JSON array document. Best effort:
/// a failed save is logged and swallowed, the in-memory collection stays
/// authoritative for the session.
pub fn save_bookings<S: Storage>(storage: &mut S, bookings: &[Booking]) {
    let text = match serde_json::to_string(bookings) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "bookings serialize failed, keeping in-memory only");
            return;
        }
    };
    if let Err(e) = storage.set(BOOKINGS_KEY, &text) {
        warn!(error = %e, "bookings save failed, keeping in-memory only");
    }
}

/// The three sample bookings seeded when the store is empty or unreadable.
/// Statuses are literal, never derived: the auditorium booking starts at
/// 08:00 today and ships as active whatever the clock says.
pub fn sample_bookings(now: NaiveDateTime) -> Vec<Booking> {
    let today = now.date();
    let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
    vec![
        Booking {
            id: "booking_1".into(),
            room_id: "room_1".into(),
            room_name: "A2.01".into(),
            room_type: RoomType::Classroom,
            date: today,
            start_time: "09:00".into(),
            end_time: "11:00".into(),
            status: BookingStatus::Upcoming,
            created_at: now,
        },
        Booking {
            id: "booking_2".into(),
            room_id: "room_5".into(),
            room_name: "B3.05".into(),
            room_type: RoomType::Lab,
            date: tomorrow,
            start_time: "14:00".into(),
            end_time: "16:00".into(),
            status: BookingStatus::Upcoming,
            created_at: now,
        },
        Booking {
            id: "booking_3".into(),
            room_id: "room_10".into(),
            room_name: "C1.10".into(),
            room_type: RoomType::Auditorium,
            date: today,
            start_time: "08:00".into(),
            end_time: "09:00".into(),
            status: BookingStatus::Active,
            created_at: now,
        },
    ]
}
