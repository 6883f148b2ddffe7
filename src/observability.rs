// ── Booking lifecycle metrics ────────────────────────────────────

/// Counter: bookings confirmed and persisted.
pub const BOOKINGS_CONFIRMED_TOTAL: &str = "aula_bookings_confirmed_total";

/// Counter: bookings cancelled (record removed).
pub const BOOKINGS_CANCELLED_TOTAL: &str = "aula_bookings_cancelled_total";

/// Counter: confirmations rejected by form validation.
pub const VALIDATION_FAILURES_TOTAL: &str = "aula_validation_failures_total";

// ── Persistence metrics ──────────────────────────────────────────

/// Counter: loads that fell back to the sample bookings (first run, storage
/// failure, or an unreadable document).
pub const SEED_FALLBACKS_TOTAL: &str = "aula_seed_fallbacks_total";
