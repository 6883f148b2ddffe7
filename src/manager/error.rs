#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingError {
    /// Confirmation needs date, start, and end all filled in.
    MissingDateTime,
    /// Start must sort lexically before end.
    EndNotAfterStart,
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::MissingDateTime => {
                write!(f, "date, start time and end time are all required")
            }
            BookingError::EndNotAfterStart => write!(f, "end time must be after start time"),
        }
    }
}

impl std::error::Error for BookingError {}
