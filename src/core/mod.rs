pub mod clock;
pub mod encoding;
pub mod error;
pub mod timezone;

pub use clock::{Clock, MockClock, SystemClock};
pub use error::{AppError, Result};
