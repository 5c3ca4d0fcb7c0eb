pub mod error;
pub mod timestamp;
pub mod user;

pub use error::{DeserializationError, ErrorKind};
pub use timestamp::{OutOfRangeError, ParseError, Timestamp};
pub use user::User;
