//! A JSON user record with tri-state optional fields, the JSON Typedef
//! schema it is generated from, and a validator that reports portable
//! errors against that schema.
pub mod config;
pub mod logging;
pub mod schema;
pub mod types;
pub mod util;

pub use types::User;
