//! Login Counter Common Types
//!
//! Shared types used by the login recorder, the column extension points and
//! the host harness.

pub mod columns;
pub mod event;
pub mod timestamp;
pub mod user;

pub use columns::{Columns, LAST_LOGIN_KEY, LOGIN_COUNT_KEY};
pub use event::LoginEvent;
pub use timestamp::{format_timestamp, parse_timestamp, TIMESTAMP_FORMAT};
pub use user::{UserId, UserLoginMetric, UserRef};
