//! Data carried between the session, the sender and the interpreter

pub mod envelope;

pub use envelope::{IdClock, RequestEnvelope, ResponseEnvelope, unix_micros_now};
