pub mod envelope;

pub use envelope::{success, Envelope, EnvelopeStatus, ENVELOPE_STATUS_HEADER};
