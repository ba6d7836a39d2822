//! Job submission: multipart intake, validation, and the aggregated response
//! view built from one scoring-backend round trip.

pub mod handlers;
pub mod validate;
