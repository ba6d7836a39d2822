//! The result-aggregation core: pure transformations from a scoring-backend
//! payload to a ranked, summarized, exportable view. No I/O happens here.

pub mod aggregate;
pub mod combine;
pub mod explain;
pub mod export;
pub mod models;
