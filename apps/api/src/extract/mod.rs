// PDF upload → plain text, so callers can feed the result to the review endpoints.

pub mod handlers;
pub mod pdf;
