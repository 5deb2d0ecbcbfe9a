//! Job-hunt workflows: listing imports, match evaluation, and negotiation.

pub mod matching;
pub mod negotiation;
pub mod profesia;
