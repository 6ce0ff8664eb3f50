//! Upload planning: parts, subparts and their stream openers.
//!
//! A planned upload is an ordered list of [`UploadPart`]s; each part
//! chains one or more [`Subpart`]s into the byte stream for a single
//! physical upload call. Planning touches no source bytes; data passes
//! happen only when identities or bodies are requested.

mod part;
mod planner;
mod subpart;

pub use part::UploadPart;
pub use planner::{UploadPlan, plan_concatenation, plan_upload};
pub use subpart::Subpart;
