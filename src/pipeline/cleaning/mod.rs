//! Transcript normalization and privacy redaction.
//!
//! A deterministic three-stage pipeline over seller-client conversation
//! transcripts:
//!
//! 1. **Fillers** — case-fold and strip hesitations and verbal tics
//!    ("euh", "du coup", "c'est-à-dire"), longer expressions before
//!    single words.
//! 2. **PII masking** — detect emails, French phone numbers, payment
//!    cards, social-insurance numbers and self-introduced names; replace
//!    each with a category marker and record which categories fired.
//! 3. **Grammar** — repair the punctuation the removals left behind,
//!    expand common colloquialisms, restore sentence capitalization.
//!
//! Rule tables are compiled once at first use; a bad pattern panics at
//! startup rather than surfacing per call. The pipeline holds no state,
//! so concurrent callers share nothing but the immutable tables.

pub mod cleaner;
pub mod fillers;
pub mod grammar;
pub mod pii;
pub mod types;

pub use cleaner::clean;
pub use types::{CleaningResult, PiiCategory};
