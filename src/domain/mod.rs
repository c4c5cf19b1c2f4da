//! Domain layer - Core business entities and logic
//!
//! Import records and their validation rules, identities, profiles and
//! import results. Independent of HTTP and storage concerns.

pub mod identity;
pub mod import;
pub mod outcome;
pub mod profile;

pub use identity::{Identity, IdentityMetadata, NewIdentity};
pub use import::{FieldError, ImportUserInput, ImportUserRecord, RawRow, UserRole, ValidationError};
pub use outcome::{ImportOutcome, ImportSummary, ImportTally, RecordError, Resolution};
pub use profile::{Profile, ProfileUpdate};
