//! Client side of the bulk user import.
//!
//! Reads an administrator's CSV file, validates every row and hands the
//! records to the import service (or simulates the import when no
//! service is configured).

pub mod client;
pub mod csv_source;
pub mod session;
pub mod template;

pub use client::{BackendMode, ImportClient, ImportError, ImportFile};
pub use csv_source::{parse_csv, ParsedCsv};
pub use session::{Session, SessionProvider, SessionUser, StaticSession};
pub use template::{write_template, TEMPLATE_CSV};

#[cfg(any(test, feature = "test-utils"))]
pub use session::MockSessionProvider;
