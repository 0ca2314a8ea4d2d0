//! Deterministic demo-listing generation for the seeding endpoint.
//!
//! The same seed name always produces identical users, events, and
//! registrations, so demo deployments stay reproducible. The crate is
//! independent of backend domain types to avoid circular dependencies:
//! generated values are plain strings and integers that the backend
//! validates on insert.
//!
//! # Example
//!
//! ```
//! let demo = example_data::generate_demo_data("kickoff", 3)?;
//! assert_eq!(demo.events.len(), 3);
//!
//! // Same seed, same data.
//! let again = example_data::generate_demo_data("kickoff", 3)?;
//! assert_eq!(demo, again);
//! # Ok::<(), example_data::GenerationError>(())
//! ```

mod error;
mod generator;

pub use error::GenerationError;
pub use generator::{generate_demo_data, DemoData, DemoEvent, DemoRegistration, DemoUser};
