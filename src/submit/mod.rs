//! Delivery of a finished form to the external collector.

mod challenge;
mod error;
mod transport;

pub use challenge::{ChallengeError, ChallengeProvider, CommandChallenge, obtain_token};
pub use error::SubmitError;
pub use transport::{HttpTransport, Submission, Transport};
