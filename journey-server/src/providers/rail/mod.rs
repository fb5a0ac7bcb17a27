//! Rail search provider.
//!
//! Both endpoints must resolve to station codes; otherwise the adapter
//! returns nothing. For each of the top trains a dependent seat-availability
//! call is made, concurrently across trains. A failed or empty availability
//! call degrades the train's availability rather than dropping the train.

mod adapter;
mod client;
mod convert;
mod types;

pub use adapter::{RailAdapter, RailAdapterConfig};
pub use client::{RailApi, RailClient, RailClientConfig};
pub use convert::{AvailabilityLookup, convert_train, parse_availability_status};
pub use types::{AvailabilityRow, RawTrain, SeatAvailabilityRequest, TrainSearchRequest};
