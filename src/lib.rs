//! NameSilo DNS record management client.
//!
//! A thin adapter that exposes generic list/append/set/delete record
//! operations over NameSilo's HTTP/XML API. Records are modelled as a
//! closed set of variants ([`Record`]); anything the vendor returns that
//! cannot be represented precisely travels as [`Record::Other`] so that a
//! later delete still matches it byte-for-byte.
//!
//! All per-record work inside one operation is issued strictly one request
//! at a time (NameSilo is rate-limit sensitive). Operations are not
//! transactional: a mid-loop failure surfaces as a [`PartialError`]
//! carrying the records that were already applied. Dropping a returned
//! future abandons the in-flight request.
//!
//! ```no_run
//! use namesilo_dns::Provider;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Provider::with_token("my-api-token")?;
//! for record in provider.list_records("example.com").await? {
//!     println!("{} {} {}", record.name(), record.rtype(), record.data());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod provider;
pub mod record;
mod wire;

pub use error::{Error, PartialError};
pub use provider::{Config, Provider, DEFAULT_ENDPOINT};
pub use record::Record;
