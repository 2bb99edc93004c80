//! Clinic Billing Client SDK.
//!
//! This crate lets a gateway service fetch billing records from the billing
//! service, located through a [`ServiceResolver`] rather than a fixed
//! address. Records are streamed back lazily: each one is decoded as its
//! bytes arrive, and dropping the stream cancels the in-flight request.
//!
//! # Example
//!
//! ```no_run
//! use clinic_billing_client::{BillingClient, StaticResolver};
//! use clinic_billing_core::Priority;
//! use futures::TryStreamExt;
//!
//! # async fn example() -> Result<(), clinic_billing_client::ClientError> {
//! let resolver = StaticResolver::new().with_service(
//!     "billing-service",
//!     "http://billing.clinic.svc:8080".parse().unwrap(),
//! );
//! let client = BillingClient::new(resolver);
//!
//! let mut billings = client.fetch_billings_by_priority(&Priority::high()).await?;
//! while let Some(record) = billings.try_next().await? {
//!     println!("billing {} ({})", record.id, record.priority);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod decode;
mod error;
mod resolver;
mod stream;

pub use client::{BillingClient, ClientOptions};
pub use error::{ClientError, DecodeError, TransportError};
pub use resolver::{ServiceResolver, StaticResolver};
pub use stream::RecordStream;

pub use clinic_billing_core::{BillingRecord, Priority};
