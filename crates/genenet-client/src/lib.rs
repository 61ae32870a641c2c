//! genenet-client — Talks to a genenet analysis server.
//!
//! Two calls, no retries:
//!   - [`GeneNetClient::status`] checks which reference datasets the server has loaded
//!   - [`GeneNetClient::upload`] submits a genes sheet and waits for the graph
//!
//! # Example
//!
//! ```rust,no_run
//! use genenet_client::{GeneNetClient, UploadOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = GeneNetClient::new("http://127.0.0.1:8000")?;
//!     if client.status().await?.is_ready() {
//!         let opts = UploadOptions { threshold: Some(0.3), num: Some(5) };
//!         let graph = client.upload("hits.xlsx".as_ref(), &opts).await?;
//!         println!("{}", genenet_client::GraphSummary::from(&graph));
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod summary;

pub use client::{GeneNetClient, UploadOptions};
pub use error::ClientError;
pub use summary::GraphSummary;
