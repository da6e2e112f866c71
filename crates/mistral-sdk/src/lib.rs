//! # Mistral SDK
//!
//! An async Rust client for the Mistral AI API.
//!
//! ## Features
//!
//! - Async-first design on `tokio`
//! - Streaming chat, agent and FIM responses as [`futures::Stream`]s
//! - Batch jobs with a cancellable completion poller
//! - Typed requests and responses for every endpoint
//! - Builder pattern for configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mistral_sdk::{ChatCompletionRequest, Client, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mistral_sdk::Error> {
//!     let client = Client::new("your-api-key")?;
//!
//!     let request = ChatCompletionRequest::new(
//!         "mistral-small-latest",
//!         vec![Message::user("Hello, world!")],
//!     );
//!     let response = client.chat().create(&request).await?;
//!
//!     println!("Response: {}", response.content());
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use mistral_sdk::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mistral_sdk::Error> {
//!     let client = Client::from_env()?;
//!
//!     let mut stream = client
//!         .chat()
//!         .builder()
//!         .model("mistral-small-latest")
//!         .user_message("Tell me a story")
//!         .stream()
//!         .await?;
//!
//!     while let Some(chunk) = stream.next().await {
//!         match chunk {
//!             Ok(chunk) => print!("{}", chunk.content()),
//!             Err(e) => eprintln!("Error: {}", e),
//!         }
//!     }
//!     stream.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Batch jobs
//!
//! ```rust,no_run
//! use mistral_sdk::{CancelSignal, Client, PollConfig, PollOutcome};
//! use std::time::Duration;
//!
//! # async fn example(client: &Client, batch_id: &str) -> Result<(), mistral_sdk::Error> {
//! let cancel = CancelSignal::new();
//! let config = PollConfig::new()
//!     .with_interval(Duration::from_secs(5))
//!     .with_cancel(cancel.clone());
//!
//! match client.batch().wait_for_completion_with(batch_id, config).await? {
//!     PollOutcome::Completed(job) => println!("{} succeeded", job.summary.succeeded),
//!     PollOutcome::Cancelled { reason } => println!("stopped waiting: {reason}"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod client;
mod config;
mod error;
pub mod poller;
pub mod services;
pub mod streaming;
pub mod types;

pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, API_KEY_ENV, BASE_URL_ENV};
pub use error::{Error, Result};
pub use poller::{BatchPoller, CancelSignal, JobStatusFetcher, PollConfig, PollOutcome};
pub use streaming::{AgentStream, ChatStream, EventStream, FimStream, StreamResult, StreamState};
pub use types::*;
