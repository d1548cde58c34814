//! Redis Streams plumbing.
//!
//! A stream is described once with [`StreamDef`]; the producer appends entries
//! carrying a single `job` field and [`StreamWorker`] drives a consumer-group
//! read loop, handing each raw entry to a [`StreamHandler`].
//!
//! ```ignore
//! struct AuditStream;
//! impl StreamDef for AuditStream {
//!     const STREAM_NAME: &'static str = "audit";
//!     const CONSUMER_GROUP: &'static str = "audit_workers";
//! }
//!
//! let producer = StreamProducer::new(redis.clone(), AuditStream::STREAM_NAME)
//!     .with_max_length(AuditStream::MAX_LENGTH);
//! producer.send(&event).await?;
//!
//! let worker = StreamWorker::new(redis, WorkerConfig::from_stream_def::<AuditStream>());
//! worker.run(&handler, shutdown_rx).await?;
//! ```

mod config;
mod consumer;
mod error;
mod event;
mod producer;
mod registry;
mod worker;

pub use config::WorkerConfig;
pub use consumer::StreamConsumer;
pub use error::{ErrorCategory, StreamError};
pub use event::StreamEvent;
pub use producer::StreamProducer;
pub use registry::{StreamDef, StreamHandler, JOB_FIELD};
pub use worker::StreamWorker;
