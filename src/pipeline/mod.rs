//! Card generation pipeline.
//!
//! - [`CardGeneratorBuilder`]: fluent configuration of a [`CardGenerator`]
//! - [`CardGenerator`]: validates a request, composes the front and back pages
//!   and serializes the document
//! - [`suggested_file_name`] and the `generate_and_*` methods hand the bytes
//!   to a delivery sink
//!
//! # Example
//!
//! ```ignore
//! use cardpress::{CardGenerator, CardRequest, CardFieldValues};
//! use cardpress_resource::DirectoryDeliverySink;
//!
//! let generator = CardGenerator::builder().with_compression(true).build();
//! let sink = DirectoryDeliverySink::new("out");
//! let name = generator
//!     .generate_and_deliver(CardRequest::new(CardFieldValues::default(), 1u32), &sink)
//!     .await?;
//! ```

mod builder;
pub mod config;
mod delivery;
mod generator;

pub use builder::CardGeneratorBuilder;
pub use config::GeneratorConfig;
pub use delivery::{FILE_NAME_PREFIX, suggested_file_name};
pub use generator::{CARD_PAGE_COUNT, CardGenerator, CompositionReport, GeneratedCard};
