//! # routedoc
//!
//! **routedoc** turns an application's route table into API documentation: a
//! set of grouped Markdown pages and a Postman-compatible collection file.
//!
//! ## Overview
//!
//! The generator never talks to a live application. It reads the host's
//! route table through a narrow adapter, runs an ordered chain of
//! extraction strategies over each documented route, merges their
//! contributions into one endpoint record per route, and hands the finished
//! group model to two independent serializers. Example values come from a
//! single seeded stream, so identical input and seed produce byte-identical
//! output (the collection's `_postman_id` aside).
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`route`]** - Route descriptors, the [`route::HostAdapter`] seam, and
//!   the in-memory [`route::RouteTable`] with resource-route expansion
//! - **[`matcher`]** - Include/exclude rules with first-rule-wins apply
//!   payloads
//! - **[`docblock`]** - The documentation-block lexer seam and its default
//!   tag lexer
//! - **[`strategies`]** - Pluggable extraction strategies with declared
//!   field ownership, validated before any route is processed
//! - **[`example`]** - Deterministic, type-directed example values
//! - **[`model`]** - The endpoint model, natural-sorted grouping, and body
//!   nesting
//! - **[`output`]** - The Markdown and collection serializers plus staged,
//!   all-or-nothing writes
//! - **[`pipeline`]** - The sequential driver and the operator-facing
//!   process log
//! - **[`invoke`]** - Optional best-effort in-process handler invocation
//! - **[`cli`]** - The `routedoc-gen` command-line shell
//!
//! ## Generation Flow
//!
//! ```text
//! HostAdapter::list_routes
//!     └─> matcher (first matching rule wins)
//!         └─> strategy chain per route (metadata, url/query/body params,
//!             headers, responses) threading one seeded RNG stream
//!             └─> endpoint model (grouped + natural sort)
//!                 ├─> Markdown pages   docs/groups/<index>-<slug>.md
//!                 └─> Postman collection  docs/collection.json
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use routedoc::config::GeneratorConfig;
//! use routedoc::pipeline::Generator;
//! use routedoc::route::RouteTable;
//!
//! let mut table = RouteTable::new();
//! table.get("api/ping", "StatusController@ping", "Ping the API.\n@group Status");
//!
//! let report = Generator::new(GeneratorConfig::default())
//!     .run(&table)
//!     .expect("generation failed");
//! println!("{} endpoints documented", report.processed());
//! ```

pub mod cli;
pub mod config;
pub mod docblock;
pub mod errors;
pub mod example;
pub mod invoke;
pub mod matcher;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod route;
pub mod strategies;

pub use config::GeneratorConfig;
pub use errors::{ConfigError, GenerateError, OutputError, StrategyError};
pub use model::{EndpointMetadata, EndpointModel, GroupKey, GroupSort, ParamType, Parameter};
pub use pipeline::{Generator, ProcessLog, RunReport, SkipReason};
pub use route::{HandlerCapabilities, HandlerRef, HostAdapter, RouteDescriptor, RouteTable};
