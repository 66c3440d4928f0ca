//! Backpressure-aware PCM stream writer.
//!
//! This crate takes an arbitrary stream of raw PCM bytes and hands it,
//! in bounded chunks, to an audio output whose internal ring buffer
//! only accepts partial writes once it is full.
//!
//! The core type is [`Writer`], which wraps any [`AudioOutput`]
//! and blocks the calling thread until all bytes are handed over,
//! sleeping between partial writes instead of spinning.
//!
//! ```rust
//! # use ringout::*;
//! let spec = StreamSpec::new(44_100, 2, 2, 4096).unwrap();
//! let mut writer = Writer::<DummyOutput>::try_open(spec).unwrap();
//!
//! let silence = [0_u8; 1024];
//! assert_eq!(writer.write(&silence).unwrap(), 1024);
//!
//! writer.close().unwrap();
//! ```

//---------------------------------------------------------------------------------------------------- Lints
#![allow(
    clippy::len_zero,
    clippy::module_inception,
)]

#![deny(
    nonstandard_style,
    deprecated,
    missing_docs,
)]

#![forbid(
    unused_mut,
    unused_unsafe,
    future_incompatible,
    break_with_label_and_loop,
    coherence_leak_check,
    duplicate_macro_attributes,
    for_loops_over_fallibles,
    overlapping_range_endpoints,
    semicolon_in_expressions_from_macros,
    redundant_semicolons,
    unconditional_recursion,
    unreachable_patterns,
    unused_allocation,
    unused_braces,
    unused_comparisons,
    unused_doc_comments,
    unused_parens,
    unused_labels,
    while_true,
    keyword_idents,
    non_ascii_idents,
    noop_method_call,
    single_use_lifetimes,
)]

//---------------------------------------------------------------------------------------------------- Public API
mod spec;
pub use spec::{StreamSpec,SampleFormat};

mod writer;
pub use writer::{Writer,Cancel};

pub mod output;
pub use output::{AudioOutput,DummyOutput,DefaultOutput,AUDIO_OUTPUT_BACKEND};

pub mod error;
pub use error::{OutputError,WriteError};

//---------------------------------------------------------------------------------------------------- Private Usage
mod macros;
