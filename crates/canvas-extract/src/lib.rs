//! Artifact extraction engine for Canvas pipeline-step output.
//!
//! A pipeline step hands back a single result string that may interleave
//! prose, fenced artifact payloads, bare inline JSON objects, raw HTML
//! documents, or raw GeoJSON. This crate decomposes that text into an
//! ordered sequence of typed content blocks for downstream renderers:
//! lenient everywhere, total over all inputs, never dropping a region it
//! cannot classify.

pub mod blocks;
pub mod extract;
pub mod format;
pub mod scanner;
pub mod stream;

pub use blocks::*;
pub use extract::*;
pub use format::*;
pub use scanner::*;
pub use stream::*;
