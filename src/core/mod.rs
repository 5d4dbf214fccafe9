//! Core building blocks
//!
//! Field codecs, sequence helpers, REF/ALT alignment, error types and the
//! input layer shared by the format modules.

pub mod align;
pub mod codec;
pub mod dna;
pub mod error;
pub mod io;

pub use align::{align_ref_alt, EditKind, RefAltAlignment};
pub use codec::{TypedValue, ValueType};
pub use error::{
    AnnotationError, AnnotationResult, FastVcfError, HeaderError, HeaderResult, LineError,
    RecordError, RecordResult, Result,
};
pub use io::{
    IoStrategy, LineIterator, InputSource,
    DEFAULT_BUFFER_SIZE, LARGE_BUFFER_SIZE, MMAP_THRESHOLD,
};
