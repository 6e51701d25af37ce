//! Host-side binding for the DVOACAP prediction library.
//! Reads a JSON input, hands it to the library's `Predict` entry point and writes the text it returns.

pub mod digest;
pub mod endpoint;
pub mod invoker;
pub mod library;
pub mod payload;

pub use digest::Digest;
pub use endpoint::{EndpointError, Sink, Source};
pub use invoker::{InvokeError, Invoker, Prediction, Predictor};
pub use library::{default_library_name, LibraryError, NativeLibrary, DEFAULT_ENTRY_POINT};
pub use payload::{InputPayload, OutputPayload, PayloadError};
