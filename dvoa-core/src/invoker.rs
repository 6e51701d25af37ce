//! Prediction invoker: one input in, one foreign call, one output out.
//!
//! Ordering matters for the output side: the sink is opened only after the call has
//! produced a result, so a missing input, a load failure or a rejected payload never
//! creates or truncates the output file.

use std::ffi::OsStr;

use log::{debug, info};

use crate::digest::Digest;
use crate::endpoint::{EndpointError, Sink, Source};
use crate::library::{LibraryError, NativeLibrary};
use crate::payload::{InputPayload, OutputPayload, PayloadError};

/// Anything that can turn an input payload into prediction text.
pub trait Predictor {
    fn predict(&self, input: &InputPayload) -> Result<OutputPayload, PayloadError>;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, input: &InputPayload) -> Result<OutputPayload, PayloadError> {
        (**self).predict(input)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, input: &InputPayload) -> Result<OutputPayload, PayloadError> {
        (**self).predict(input)
    }
}

/// Result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub output: OutputPayload,
    pub input_len: usize,
    pub input_digest: Digest,
    pub output_digest: Digest,
}

/// Runs predictions through a [`Predictor`].
pub struct Invoker<P> {
    predictor: P,
    check_json: bool,
}

impl<P: Predictor> Invoker<P> {
    pub fn new(predictor: P) -> Self {
        Self {
            predictor,
            check_json: false,
        }
    }

    /// Reject input that is not valid JSON before calling the library.
    pub fn with_json_check(mut self, enabled: bool) -> Self {
        self.check_json = enabled;
        self
    }

    /// Marshal `bytes` and make exactly one call.
    pub fn predict(&self, bytes: Vec<u8>) -> Result<Prediction, InvokeError> {
        let input = InputPayload::from_bytes(bytes)?;
        if self.check_json {
            input.validate_json()?;
        }
        let input_digest = Digest::of(input.as_bytes());
        debug!("input {} bytes, sha256 {}", input.len(), input_digest.short());
        let output = self.predictor.predict(&input)?;
        let output_digest = Digest::of(output.as_str().as_bytes());
        debug!(
            "output {} bytes, sha256 {}",
            output.as_str().len(),
            output_digest.short()
        );
        Ok(Prediction {
            output,
            input_len: input.len(),
            input_digest,
            output_digest,
        })
    }

    /// Read `source` in full, predict, then write the text to `sink`.
    pub fn run(&self, source: &Source, sink: &Sink) -> Result<Prediction, InvokeError> {
        let bytes = source.read_all()?;
        info!("read {} bytes from {}", bytes.len(), source);
        let prediction = self.predict(bytes)?;
        sink.write_all(prediction.output.as_str())?;
        info!(
            "wrote {} bytes to {}",
            prediction.output.as_str().len(),
            sink
        );
        Ok(prediction)
    }
}

impl Invoker<NativeLibrary> {
    /// Load the native library and bind an invoker to its entry point.
    pub fn load(library: impl AsRef<OsStr>, entry_point: &str) -> Result<Self, InvokeError> {
        Ok(Self::new(NativeLibrary::open(library, entry_point)?))
    }
}

/// Any failure while running a prediction.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error(transparent)]
    Library(#[from] LibraryError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}
