//! Dynamic binding to the native prediction library.
//! C signature: `const char* Predict(const char* jsonInput)`. The returned buffer belongs to the
//! library; it is copied before the call returns and never freed here.

use std::ffi::{OsStr, OsString};
use std::os::raw::c_char;

use libloading::Library;
use log::{debug, info};

use crate::invoker::Predictor;
use crate::payload::{InputPayload, OutputPayload, PayloadError};

/// Exported symbol called when none is configured.
pub const DEFAULT_ENTRY_POINT: &str = "Predict";

type PredictFn = unsafe extern "C" fn(*const c_char) -> *const c_char;

/// Platform file name of the DVOACAP library (`libdvoa.so`, `libdvoa.dylib`, `dvoa.dll`).
pub fn default_library_name() -> OsString {
    libloading::library_filename("dvoa")
}

/// A loaded library with its entry point already resolved.
pub struct NativeLibrary {
    // Valid only while `_lib` is loaded; declared first so it drops first.
    predict: PredictFn,
    entry_point: String,
    _lib: Library,
}

impl NativeLibrary {
    /// Load `path` and resolve `entry_point`. A bare file name goes through the system loader
    /// search path, like `dlopen`.
    pub fn open(path: impl AsRef<OsStr>, entry_point: &str) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        let shown = path.to_string_lossy().into_owned();
        let lib = unsafe { Library::new(path) }.map_err(|source| LibraryError::Load {
            path: shown.clone(),
            source,
        })?;
        let predict: PredictFn = unsafe {
            let sym = lib
                .get::<PredictFn>(entry_point.as_bytes())
                .map_err(|source| LibraryError::MissingSymbol {
                    path: shown.clone(),
                    symbol: entry_point.to_string(),
                    source,
                })?;
            *sym
        };
        info!("loaded {} (entry point {})", shown, entry_point);
        Ok(Self {
            predict,
            entry_point: entry_point.to_string(),
            _lib: lib,
        })
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }
}

impl Predictor for NativeLibrary {
    fn predict(&self, input: &InputPayload) -> Result<OutputPayload, PayloadError> {
        debug!("calling {} with {} bytes", self.entry_point, input.len());
        let out = unsafe {
            let ptr = (self.predict)(input.as_c_str().as_ptr());
            OutputPayload::from_raw(ptr)?
        };
        debug!("{} returned {} bytes", self.entry_point, out.as_str().len());
        Ok(out)
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("entry_point", &self.entry_point)
            .finish_non_exhaustive()
    }
}

/// Error loading the library or resolving its entry point.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("cannot load library {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: libloading::Error,
    },
    #[error("library {path} has no symbol {symbol}: {source}")]
    MissingSymbol {
        path: String,
        symbol: String,
        #[source]
        source: libloading::Error,
    },
}
