//! Type information for imported packages.
//!
//! The resolver only needs to know which exported names a dependency
//! declares and whether each one is a type. [`ExportCatalog`] carries a
//! built-in table for common standard-library packages and can be
//! extended with JSON export manifests:
//!
//! ```json
//! { "path": "example.com/store", "name": "store",
//!   "types": ["Item", "Client"], "values": ["Open", "MaxItems"] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use smol_str::SmolStr;
use thiserror::Error;

/// What kind of object an exported name denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberKind {
    Type,
    Value,
}

/// Exported declarations of one compiled package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageExports {
    pub path: SmolStr,
    pub name: SmolStr,
    types: FxHashSet<SmolStr>,
    values: FxHashSet<SmolStr>,
}

impl PackageExports {
    pub fn new(path: &str, name: &str) -> Self {
        Self {
            path: SmolStr::new(path),
            name: SmolStr::new(name),
            types: FxHashSet::default(),
            values: FxHashSet::default(),
        }
    }

    pub fn with_types<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.types.extend(names.into_iter().map(SmolStr::new));
        self
    }

    pub fn with_values<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.values.extend(names.into_iter().map(SmolStr::new));
        self
    }

    pub fn member(&self, name: &str) -> Option<MemberKind> {
        if self.types.contains(name) {
            Some(MemberKind::Type)
        } else if self.values.contains(name) {
            Some(MemberKind::Value)
        } else {
            None
        }
    }

    /// All exported members, sorted by name.
    pub fn members(&self) -> Vec<(SmolStr, MemberKind)> {
        let mut members: Vec<_> = self
            .types
            .iter()
            .map(|n| (n.clone(), MemberKind::Type))
            .chain(self.values.iter().map(|n| (n.clone(), MemberKind::Value)))
            .collect();
        members.sort();
        members
    }
}

/// Failure to find type information for an import path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("no export data for package {path}")]
pub struct ImportError {
    pub path: String,
}

/// Source of compiled-dependency type information.
pub trait Importer {
    fn import(&self, path: &str) -> Result<&PackageExports, ImportError>;
}

/// Errors reading an export manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read export manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed export manifest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid export manifest {}: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    path: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    values: Vec<String>,
}

/// Import path to exports table.
#[derive(Debug, Clone, Default)]
pub struct ExportCatalog {
    packages: FxHashMap<SmolStr, PackageExports>,
}

impl ExportCatalog {
    /// An empty catalog; every import fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in standard-library table.
    pub fn std() -> Self {
        let mut catalog = Self::new();
        for &(path, types, values) in STD_PACKAGES {
            let name = path.rsplit('/').next().unwrap_or(path);
            catalog.insert(
                PackageExports::new(path, name)
                    .with_types(types.iter().copied())
                    .with_values(values.iter().copied()),
            );
        }
        catalog
    }

    /// Adds or replaces the entry for `exports.path`.
    pub fn insert(&mut self, exports: PackageExports) {
        self.packages.insert(exports.path.clone(), exports);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.packages.contains_key(path)
    }

    /// Parses a manifest and layers it over the catalog.
    pub fn load_manifest(&mut self, path: &Path) -> Result<(), ManifestError> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let exports = parse_manifest(path, &text)?;
        tracing::debug!(
            "Loaded export manifest for {} from {}",
            exports.path,
            path.display()
        );
        self.insert(exports);
        Ok(())
    }
}

impl Importer for ExportCatalog {
    fn import(&self, path: &str) -> Result<&PackageExports, ImportError> {
        self.packages.get(path).ok_or_else(|| ImportError {
            path: path.to_string(),
        })
    }
}

/// Parses manifest text; `origin` is only used in error messages.
pub fn parse_manifest(origin: &Path, text: &str) -> Result<PackageExports, ManifestError> {
    let manifest: Manifest = serde_json::from_str(text).map_err(|source| ManifestError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    let invalid = |message: String| ManifestError::Invalid {
        path: origin.to_path_buf(),
        message,
    };

    if manifest.path.is_empty() {
        return Err(invalid("empty package path".to_string()));
    }
    let name = match manifest.name {
        Some(name) => name,
        None => manifest
            .path
            .rsplit('/')
            .next()
            .unwrap_or(&manifest.path)
            .to_string(),
    };
    if !crate::base::is_identifier(&name) {
        return Err(invalid(format!("invalid package name {:?}", name)));
    }
    if let Some(bad) = manifest
        .types
        .iter()
        .chain(&manifest.values)
        .find(|n| !crate::base::is_identifier(n))
    {
        return Err(invalid(format!("invalid member name {:?}", bad)));
    }

    Ok(PackageExports::new(&manifest.path, &name)
        .with_types(manifest.types.iter().map(String::as_str))
        .with_values(manifest.values.iter().map(String::as_str)))
}

type StdEntry = (&'static str, &'static [&'static str], &'static [&'static str]);

/// (path, exported types, exported values)
const STD_PACKAGES: &[StdEntry] = &[
    (
        "io",
        &[
            "Reader", "Writer", "Closer", "Seeker", "ReadWriter", "ReadCloser", "WriteCloser",
            "ReadWriteCloser", "ReadSeeker", "ReadSeekCloser", "WriteSeeker", "ReadWriteSeeker",
            "ReaderAt", "WriterAt", "ReaderFrom", "WriterTo", "ByteReader", "ByteScanner",
            "ByteWriter", "RuneReader", "RuneScanner", "StringWriter", "LimitedReader",
            "SectionReader", "OffsetWriter", "PipeReader", "PipeWriter",
        ],
        &[
            "EOF", "ErrUnexpectedEOF", "ErrShortWrite", "ErrShortBuffer", "ErrNoProgress",
            "ErrClosedPipe", "Discard", "SeekStart", "SeekCurrent", "SeekEnd", "ReadAll",
            "ReadFull", "ReadAtLeast", "Copy", "CopyN", "CopyBuffer", "WriteString",
            "LimitReader", "MultiReader", "MultiWriter", "TeeReader", "NopCloser", "Pipe",
            "NewSectionReader", "NewOffsetWriter",
        ],
    ),
    (
        "net/http",
        &[
            "Request", "Response", "ResponseWriter", "Handler", "HandlerFunc", "Header",
            "Client", "Server", "ServeMux", "Cookie", "CookieJar", "SameSite", "Transport",
            "RoundTripper", "Flusher", "Hijacker", "Pusher", "PushOptions", "ResponseController",
            "Dir", "File", "FileSystem", "ConnState", "ProtocolError", "MaxBytesError",
        ],
        &[
            "Get", "Head", "Post", "PostForm", "Handle", "HandleFunc", "ListenAndServe",
            "ListenAndServeTLS", "Serve", "ServeTLS", "NewRequest", "NewRequestWithContext",
            "NewServeMux", "NewResponseController", "Error", "NotFound", "NotFoundHandler",
            "Redirect", "RedirectHandler", "StatusText", "ServeFile", "ServeContent",
            "StripPrefix", "FileServer", "FS", "TimeoutHandler", "MaxBytesReader", "SetCookie",
            "DetectContentType", "DefaultClient", "DefaultServeMux", "DefaultTransport",
            "ErrNoCookie", "ErrServerClosed", "ErrBodyNotAllowed", "ErrHandlerTimeout",
            "MethodGet", "MethodHead", "MethodPost", "MethodPut", "MethodPatch", "MethodDelete",
            "MethodOptions", "StatusOK", "StatusCreated", "StatusAccepted", "StatusNoContent",
            "StatusMovedPermanently", "StatusFound", "StatusNotModified", "StatusBadRequest",
            "StatusUnauthorized", "StatusForbidden", "StatusNotFound",
            "StatusMethodNotAllowed", "StatusConflict", "StatusTooManyRequests",
            "StatusInternalServerError", "StatusNotImplemented", "StatusBadGateway",
            "StatusServiceUnavailable",
        ],
    ),
    (
        "encoding/json",
        &[
            "Decoder", "Encoder", "Marshaler", "Unmarshaler", "RawMessage", "Number", "Token",
            "Delim", "SyntaxError", "UnmarshalTypeError", "MarshalerError",
            "InvalidUnmarshalError", "UnsupportedTypeError", "UnsupportedValueError",
        ],
        &[
            "Marshal", "MarshalIndent", "Unmarshal", "NewDecoder", "NewEncoder", "Valid",
            "Compact", "Indent", "HTMLEscape",
        ],
    ),
    (
        "fmt",
        &["Stringer", "GoStringer", "Formatter", "State", "Scanner", "ScanState"],
        &[
            "Print", "Printf", "Println", "Sprint", "Sprintf", "Sprintln", "Fprint", "Fprintf",
            "Fprintln", "Errorf", "Sscan", "Sscanf", "Sscanln", "Fscan", "Fscanf", "Append",
            "Appendf", "Appendln",
        ],
    ),
    ("errors", &[], &["New", "Is", "As", "Unwrap", "Join", "ErrUnsupported"]),
    (
        "strings",
        &["Builder", "Reader", "Replacer"],
        &[
            "Contains", "HasPrefix", "HasSuffix", "Index", "Join", "Split", "SplitN", "Fields",
            "TrimSpace", "Trim", "TrimPrefix", "TrimSuffix", "ToLower", "ToUpper", "Replace",
            "ReplaceAll", "Repeat", "EqualFold", "Cut", "NewReader", "NewReplacer",
        ],
    ),
    (
        "strconv",
        &["NumError"],
        &[
            "Itoa", "Atoi", "ParseInt", "ParseUint", "ParseFloat", "ParseBool", "FormatInt",
            "FormatFloat", "FormatBool", "Quote", "Unquote", "ErrRange", "ErrSyntax",
        ],
    ),
    (
        "time",
        &["Time", "Duration", "Location", "Month", "Weekday", "Timer", "Ticker", "ParseError"],
        &[
            "Now", "Since", "Until", "Sleep", "After", "Tick", "NewTimer", "NewTicker", "Unix",
            "Date", "Parse", "ParseDuration", "UTC", "Local", "Nanosecond", "Microsecond",
            "Millisecond", "Second", "Minute", "Hour", "RFC3339", "RFC3339Nano", "Kitchen",
        ],
    ),
    (
        "context",
        &["Context", "CancelFunc", "CancelCauseFunc"],
        &[
            "Background", "TODO", "WithCancel", "WithCancelCause", "WithDeadline",
            "WithTimeout", "WithValue", "WithoutCancel", "Canceled", "DeadlineExceeded",
            "Cause",
        ],
    ),
    (
        "bytes",
        &["Buffer", "Reader"],
        &[
            "Compare", "Contains", "Equal", "HasPrefix", "HasSuffix", "Index", "Join", "Split",
            "TrimSpace", "NewBuffer", "NewBufferString", "NewReader", "MinRead", "ErrTooLarge",
        ],
    ),
    (
        "os",
        &["File", "FileInfo", "FileMode", "Process", "ProcessState", "Signal", "DirEntry"],
        &[
            "Args", "Stdin", "Stdout", "Stderr", "Exit", "Getenv", "LookupEnv", "Setenv",
            "Open", "Create", "OpenFile", "ReadFile", "WriteFile", "Remove", "RemoveAll",
            "Mkdir", "MkdirAll", "Stat", "ReadDir", "ErrNotExist", "ErrExist",
        ],
    ),
    (
        "sync",
        &["Mutex", "RWMutex", "WaitGroup", "Once", "Map", "Pool", "Cond", "Locker"],
        &["NewCond", "OnceFunc", "OnceValue", "OnceValues"],
    ),
    (
        "net/url",
        &["URL", "Values", "Userinfo", "Error", "EscapeError", "InvalidHostError"],
        &[
            "Parse", "ParseRequestURI", "ParseQuery", "QueryEscape", "QueryUnescape",
            "PathEscape", "PathUnescape", "User", "UserPassword",
        ],
    ),
    (
        "log",
        &["Logger"],
        &[
            "Print", "Printf", "Println", "Fatal", "Fatalf", "Fatalln", "Panic", "Panicf",
            "New", "Default", "SetFlags", "SetPrefix", "SetOutput", "LstdFlags",
        ],
    ),
    (
        "sort",
        &["Interface", "IntSlice", "StringSlice", "Float64Slice"],
        &["Sort", "Stable", "Slice", "SliceStable", "Search", "Ints", "Strings", "Float64s"],
    ),
    (
        "math",
        &[],
        &[
            "Abs", "Ceil", "Floor", "Max", "Min", "Mod", "Pow", "Sqrt", "Inf", "NaN", "IsNaN",
            "IsInf", "Pi", "E", "MaxInt", "MinInt", "MaxInt64", "MinInt64", "MaxFloat64",
        ],
    ),
    (
        "bufio",
        &["Reader", "Writer", "ReadWriter", "Scanner", "SplitFunc"],
        &[
            "NewReader", "NewReaderSize", "NewWriter", "NewWriterSize", "NewReadWriter",
            "NewScanner", "ScanLines", "ScanWords", "ScanRunes", "ScanBytes",
        ],
    ),
    ("embed", &["FS"], &[]),
    ("unsafe", &["Pointer"], &["Sizeof", "Alignof", "Offsetof", "Add", "Slice", "String"]),
];
