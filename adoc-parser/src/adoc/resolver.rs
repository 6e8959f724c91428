//! Content resolvers for `include::` directives
//!
//!     The parser never touches the filesystem itself: includes go through a [`ContentResolver`]
//!     injected in the [`Parser`](crate::adoc::Parser). A resolver maps a reference (the include
//!     target, after attribute substitution) to the lines it designates, or `None` when there is
//!     no such content.
//!
//!     Three implementations are provided:
//!         [`LocalContentResolver`]: files under a base directory.
//!         [`InMemoryResolver`]: a fixed map, handy for tests and embedded content.
//!         [`FnResolver`]: any closure.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Source of included content
pub trait ContentResolver: Send + Sync {
    /// The lines of `reference`, decoded with `encoding` (`None` means UTF-8).
    fn resolve(&self, reference: &str, encoding: Option<&str>) -> Option<Vec<String>>;
}

fn is_utf8(encoding: Option<&str>) -> bool {
    match encoding {
        None => true,
        Some(name) => matches!(name.to_ascii_lowercase().as_str(), "utf-8" | "utf8"),
    }
}

/// Reads files relative to a base directory, absolute references are used as is
#[derive(Debug, Clone)]
pub struct LocalContentResolver {
    root: PathBuf,
}

impl LocalContentResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentResolver for LocalContentResolver {
    fn resolve(&self, reference: &str, encoding: Option<&str>) -> Option<Vec<String>> {
        if !is_utf8(encoding) {
            warn!(reference, ?encoding, "only utf-8 includes are supported");
            return None;
        }
        let path = Path::new(reference);
        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        match fs::read_to_string(&resolved) {
            Ok(content) => Some(content.lines().map(str::to_string).collect()),
            Err(error) => {
                debug!(path = %resolved.display(), %error, "include not readable");
                None
            }
        }
    }
}

/// Serves content from a map of reference to text
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolver {
    contents: HashMap<String, String>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reference: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(reference, content);
        self
    }

    pub fn insert(&mut self, reference: impl Into<String>, content: impl Into<String>) {
        self.contents.insert(reference.into(), content.into());
    }
}

impl ContentResolver for InMemoryResolver {
    fn resolve(&self, reference: &str, _encoding: Option<&str>) -> Option<Vec<String>> {
        self.contents
            .get(reference)
            .map(|content| content.lines().map(str::to_string).collect())
    }
}

type ResolveFn = dyn Fn(&str, Option<&str>) -> Option<Vec<String>> + Send + Sync;

/// Delegates to a closure
pub struct FnResolver(Box<ResolveFn>);

impl FnResolver {
    pub fn new<F>(resolve: F) -> Self
    where
        F: Fn(&str, Option<&str>) -> Option<Vec<String>> + Send + Sync + 'static,
    {
        Self(Box::new(resolve))
    }
}

impl fmt::Debug for FnResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnResolver(..)")
    }
}

impl ContentResolver for FnResolver {
    fn resolve(&self, reference: &str, encoding: Option<&str>) -> Option<Vec<String>> {
        (self.0)(reference, encoding)
    }
}
