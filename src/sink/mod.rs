//! UI Sinks
//!
//! A sink is wherever rendered markup ends up: a DOM bridge, a page on disk,
//! or a map in tests. The renderer only needs to know whether a container
//! exists and how to replace its content.

pub mod file;
pub mod memory;

pub use file::{FileSink, FileSinkConfig};
pub use memory::MemorySink;

use std::fmt;

use crate::error::{SinkError, TargetNotFoundError};

/// Handle naming a container, e.g. `summary_box` or `#summary_box`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerRef(String);

impl ContainerRef {
    /// Build a handle; a leading `#` id selector is stripped
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        match id.strip_prefix('#') {
            Some(stripped) => ContainerRef(stripped.to_string()),
            None => ContainerRef(id),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn not_found(&self) -> TargetNotFoundError {
        TargetNotFoundError {
            container: self.0.clone(),
        }
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContainerRef {
    fn from(id: &str) -> Self {
        ContainerRef::new(id)
    }
}

/// Destination for rendered markup
pub trait UiSink {
    /// Check that `container` exists
    fn resolve(&self, container: &ContainerRef) -> Result<(), TargetNotFoundError>;

    /// Replace everything in `container` with `markup`
    fn replace_content(&mut self, container: &ContainerRef, markup: &str) -> Result<(), SinkError>;
}
