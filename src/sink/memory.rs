use rustc_hash::FxHashMap;

use super::{ContainerRef, UiSink};
use crate::error::{SinkError, TargetNotFoundError};

/// In-process sink holding each container's content as a string
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    containers: FxHashMap<ContainerRef, String>,
}

impl MemorySink {
    /// Sink with the given empty containers already present
    pub fn with_containers<I, C>(ids: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ContainerRef>,
    {
        let mut sink = Self::default();
        for id in ids {
            sink.add_container(id);
        }
        sink
    }

    /// Add an empty container; existing content is kept
    pub fn add_container(&mut self, id: impl Into<ContainerRef>) {
        self.containers.entry(id.into()).or_default();
    }

    /// Current content of a container
    pub fn content(&self, container: &ContainerRef) -> Option<&str> {
        self.containers.get(container).map(String::as_str)
    }
}

impl UiSink for MemorySink {
    fn resolve(&self, container: &ContainerRef) -> Result<(), TargetNotFoundError> {
        if self.containers.contains_key(container) {
            Ok(())
        } else {
            Err(container.not_found())
        }
    }

    fn replace_content(&mut self, container: &ContainerRef, markup: &str) -> Result<(), SinkError> {
        let slot = self
            .containers
            .get_mut(container)
            .ok_or_else(|| container.not_found())?;
        slot.clear();
        slot.push_str(markup);
        Ok(())
    }
}
