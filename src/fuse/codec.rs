use std::fmt::Display;

use crate::{fuse::fuse_options::NamespaceMap, types::event::Event};

/// The seam to an external markup codec: turns a document into a flat,
/// well-formed event sequence and back. Encoding, escaping and namespace
/// handling are entirely the codec's business.
pub trait Codec {
    type Document;
    type Error: Display;

    /// Scan a document into events. `Exit` peers must refer to the `Enter`
    /// they close.
    ///
    /// # Errors
    ///
    /// Whatever the codec fails to parse.
    fn scan(&self, document: &Self::Document) -> Result<Vec<Event>, Self::Error>;

    /// Serialize events into a document, applying `namespaces` if given.
    ///
    /// # Errors
    ///
    /// Whatever the codec fails to serialize.
    fn unscan<I>(
        &self,
        events: I,
        namespaces: Option<&NamespaceMap>,
    ) -> Result<Self::Document, Self::Error>
    where
        I: Iterator<Item = Event>;
}
