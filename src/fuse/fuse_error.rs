use std::fmt::Display;

use thiserror::Error;

use crate::{Side, utils::snippet::snippet};

/// Errors reported by `fuse` and `fuse_events`. Nothing is emitted when one
/// of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FuseError {
    /// The two documents don't have the same text.
    #[error(transparent)]
    TextMismatch(#[from] TextMismatch),

    /// A master and a slave tag cross each other and automatic segmentation
    /// is disabled.
    #[error(
        "Conflicting markup: <{open_tag}> just before \"{before}\" and </{close_tag}> just \
         after \"{after}\""
    )]
    ConflictingMarkup {
        /// The tag still open when the crossing close was reached
        open_tag: String,
        /// Text right after `open_tag`
        before: String,
        /// The tag closing across `open_tag`
        close_tag: String,
        /// Text right before `close_tag`
        after: String,
    },

    /// An input sequence isn't a well-formed bracketing.
    #[error("Unbalanced markup in the {side} document: {reason}")]
    UnbalancedMarkup { side: Side, reason: String },

    /// The markup codec failed to scan or serialize a document.
    #[error("Markup codec failed because of {reason}")]
    Codec { reason: String },
}

impl FuseError {
    pub(crate) fn codec(error: impl Display) -> Self {
        FuseError::Codec {
            reason: error.to_string(),
        }
    }
}

/// Where the text of the master and the slave document diverge. Every variant
/// carries the surrounding text of both documents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextMismatch {
    #[error("Input documents have different text at offset {offset}:\n{master}\n{slave}")]
    DifferentText {
        offset: usize,
        master: String,
        slave: String,
    },

    #[error("Master document has longer text than the slave:\n{master}\n{slave}")]
    MasterLonger { master: String, slave: String },

    #[error("Master document has shorter text than the slave:\n{master}\n{slave}")]
    MasterShorter { master: String, slave: String },
}

impl TextMismatch {
    /// Compare the two texts character by character, returning `None` if
    /// they are equal.
    #[must_use]
    pub fn between(master: &str, slave: &str) -> Option<Self> {
        if master == slave {
            return None;
        }

        let master = master.chars().collect::<Vec<_>>();
        let slave = slave.chars().collect::<Vec<_>>();

        if let Some(offset) = master
            .iter()
            .zip(slave.iter())
            .position(|(left, right)| left != right)
        {
            return Some(TextMismatch::DifferentText {
                offset,
                master: snippet(&master, offset),
                slave: snippet(&slave, offset),
            });
        }

        let common = master.len().min(slave.len());
        let master_snippet = snippet(&master, common);
        let slave_snippet = snippet(&slave, common);

        Some(if master.len() > slave.len() {
            TextMismatch::MasterLonger {
                master: master_snippet,
                slave: slave_snippet,
            }
        } else {
            TextMismatch::MasterShorter {
                master: master_snippet,
                slave: slave_snippet,
            }
        })
    }
}
