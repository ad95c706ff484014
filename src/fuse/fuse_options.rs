use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Side;

/// Namespace prefix to URI mapping, forwarded to the codec when serializing.
pub type NamespaceMap = BTreeMap<String, String>;

/// Options controlling how two documents are fused.
///
/// ```
/// use markup_fuse::FuseOptions;
///
/// let options = FuseOptions::default().with_auto_segment(false);
/// assert!(!options.auto_segment);
/// assert!(options.prefer_slave_inner);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuseOptions {
    /// Split a slave tag that crosses a master tag instead of failing with
    /// `FuseError::ConflictingMarkup`.
    pub auto_segment: bool,

    /// When a master and a slave tag wrap exactly the same text, nest the
    /// slave tag inside the master one.
    pub prefer_slave_inner: bool,

    /// Drop the slave's root element before fusing. Only used by `fuse`.
    pub strip_slave_top_tag: bool,

    /// Passed through to `Codec::unscan`. Only used by `fuse`.
    pub namespaces: Option<NamespaceMap>,
}

impl Default for FuseOptions {
    fn default() -> Self {
        Self {
            auto_segment: true,
            prefer_slave_inner: true,
            strip_slave_top_tag: true,
            namespaces: None,
        }
    }
}

impl FuseOptions {
    #[must_use]
    pub fn with_auto_segment(self, auto_segment: bool) -> Self {
        Self {
            auto_segment,
            ..self
        }
    }

    #[must_use]
    pub fn with_prefer_slave_inner(self, prefer_slave_inner: bool) -> Self {
        Self {
            prefer_slave_inner,
            ..self
        }
    }

    #[must_use]
    pub fn with_strip_slave_top_tag(self, strip_slave_top_tag: bool) -> Self {
        Self {
            strip_slave_top_tag,
            ..self
        }
    }

    #[must_use]
    pub fn with_namespaces(self, namespaces: NamespaceMap) -> Self {
        Self {
            namespaces: Some(namespaces),
            ..self
        }
    }

    /// The side whose tags are matched first ends up innermost.
    pub(crate) fn reduction_order(&self) -> [Side; 2] {
        if self.prefer_slave_inner {
            [Side::Slave, Side::Master]
        } else {
            [Side::Master, Side::Slave]
        }
    }
}
