use markup_fuse::{FuseError, FuseOptions};
use pretty_assertions::assert_eq;
use serde::Deserialize;

/// One fixture: two renditions of the same text and either the fused
/// document or the beginning of the error message it must fail with.
#[derive(Debug, Deserialize)]
pub struct ExampleDocument {
    pub name: String,
    pub master: String,
    pub slave: String,

    #[serde(default)]
    expected: Option<String>,

    #[serde(default)]
    error: Option<String>,

    #[serde(default)]
    auto_segment: Option<bool>,

    #[serde(default)]
    prefer_slave_inner: Option<bool>,

    #[serde(default)]
    strip_slave_top_tag: Option<bool>,
}

impl ExampleDocument {
    pub fn options(&self) -> FuseOptions {
        let defaults = FuseOptions::default();

        defaults
            .clone()
            .with_auto_segment(self.auto_segment.unwrap_or(defaults.auto_segment))
            .with_prefer_slave_inner(
                self.prefer_slave_inner
                    .unwrap_or(defaults.prefer_slave_inner),
            )
            .with_strip_slave_top_tag(
                self.strip_slave_top_tag
                    .unwrap_or(defaults.strip_slave_top_tag),
            )
    }

    pub fn assert_outcome(&self, result: &Result<String, FuseError>) {
        match (result, &self.expected, &self.error) {
            (Ok(fused), Some(expected), None) => {
                assert_eq!(fused, expected, "{}", self.name);
            }
            (Err(error), None, Some(message)) => {
                assert!(
                    error.to_string().starts_with(message.as_str()),
                    "{}: unexpected error {error}",
                    self.name
                );
            }
            (result, _, _) => panic!(
                "{}: got {result:?} but expected {:?} / {:?}",
                self.name, self.expected, self.error
            ),
        }
    }
}
