//! Shallow-clone trait shared by the Git, GitHub and GitLab sources.
//!
//! All three plugins reuse `jenkins.plugins.git.traits.CloneOptionTrait`
//! with an `extension` child of class
//! `hudson.plugins.git.extensions.impl.CloneOption`. `noTags`,
//! `honorRefspec` and `reference` are constants of the dialect.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::xml::Element;

pub const CLONE_OPTION_TRAIT: &str = "jenkins.plugins.git.traits.CloneOptionTrait";
pub const CLONE_OPTION_CLASS: &str = "hudson.plugins.git.extensions.impl.CloneOption";

pub const DEFAULT_TIMEOUT: u32 = 10;
pub const DEFAULT_DEPTH: u32 = 1;

/// Clone tuning for a source checkout.
///
/// `None` for `timeout` or `depth` means "unset"; the encoder writes the
/// plugin defaults (10 minutes, depth 1) in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneOption {
    #[serde(default)]
    pub shallow: bool,
    #[serde(default)]
    pub timeout: Option<u32>,
    #[serde(default)]
    pub depth: Option<u32>,
}

/// Appends the clone-option trait to `traits`. Does nothing for `None`.
pub fn append_clone_option(opt: Option<&CloneOption>, traits: &mut Element) {
    let Some(opt) = opt else {
        return;
    };
    write_clone_extension(opt, traits.create_element(CLONE_OPTION_TRAIT));
}

fn write_clone_extension(opt: &CloneOption, wrapper: &mut Element) {
    let extension = wrapper.create_element("extension");
    extension.create_attr("class", CLONE_OPTION_CLASS);
    extension.create_element("shallow").set_text(opt.shallow.to_string());
    extension.create_element("noTags").set_text("false");
    extension.create_element("honorRefspec").set_text("true");
    extension.create_element("reference");
    extension
        .create_element("timeout")
        .set_text(opt.timeout.unwrap_or(DEFAULT_TIMEOUT).to_string());
    extension
        .create_element("depth")
        .set_text(opt.depth.unwrap_or(DEFAULT_DEPTH).to_string());
}

/// Reads the clone-option trait back from a `traits` element.
///
/// Returns `Ok(None)` when the trait (or its `extension`) is absent. Absent
/// scalars fall back to their zero value; present but unparsable scalars are
/// an error.
pub fn parse_clone_option(traits: Option<&Element>) -> Result<Option<CloneOption>, DecodeError> {
    let Some(extension) = traits
        .and_then(|t| t.select_element(CLONE_OPTION_TRAIT))
        .and_then(|t| t.select_element("extension"))
    else {
        return Ok(None);
    };

    Ok(Some(CloneOption {
        shallow: parse_bool_child(extension, "shallow")?.unwrap_or(false),
        timeout: parse_u32_child(extension, "timeout")?,
        depth: parse_u32_child(extension, "depth")?,
    }))
}

/// Parses the text of the named child as an unsigned integer.
///
/// `Ok(None)` if the child is missing, an error if it is present but not a number.
pub(crate) fn parse_u32_child(parent: &Element, name: &str) -> Result<Option<u32>, DecodeError> {
    let Some(child) = parent.select_element(name) else {
        return Ok(None);
    };
    let raw = child.text().trim();
    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| DecodeError::InvalidNumber {
            element: name.to_string(),
            value: raw.to_string(),
        })
}

fn parse_bool_child(parent: &Element, name: &str) -> Result<Option<bool>, DecodeError> {
    let Some(child) = parent.select_element(name) else {
        return Ok(None);
    };
    match child.text().trim() {
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        other => Err(DecodeError::InvalidBool {
            element: name.to_string(),
            value: other.to_string(),
        }),
    }
}
