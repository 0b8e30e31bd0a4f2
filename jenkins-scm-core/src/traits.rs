//! Trait descriptors: the ordered, conditional children of `<traits>`.
//!
//! Each source kind declares a fixed list of [`TraitDescriptor`]s. Encoding
//! walks the list in order and emits the element for every descriptor whose
//! predicate holds, so the dialect's trait order and emission rules live in
//! one table per kind instead of inline branching.
//!
//! The decode helpers below are shared by the source codecs: each one probes
//! `<traits>` for a child by name and falls back to the zero value when the
//! child (or `<traits>` itself) is missing.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clone_option::{self, CloneOption};
use crate::error::DecodeError;
use crate::trust::{TrustLookup, TrustTable};
use crate::xml::Element;

pub const REGEX_FILTER_TRAIT: &str = "jenkins.scm.impl.trait.RegexSCMHeadFilterTrait";
const REGEX_FILTER_PLUGIN: &str = "scm-api";

/// One optional child of `<traits>`.
pub struct TraitDescriptor<S> {
    /// Element name, which is also the plugin's trait class.
    pub element: &'static str,
    /// Whether the trait is emitted for this source.
    pub applies: fn(&S) -> bool,
    pub build: TraitBuild<S>,
}

pub enum TraitBuild<S> {
    /// Fills the trait element created from the descriptor's name.
    Fill(fn(&S, &mut Element)),
    /// Appends the whole trait to `<traits>` through a sub-codec.
    Append(fn(&S, &mut Element)),
}

/// Creates `<traits>` under `source` and emits every applicable descriptor in order.
pub fn append_traits<S>(source: &S, descriptors: &[TraitDescriptor<S>], parent: &mut Element) {
    let traits = parent.create_element("traits");
    for descriptor in descriptors {
        if !(descriptor.applies)(source) {
            continue;
        }
        match descriptor.build {
            TraitBuild::Fill(fill) => fill(source, traits.create_element(descriptor.element)),
            TraitBuild::Append(append) => append(source, traits),
        }
    }
}

/// Builder for presence-only traits.
pub fn empty<S>(_: &S, _: &mut Element) {}

pub fn write_strategy_id(element: &mut Element, strategy: u32) {
    element.create_element("strategyId").set_text(strategy.to_string());
}

pub fn has_clone_option(opt: &Option<CloneOption>) -> bool {
    opt.is_some()
}

pub fn has_regex_filter(filter: &Option<String>) -> bool {
    filter.as_deref().is_some_and(|f| !f.is_empty())
}

pub fn write_regex_filter(filter: &Option<String>, element: &mut Element) {
    element.create_attr("plugin", REGEX_FILTER_PLUGIN);
    element
        .create_element("regex")
        .set_text(filter.as_deref().unwrap_or_default());
}

/// Fork pull/merge-request discovery settings.
///
/// Present only when fork discovery is enabled; `trust` is an ordinal into
/// the trust table of the owning source kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverPrFromForks {
    pub strategy: u32,
    pub trust: u32,
}

/// Writes `strategyId` and, when the ordinal is valid, the `trust` child.
///
/// An invalid ordinal is logged and the `trust` element is left out so no
/// class name without a suffix reaches Jenkins.
pub fn write_fork_discovery<T: TrustTable>(
    forks: &DiscoverPrFromForks,
    trust_class_prefix: &str,
    element: &mut Element,
) {
    write_strategy_id(element, forks.strategy);
    match T::from_ordinal(forks.trust) {
        Some(trust) => {
            element
                .create_element("trust")
                .create_attr("class", format!("{trust_class_prefix}${}", trust.class_suffix()));
        }
        None => {
            warn!(
                table = T::TABLE,
                trust = forks.trust,
                "Invalid fork discovery trust value, omitting trust element"
            );
        }
    }
}

pub fn has_trait(traits: Option<&Element>, name: &str) -> bool {
    traits.and_then(|t| t.select_element(name)).is_some()
}

/// Strategy ordinal of a discovery trait; 0 when the trait or its `strategyId` is absent.
pub fn parse_strategy(traits: Option<&Element>, name: &str) -> Result<u32, DecodeError> {
    match traits.and_then(|t| t.select_element(name)) {
        Some(discovery) => Ok(clone_option::parse_u32_child(discovery, "strategyId")?.unwrap_or(0)),
        None => Ok(0),
    }
}

pub fn parse_regex_filter(traits: Option<&Element>) -> Option<String> {
    traits
        .and_then(|t| t.select_element(REGEX_FILTER_TRAIT))
        .and_then(|t| t.select_element("regex"))
        .map(|regex| regex.text().to_string())
}

/// Reads a fork discovery trait back.
///
/// A missing or unrecognised trust class is logged and yields `None`, the
/// same as fork discovery being off; it never fails the whole decode.
pub fn parse_fork_discovery<T: TrustTable>(
    traits: Option<&Element>,
    name: &str,
) -> Result<Option<DiscoverPrFromForks>, DecodeError> {
    let Some(fork) = traits.and_then(|t| t.select_element(name)) else {
        return Ok(None);
    };
    let strategy = clone_option::parse_u32_child(fork, "strategyId")?.unwrap_or(0);

    let Some(class) = fork.select_element("trust").and_then(|t| t.select_attr("class")) else {
        warn!(table = T::TABLE, "Fork discovery trait has no trust class");
        return Ok(None);
    };
    let Some(suffix) = class.split('$').nth(1) else {
        warn!(table = T::TABLE, class = %class, "Fork discovery trust class has no inner class");
        return Ok(None);
    };

    match T::parse_suffix(suffix) {
        TrustLookup::Known(trust) => Ok(Some(DiscoverPrFromForks {
            strategy,
            trust: trust.ordinal(),
        })),
        TrustLookup::Unknown(suffix) => {
            warn!(table = T::TABLE, suffix = %suffix, "Invalid fork discovery trust value");
            Ok(None)
        }
    }
}
