//! Plain-text report rendering and headline lookup
//!
//! Both functions are pure and deterministic: rendering the same profile
//! twice yields byte-identical text.

use crate::constants::{HEADLINE_ENTRY_PATTERN, HEADLINE_SECTION_PATTERN};
use crate::models::{Entry, Profile, Section};
use regex::Regex;

/// Unanchored name matcher used by [`find_entry_value`]
pub trait NamePattern {
    fn matches(&self, name: &str) -> bool;
}

/// Substring match
impl NamePattern for str {
    fn matches(&self, name: &str) -> bool {
        name.contains(self)
    }
}

impl NamePattern for Regex {
    fn matches(&self, name: &str) -> bool {
        self.is_match(name)
    }
}

impl<P: NamePattern + ?Sized> NamePattern for &P {
    fn matches(&self, name: &str) -> bool {
        (**self).matches(name)
    }
}

/// Render a profile as readable text
///
/// Sections keep their order and are separated by one blank line. Each
/// section is its title followed by one `name: values` line per entry;
/// entries whose values render empty are left out, but the section title
/// is always kept.
pub fn render(profile: &Profile) -> String {
    profile
        .sections
        .iter()
        .map(render_section)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_section(section: &Section) -> String {
    let mut lines = vec![section.title.clone()];
    lines.extend(section.entries.iter().filter_map(render_entry));
    lines.join("\n")
}

fn render_entry(entry: &Entry) -> Option<String> {
    let values = entry.values.to_string();
    if values.is_empty() {
        return None;
    }
    Some(format!("{}: {}", entry.name, values))
}

/// Rendered values of the first matching entry, or `""` when none matches
///
/// Sections are scanned in order, then entries within each section.
pub fn find_entry_value<S, E>(profile: &Profile, section_pattern: S, entry_pattern: E) -> String
where
    S: NamePattern,
    E: NamePattern,
{
    profile
        .sections
        .iter()
        .filter(|section| section_pattern.matches(&section.title))
        .flat_map(|section| section.entries.iter())
        .find(|entry| entry_pattern.matches(&entry.name))
        .map(|entry| entry.values.to_string())
        .unwrap_or_default()
}

/// The profiled host's reported name
pub fn headline(profile: &Profile) -> String {
    find_entry_value(profile, HEADLINE_SECTION_PATTERN, HEADLINE_ENTRY_PATTERN)
}
