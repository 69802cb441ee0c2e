//! Suggested `utm_content` tags of the form `{S}{n}{ABBR}{m}`.
//!
//! `S` is the first letter of the source, `n` is one more than the number of
//! links already made for that source, `ABBR` is the source type
//! abbreviation and `m` is one more than the number of links already made for
//! that source and source type. For source "instagram" with two existing
//! links, none of them "Paid Social" (PS), the suggestion is `I3PS1`.
//!
//! This is a pre-filled suggestion only. Two people preparing links for the
//! same pair at the same time get the same tag; uniqueness is enforced on the
//! final UTM URL, not here.

use crate::models::{SourceType, UtmRecord};

/// A previously generated link, seen through the two columns the generator counts.
pub trait Assignment {
    fn source(&self) -> &str;
    fn source_type(&self) -> &str;
}

impl Assignment for UtmRecord {
    fn source(&self) -> &str {
        &self.source
    }

    fn source_type(&self) -> &str {
        &self.source_type
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentCounts {
    pub for_source: usize,
    pub for_pair: usize,
}

fn same(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Count existing links for `source`, and for `source` paired with the
/// source type named `source_type`. Comparisons ignore case and padding.
pub fn count_assignments<'a, A, I>(source: &str, source_type: &str, assignments: I) -> AssignmentCounts
where
    A: Assignment + 'a,
    I: IntoIterator<Item = &'a A>,
{
    assignments
        .into_iter()
        .filter(|a| same(a.source(), source))
        .fold(AssignmentCounts::default(), |mut counts, a| {
            counts.for_source += 1;
            if same(a.source_type(), source_type) {
                counts.for_pair += 1;
            }
            counts
        })
}

/// Format a tag from precomputed counts. Returns `None` when the source has
/// no alphanumeric character to take a letter from.
pub fn format_identifier(source: &str, abbr: &str, counts: AssignmentCounts) -> Option<String> {
    let initial = source.trim().chars().find(|c| c.is_alphanumeric())?;
    let initial: String = initial.to_uppercase().collect();

    Some(format!(
        "{}{}{}{}",
        initial,
        counts.for_source + 1,
        abbr.trim(),
        counts.for_pair + 1
    ))
}

/// Pick the source type a request refers to. `wanted` is tried as an exact
/// id first, then as a name belonging to `source`. Types are per source, so
/// two sources may each have a "Paid Social" with different abbreviations.
pub fn resolve_source_type<'a>(source_types: &'a [SourceType], source: &str, wanted: &str) -> Option<&'a SourceType> {
    let wanted = wanted.trim();
    source_types
        .iter()
        .find(|t| t.source_type_id == wanted)
        .or_else(|| {
            source_types
                .iter()
                .find(|t| same(&t.name, wanted) && same(&t.source, source))
        })
}

/// Suggest the next tag for `source` and `source_type` given every link made so far.
pub fn suggest_identifier<'a, A, I>(source: &str, source_type: &SourceType, assignments: I) -> Option<String>
where
    A: Assignment + 'a,
    I: IntoIterator<Item = &'a A>,
{
    let counts = count_assignments(source, &source_type.name, assignments);
    format_identifier(source, &source_type.abbr, counts)
}
