#![forbid(unsafe_code)]

//! Label planning for occupied slots.
//!
//! Arc length per wedge shrinks as generations double while radius grows
//! linearly, so outer rings get a tighter character budget and lose their
//! secondary "years" line entirely. Truncation respects grapheme
//! boundaries - a name is never cut inside an emoji or combining sequence.
//!
//! Planning is pure and is recomputed for every occupied slot on every
//! rebuild.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use ventall_core::{Person, Sector};

/// Ellipsis appended to truncated names.
const ELLIPSIS: &str = "…";

/// Tuned label constants.
///
/// Defaults reproduce the reference chart. The budgets are display columns
/// (wide CJK glyphs count double), which tracks arc length better than raw
/// character counts for mixed-script names.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelConfig {
    /// Name budget for generations below `far_generation`.
    pub near_budget: usize,
    /// Name budget from `far_generation` outward.
    pub far_budget: usize,
    /// First generation that uses the far budget.
    pub far_generation: u8,
    /// Last generation that still shows the years line.
    pub years_max_generation: u8,
    /// Rotation clamp in degrees; past near-vertical, upright text reads
    /// better than rotated text.
    pub rotation_clamp_degrees: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            near_budget: 22,
            far_budget: 18,
            far_generation: 4,
            years_max_generation: 5,
            rotation_clamp_degrees: 55.0,
        }
    }
}

impl LabelConfig {
    /// Name budget for a generation.
    #[inline]
    #[must_use]
    pub fn budget(&self, generation: u8) -> usize {
        if generation < self.far_generation {
            self.near_budget
        } else {
            self.far_budget
        }
    }
}

/// The planned label for one occupied slot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotLabel {
    /// Display name, possibly truncated with an ellipsis.
    pub name: String,
    /// Set exactly when the source name exceeded the budget.
    pub truncated: bool,
    /// Secondary years line (`1884–1951`, `*1884`, or `†1951`), absent for
    /// outer generations and for persons with no extractable year.
    pub years: Option<String>,
    /// Text rotation: the wedge mid-angle in degrees, clamped.
    pub rotation_degrees: f32,
}

/// Plans labels for occupied slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelPlanner {
    config: LabelConfig,
}

impl LabelPlanner {
    /// Planner with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Planner with an adjusted configuration.
    #[must_use]
    pub fn with_config(config: LabelConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Plan the label for an occupied slot.
    ///
    /// Callers skip unoccupied slots; an empty wedge carries no label.
    #[must_use]
    pub fn plan(&self, person: &Person, sector: Sector, generation: u8) -> SlotLabel {
        let budget = self.config.budget(generation);
        let (name, truncated) = truncate_name(&person.name, budget);

        let years = if generation <= self.config.years_max_generation {
            years_line(person.birth.as_deref(), person.death.as_deref())
        } else {
            None
        };

        let clamp = self.config.rotation_clamp_degrees;
        let rotation_degrees = sector.mid_angle().to_degrees().clamp(-clamp, clamp);

        SlotLabel {
            name,
            truncated,
            years,
            rotation_degrees,
        }
    }
}

/// Truncate a name to a display-column budget on grapheme boundaries,
/// appending an ellipsis when anything was cut.
fn truncate_name(name: &str, budget: usize) -> (String, bool) {
    if name.width() <= budget {
        return (name.to_string(), false);
    }
    let ellipsis_width = ELLIPSIS.width();
    let target = budget.saturating_sub(ellipsis_width);
    let mut out = String::new();
    let mut used = 0usize;
    for grapheme in name.graphemes(true) {
        let w = grapheme.width();
        if used + w > target {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push_str(ELLIPSIS);
    (out, true)
}

/// Build the years line from the free-form birth and death texts.
///
/// Prefers a `birth–death` pair; falls back to a prefixed single year
/// (`*` for birth, `†` for death, the usual genealogy markers).
fn years_line(birth: Option<&str>, death: Option<&str>) -> Option<String> {
    let b = birth.and_then(last_year);
    let d = death.and_then(last_year);
    match (b, d) {
        (Some(b), Some(d)) => Some(format!("{b}–{d}")),
        (Some(b), None) => Some(format!("*{b}")),
        (None, Some(d)) => Some(format!("†{d}")),
        (None, None) => None,
    }
}

/// Last run of exactly four ASCII digits in a free-form date text.
///
/// Date expressions here are raw user input ("circa 1884, Girona",
/// "1951-03-08", "abans de 1900"); a trailing 4-digit run is the best
/// year guess without a real date parser. Runs longer than four digits are
/// not years and are skipped.
fn last_year(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut best: Option<&str> = None;
    let mut run_start = None;
    for (i, &b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            run_start.get_or_insert(i);
        } else if let Some(start) = run_start.take()
            && i - start == 4
        {
            best = Some(&text[start..i]);
        }
    }
    if let Some(start) = run_start
        && bytes.len() - start == 4
    {
        best = Some(&text[start..]);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;
    use ventall_core::Sex;

    fn planner() -> LabelPlanner {
        LabelPlanner::new()
    }

    fn person(name: &str) -> Person {
        Person::new("1", name, Sex::Unknown)
    }

    fn sector(mid: f32) -> Sector {
        Sector::new(mid - 0.1, mid + 0.1)
    }

    // --- Truncation ---

    #[test]
    fn short_name_is_untouched() {
        let label = planner().plan(&person("Anna Puig"), sector(0.0), 2);
        assert_eq!(label.name, "Anna Puig");
        assert!(!label.truncated);
    }

    #[test]
    fn near_generations_use_the_22_column_budget() {
        let name = "Bartomeua de Vilafranca";
        assert_eq!(name.chars().count(), 23);
        let label = planner().plan(&person(name), sector(0.0), 3);
        assert!(label.truncated);
        assert!(label.name.ends_with(ELLIPSIS));
        assert!(label.name.width() <= 22);
    }

    #[test]
    fn far_generations_use_the_18_column_budget() {
        let name = "Josep Maria Serrat"; // 18 columns: fits at g<4, exact at g>=4
        let near = planner().plan(&person(name), sector(0.0), 3);
        assert!(!near.truncated);
        let far = planner().plan(&person(name), sector(0.0), 4);
        assert!(!far.truncated, "exactly at budget is not an overflow");

        let longer = "Josep Maria Serrats";
        let far = planner().plan(&person(longer), sector(0.0), 4);
        assert!(far.truncated);
        assert!(far.name.width() <= 18);
    }

    #[test]
    fn truncation_respects_grapheme_boundaries() {
        // The family emoji is a single ZWJ grapheme; it must never be split.
        let name = "👨‍👩‍👧 ".repeat(10);
        let label = planner().plan(&person(&name), sector(0.0), 0);
        assert!(label.truncated);
        assert!(label.name.width() <= 22);
        for g in label.name.graphemes(true) {
            assert!(g == ELLIPSIS || g == " " || g == "👨‍👩‍👧");
        }
    }

    // --- Years extraction ---

    #[test]
    fn birth_and_death_pair() {
        let p = person("X").with_birth("circa 1884, Girona").with_death("1951");
        let label = planner().plan(&p, sector(0.0), 1);
        assert_eq!(label.years.as_deref(), Some("1884–1951"));
    }

    #[test]
    fn birth_only_and_death_only_prefixes() {
        let p = person("X").with_birth("1902");
        let label = planner().plan(&p, sector(0.0), 1);
        assert_eq!(label.years.as_deref(), Some("*1902"));

        let p = person("X").with_death("mort el 1970 a Reus");
        let label = planner().plan(&p, sector(0.0), 1);
        assert_eq!(label.years.as_deref(), Some("†1970"));
    }

    #[test]
    fn last_four_digit_run_wins() {
        assert_eq!(last_year("1899, batejada 1900"), Some("1900"));
        assert_eq!(last_year("1951-03-08"), Some("1951"));
        assert_eq!(last_year("carrer 12, 1884"), Some("1884"));
    }

    #[test]
    fn non_year_digit_runs_are_skipped() {
        assert_eq!(last_year("12345"), None);
        assert_eq!(last_year("tel 600123456"), None);
        assert_eq!(last_year("els anys 30"), None);
        assert_eq!(last_year(""), None);
        assert_eq!(last_year("10000 dies, morta 1933"), Some("1933"));
    }

    #[test]
    fn years_hidden_beyond_generation_five() {
        let p = person("X").with_birth("1884").with_death("1951");
        assert!(planner().plan(&p, sector(0.0), 5).years.is_some());
        assert!(planner().plan(&p, sector(0.0), 6).years.is_none());
    }

    #[test]
    fn no_dates_no_years_line() {
        let label = planner().plan(&person("X"), sector(0.0), 1);
        assert!(label.years.is_none());
    }

    // --- Rotation ---

    #[test]
    fn rotation_follows_the_mid_angle() {
        let label = planner().plan(&person("X"), sector(0.5), 2);
        assert!((label.rotation_degrees - 0.5f32.to_degrees()).abs() < 1e-3);
    }

    #[test]
    fn rotation_is_clamped_to_55_degrees() {
        let label = planner().plan(&person("X"), sector(FRAC_PI_2 * 0.95), 2);
        assert_eq!(label.rotation_degrees, 55.0);
        let label = planner().plan(&person("X"), sector(-FRAC_PI_2 * 0.95), 2);
        assert_eq!(label.rotation_degrees, -55.0);
    }
}
