//! Template catalog - grouping, listing parsing and the file/remote merge rule

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::entities::{CombatantTemplate, TemplateCategory};

/// Templates grouped by catalog category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplatesByCategory {
    pub default: Vec<CombatantTemplate>,
    pub custom: Vec<CombatantTemplate>,
}

impl TemplatesByCategory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group rows read from the remote store. Unknown category labels are
    /// grouped under `custom`.
    pub fn from_stored<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, CombatantTemplate)>,
    {
        let mut grouped = Self::new();
        for (label, template) in rows {
            grouped.push(TemplateCategory::from_label(label), template);
        }
        grouped.sort_by_name();
        grouped
    }

    pub fn get(&self, category: TemplateCategory) -> &[CombatantTemplate] {
        match category {
            TemplateCategory::Default => &self.default,
            TemplateCategory::Custom => &self.custom,
        }
    }

    fn get_mut(&mut self, category: TemplateCategory) -> &mut Vec<CombatantTemplate> {
        match category {
            TemplateCategory::Default => &mut self.default,
            TemplateCategory::Custom => &mut self.custom,
        }
    }

    pub fn push(&mut self, category: TemplateCategory, template: CombatantTemplate) {
        self.get_mut(category).push(template);
    }

    pub fn total(&self) -> usize {
        self.default.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn sort_by_name(&mut self) {
        self.default.sort_by(compare_names);
        self.custom.sort_by(compare_names);
    }

    /// Merge file-sourced and remote-sourced templates category by category.
    ///
    /// See [`merge_templates`] for the rule.
    pub fn merge(files: Self, remote: Self) -> Self {
        Self {
            default: merge_templates(files.default, remote.default),
            custom: merge_templates(files.custom, remote.custom),
        }
    }
}

/// Merge one category's templates.
///
/// Names are compared case-insensitively. The first file entry for a name
/// wins; a remote entry is only added when no entry with that name exists
/// yet. The result is sorted alphabetically by name.
///
/// # Example
///
/// ```
/// use vdm_domain::catalog::merge_templates;
/// use vdm_domain::entities::CombatantTemplate;
/// use vdm_domain::value_objects::Faction;
///
/// let file = vec![CombatantTemplate::new("Goblin", 7, Faction::Enemy, None).unwrap()];
/// let remote = vec![CombatantTemplate::new("GOBLIN", 40, Faction::Ally, None).unwrap()];
///
/// let merged = merge_templates(file, remote);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].total_hp(), 7);
/// ```
pub fn merge_templates(
    files: Vec<CombatantTemplate>,
    remote: Vec<CombatantTemplate>,
) -> Vec<CombatantTemplate> {
    let mut seen = HashSet::new();
    let mut merged: Vec<CombatantTemplate> = files
        .into_iter()
        .chain(remote)
        .filter(|template| seen.insert(template.name().fold_key()))
        .collect();
    merged.sort_by(compare_names);
    merged
}

fn compare_names(a: &CombatantTemplate, b: &CombatantTemplate) -> Ordering {
    a.name()
        .fold_key()
        .cmp(&b.name().fold_key())
        .then_with(|| a.name().as_str().cmp(b.name().as_str()))
}

/// Parse a `catalog.txt` listing into file names.
///
/// One file name per line. Blank lines and lines starting with `#` are
/// ignored; surrounding whitespace is trimmed.
pub fn parse_catalog_listing(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
