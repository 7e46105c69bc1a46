#![forbid(unsafe_code)]

//! In-memory lookup tables built once per chart.
//!
//! Both indexes are loaded from externally supplied lists at chart
//! construction and never modified afterwards. A rebuild of the chart
//! (re-root, depth change) reuses the same indexes; only a new chart
//! instance reloads data.

use std::collections::HashMap;

use crate::person::{Person, PersonId};

/// A child's link to its parents. Either side may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParentLink {
    /// Father id, if recorded.
    pub father: Option<PersonId>,
    /// Mother id, if recorded.
    pub mother: Option<PersonId>,
}

impl ParentLink {
    /// Link with both parents recorded.
    pub fn both(father: impl Into<PersonId>, mother: impl Into<PersonId>) -> Self {
        Self {
            father: Some(father.into()),
            mother: Some(mother.into()),
        }
    }

    /// Link with only a father recorded.
    pub fn father_only(father: impl Into<PersonId>) -> Self {
        Self {
            father: Some(father.into()),
            mother: None,
        }
    }

    /// Link with only a mother recorded.
    pub fn mother_only(mother: impl Into<PersonId>) -> Self {
        Self {
            father: None,
            mother: Some(mother.into()),
        }
    }
}

/// Lookup of person records by id.
#[derive(Debug, Clone, Default)]
pub struct PersonIndex {
    persons: HashMap<PersonId, Person>,
}

impl PersonIndex {
    /// Build the index from a list of records.
    ///
    /// On duplicate ids the last record wins, matching how the store's
    /// export overwrites rows.
    pub fn from_persons(persons: impl IntoIterator<Item = Person>) -> Self {
        let persons = persons
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect::<HashMap<_, _>>();
        Self { persons }
    }

    /// Look up a record regardless of visibility.
    #[must_use]
    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.persons.get(id)
    }

    /// Look up a record, treating hidden persons as absent.
    ///
    /// This is the lookup the layout uses: a hidden person never occupies
    /// a slot.
    #[must_use]
    pub fn visible(&self, id: &PersonId) -> Option<&Person> {
        self.persons.get(id).filter(|p| !p.hidden)
    }

    /// Whether any record (hidden or not) exists for the id.
    #[must_use]
    pub fn contains(&self, id: &PersonId) -> bool {
        self.persons.contains_key(id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    /// Whether the index holds no records at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}

/// Lookup from a child id to its parent link.
#[derive(Debug, Clone, Default)]
pub struct ParentLinkIndex {
    links: HashMap<PersonId, ParentLink>,
}

impl ParentLinkIndex {
    /// Build the index from `(child, link)` pairs. Last link per child wins.
    pub fn from_links(links: impl IntoIterator<Item = (PersonId, ParentLink)>) -> Self {
        Self {
            links: links.into_iter().collect(),
        }
    }

    /// The parent link for a child, if any was recorded.
    #[must_use]
    pub fn parents_of(&self, child: &PersonId) -> Option<&ParentLink> {
        self.links.get(child)
    }

    /// Number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether no links were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::Sex;

    fn index() -> PersonIndex {
        PersonIndex::from_persons([
            Person::new("1", "Root", Sex::Male),
            Person::new("2", "Father", Sex::Male),
            Person::new("3", "Mother", Sex::Female).hidden(),
        ])
    }

    #[test]
    fn visible_filters_hidden() {
        let idx = index();
        assert!(idx.get(&"3".into()).is_some());
        assert!(idx.visible(&"3".into()).is_none());
        assert!(idx.visible(&"2".into()).is_some());
        assert!(idx.visible(&"99".into()).is_none());
    }

    #[test]
    fn duplicate_ids_last_wins() {
        let idx = PersonIndex::from_persons([
            Person::new("1", "First", Sex::Male),
            Person::new("1", "Second", Sex::Female),
        ]);
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.get(&"1".into()).unwrap().name, "Second");
    }

    #[test]
    fn parents_of_unknown_child_is_none() {
        let links = ParentLinkIndex::from_links([("1".into(), ParentLink::both("2", "3"))]);
        assert!(links.parents_of(&"2".into()).is_none());
        let link = links.parents_of(&"1".into()).unwrap();
        assert_eq!(link.father.as_ref().unwrap().as_str(), "2");
        assert_eq!(link.mother.as_ref().unwrap().as_str(), "3");
    }

    #[test]
    fn partial_links() {
        let link = ParentLink::father_only("7");
        assert!(link.mother.is_none());
        let link = ParentLink::mother_only("8");
        assert!(link.father.is_none());
        assert_eq!(ParentLink::default(), ParentLink { father: None, mother: None });
    }
}
