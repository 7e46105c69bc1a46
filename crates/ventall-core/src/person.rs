#![forbid(unsafe_code)]

//! Person records and identifiers.

use std::fmt;

/// Opaque person identifier.
///
/// Ids come from the host's data store and are stable for the lifetime of a
/// chart. They are not required to be numeric: synthetic and imported
/// records commonly carry ids like `"X-104"` or `"gedcom:I42"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonId(String);

impl PersonId {
    /// Create an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for PersonId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Biological sex as recorded by the data store.
///
/// The numeric codes (male = 0, female = 1, unknown = 2) are a fixed
/// project-wide contract shared with the store and the rendering host; they
/// must not drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sex {
    /// Code 0.
    Male,
    /// Code 1.
    Female,
    /// Code 2 (also the decode fallback for out-of-range codes).
    #[default]
    Unknown,
}

impl Sex {
    /// Decode from the store's numeric convention.
    ///
    /// Unrecognized codes decode to [`Sex::Unknown`] rather than failing:
    /// malformed imports are common and must not abort a layout pass.
    #[inline]
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Sex::Male,
            1 => Sex::Female,
            _ => Sex::Unknown,
        }
    }

    /// Encode to the store's numeric convention.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Sex::Male => 0,
            Sex::Female => 1,
            Sex::Unknown => 2,
        }
    }
}

/// An immutable person record.
///
/// Owned by the external data store and merely referenced during layout.
/// `birth` and `death` are free-form strings (a raw date expression and/or
/// a place); the label planner extracts year runs from them without parsing
/// dates properly.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    /// Stable identifier.
    pub id: PersonId,
    /// Display name.
    pub name: String,
    /// Recorded sex.
    pub sex: Sex,
    /// Free-form birth text (date expression and/or place).
    pub birth: Option<String>,
    /// Free-form death text.
    pub death: Option<String>,
    /// Birth place when the store carries it separately.
    pub birth_place: Option<String>,
    /// A hidden person is treated as absent for layout purposes.
    pub hidden: bool,
}

impl Person {
    /// Create a visible person with no event data.
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>, sex: Sex) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sex,
            birth: None,
            death: None,
            birth_place: None,
            hidden: false,
        }
    }

    /// Set the free-form birth text.
    #[must_use]
    pub fn with_birth(mut self, birth: impl Into<String>) -> Self {
        self.birth = Some(birth.into());
        self
    }

    /// Set the free-form death text.
    #[must_use]
    pub fn with_death(mut self, death: impl Into<String>) -> Self {
        self.death = Some(death.into());
        self
    }

    /// Set the birth place.
    #[must_use]
    pub fn with_birth_place(mut self, place: impl Into<String>) -> Self {
        self.birth_place = Some(place.into());
        self
    }

    /// Mark the person as hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}
