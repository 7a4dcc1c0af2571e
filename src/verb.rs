//! Verb tables: which HTTP method each resource operation binds to, on
//! which route, and with which success status.

use axum::http::{Method, StatusCode};
use axum::routing::MethodFilter;

/// One mountable resource operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `GET` on the collection route.
    List,
    /// `POST` on the collection route.
    Create,
    /// `PUT` on the collection route.
    UpdateAll,
    /// `DELETE` on the collection route.
    DeleteAll,
    /// `GET` on the item route.
    Detail,
    /// `PUT` on the item route.
    Update,
    /// `DELETE` on the item route.
    Delete,
}

/// Which of the two generated routes a verb lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The collection route (`<path>`).
    Collection,
    /// The item route (`<path>/{pk}`).
    Item,
}

impl Verb {
    /// Every verb, in collection-then-item order.
    pub const ALL: [Self; 7] = [
        Self::List,
        Self::Create,
        Self::UpdateAll,
        Self::DeleteAll,
        Self::Detail,
        Self::Update,
        Self::Delete,
    ];

    /// Route the verb is registered on.
    #[must_use]
    pub const fn mode(self) -> Mode {
        match self {
            Self::List | Self::Create | Self::UpdateAll | Self::DeleteAll => Mode::Collection,
            Self::Detail | Self::Update | Self::Delete => Mode::Item,
        }
    }

    /// HTTP method the verb answers to.
    #[must_use]
    pub fn http_method(self) -> Method {
        match self {
            Self::List | Self::Detail => Method::GET,
            Self::Create => Method::POST,
            Self::UpdateAll | Self::Update => Method::PUT,
            Self::DeleteAll | Self::Delete => Method::DELETE,
        }
    }

    /// Method filter used when registering the verb on a route.
    #[must_use]
    pub const fn method_filter(self) -> MethodFilter {
        match self {
            Self::List | Self::Detail => MethodFilter::GET,
            Self::Create => MethodFilter::POST,
            Self::UpdateAll | Self::Update => MethodFilter::PUT,
            Self::DeleteAll | Self::Delete => MethodFilter::DELETE,
        }
    }

    /// Status returned when the operation succeeds.
    #[must_use]
    pub const fn success_status(self) -> StatusCode {
        match self {
            Self::List | Self::Detail => StatusCode::OK,
            Self::Create => StatusCode::CREATED,
            Self::UpdateAll | Self::Update => StatusCode::ACCEPTED,
            Self::DeleteAll | Self::Delete => StatusCode::NO_CONTENT,
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Small set of [`Verb`]s, used to report which operations a mount wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerbSet(u8);

impl VerbSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Adds a verb to the set.
    pub fn insert(&mut self, verb: Verb) {
        self.0 |= verb.bit();
    }

    /// Returns `true` if the verb is present.
    #[must_use]
    pub const fn contains(self, verb: Verb) -> bool {
        self.0 & verb.bit() != 0
    }

    /// Number of verbs in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if no verbs are present.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the verbs present, in [`Verb::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Verb> {
        Verb::ALL.into_iter().filter(move |verb| self.contains(*verb))
    }
}

impl FromIterator<Verb> for VerbSet {
    fn from_iter<I: IntoIterator<Item = Verb>>(iter: I) -> Self {
        let mut set = Self::empty();
        for verb in iter {
            set.insert(verb);
        }
        set
    }
}
