//! Identifier types for the forum.
//!
//! Every id is an opaque string. The engine mints fresh ids from an
//! [`IdGenerator`]; commands carry caller-supplied ids verbatim, so an id may be
//! empty and emptiness is checked wherever a command requires a reference.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use ulid::Ulid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Return the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether this is the empty id.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<Ulid> for $name {
            fn from(ulid: Ulid) -> Self {
                Self(ulid.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// A user identifier.
    UserId
);

string_id!(
    /// A subreddit identifier.
    SubredditId
);

string_id!(
    /// A post identifier.
    PostId
);

string_id!(
    /// A comment identifier.
    CommentId
);

string_id!(
    /// A direct message identifier.
    MessageId
);

string_id!(
    /// The target of a vote: either a post id or a comment id.
    ///
    /// Resolution order is posts first, then comments.
    TargetId
);

/// Mints unique, time-ordered ids.
///
/// Backed by a monotonic ULID generator: a millisecond timestamp plus 80 random
/// bits, incremented (not re-randomized) when two ids fall in the same
/// millisecond. Ids minted by one generator are therefore distinct and sort in
/// creation order.
pub struct IdGenerator {
    inner: ulid::Generator,
}

impl IdGenerator {
    /// Create a new generator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: ulid::Generator::new(),
        }
    }

    /// Mint the next id.
    pub fn next_id<T: From<Ulid>>(&mut self) -> T {
        // Overflow only happens after 2^80 ids in one millisecond.
        let ulid = self.inner.generate().unwrap_or_else(|_| Ulid::new());
        T::from(ulid)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator").finish_non_exhaustive()
    }
}
