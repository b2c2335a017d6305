//! Module dedicated to PGP user ids.
//!
//! A user id is the `name <email>` string attached to a key. Parsing
//! splits on the first `<` and the last `>`.

use std::fmt;

use crate::{Error, Result};

/// A parsed `name <email>` user id.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserIdentity {
    pub name: String,
    pub email: String,
}

impl UserIdentity {
    pub fn new(name: impl ToString, email: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    /// Parses a `name <email>` string.
    ///
    /// Fails with [`Error::MalformedUserId`] when the angle brackets are
    /// absent or inverted. An empty name or empty email is accepted
    /// verbatim (`" <email>"`, `"name <>"`), mirroring what the formatter
    /// produces for such ids.
    ///
    /// Whitespace around the name part is trimmed, so a name padded with
    /// spaces does not survive a format/parse round trip unchanged.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self> {
        let raw = raw.as_ref();
        let start = raw
            .find('<')
            .ok_or_else(|| Error::MalformedUserId(raw.to_owned()))?;
        let end = raw
            .rfind('>')
            .filter(|end| *end > start)
            .ok_or_else(|| Error::MalformedUserId(raw.to_owned()))?;

        Ok(Self {
            name: raw[..start].trim().to_owned(),
            email: raw[start + 1..end].to_owned(),
        })
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
