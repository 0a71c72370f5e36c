//! Error predicates for get hydrates
//!
//! PokéAPI answers an unknown name with a 404 and a plain-text `Not Found`
//! body. Clients that decode that body as JSON surface a decode error
//! instead of a status, so besides the typed 404 we also match known
//! message fragments.
//!
//! Matching on message text is brittle: any change to an upstream error
//! string silently turns "no row" back into a query failure. Prefer the
//! typed status check and keep the fragment list short.

use crate::error::Error;
use std::sync::Arc;

/// Decides whether a get error means "no row" rather than a failure
pub type ErrorPredicate = Arc<dyn Fn(&Error) -> bool + Send + Sync>;

/// Decode error produced by clients that parse the `Not Found` body as JSON
pub const MALFORMED_NOT_FOUND_MESSAGE: &str =
    "invalid character 'N' looking for beginning of value";

/// Treat 404s and errors containing any of `messages` as not found
pub fn not_found_error<I, S>(messages: I) -> ErrorPredicate
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let messages: Vec<String> = messages
        .into_iter()
        .map(Into::into)
        .filter(|m| !m.is_empty())
        .collect();

    Arc::new(move |err: &Error| {
        if err.status() == Some(404) {
            return true;
        }
        let text = err.to_string();
        messages.iter().any(|m| text.contains(m.as_str()))
    })
}
