//! Resource clients
//!
//! Borrowed views over a [`HetznerDnsClient`](crate::HetznerDnsClient), one per
//! API resource. Each operation builds its label and path, runs the request
//! through the client and decodes the answer.

mod primary_server;
mod record;
mod zone;

pub use primary_server::PrimaryServerApi;
pub use record::RecordApi;
pub use zone::ZoneApi;

use crate::error::{HetznerError, Result};

/// Reject an empty identifier before it turns `/zones/{id}` into `/zones/`.
pub(crate) fn require_id(operation: &str, param: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HetznerError::InvalidParameter {
            operation: operation.to_string(),
            param: param.to_string(),
            detail: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// How a name lookup treats several exact matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Matching {
    /// Several matches are an error.
    Unique,
    /// Several matches are fine, the first one wins.
    First,
}

/// Pick the entry named exactly `name` out of a listing.
///
/// An empty listing and a listing without the name are different failures:
/// the first usually means a wrong parent, the second a wrong name.
pub(crate) fn select_by_name<T>(
    operation: &str,
    name: &str,
    listed: Vec<T>,
    name_of: impl Fn(&T) -> &str,
    matching: Matching,
) -> Result<T> {
    pick(operation, name, listed, name_of, matching).inspect_err(HetznerError::log)
}

fn pick<T>(
    operation: &str,
    name: &str,
    listed: Vec<T>,
    name_of: impl Fn(&T) -> &str,
    matching: Matching,
) -> Result<T> {
    if listed.is_empty() {
        return Err(HetznerError::EmptyListing {
            operation: operation.to_string(),
            name: name.to_string(),
        });
    }

    let total = listed.len();
    let mut matches: Vec<T> = listed
        .into_iter()
        .filter(|item| name_of(item) == name)
        .collect();

    match (matches.len(), matching) {
        (0, _) => Err(HetznerError::NoExactMatch {
            operation: operation.to_string(),
            name: name.to_string(),
            listed: total,
        }),
        (1, _) | (_, Matching::First) => Ok(matches.swap_remove(0)),
        (count, Matching::Unique) => Err(HetznerError::AmbiguousName {
            operation: operation.to_string(),
            name: name.to_string(),
            matches: count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn blank_id_is_rejected() {
        assert!(require_id("get zone ", "id", "").is_err());
        assert!(require_id("get zone  ", "id", "  ").is_err());
        assert!(require_id("get zone 1", "id", "1").is_ok());
    }

    #[test]
    fn empty_listing_and_missing_name_differ() {
        let empty = select_by_name(
            "op",
            "www",
            Vec::<String>::new(),
            String::as_str,
            Matching::First,
        );
        let missing = select_by_name(
            "op",
            "www",
            names(&["mail"]),
            String::as_str,
            Matching::First,
        );

        assert!(matches!(empty, Err(HetznerError::EmptyListing { .. })));
        assert!(matches!(
            missing,
            Err(HetznerError::NoExactMatch { listed: 1, .. })
        ));
    }

    #[test]
    fn match_is_exact() {
        let result = select_by_name(
            "op",
            "www",
            names(&["www2", "WWW", "www"]),
            String::as_str,
            Matching::Unique,
        );
        assert_eq!(result.unwrap(), "www");
    }

    #[test]
    fn duplicates_follow_matching_mode() {
        let listed = vec![("www", 1), ("www", 2)];

        let first = select_by_name("op", "www", listed.clone(), |e| e.0, Matching::First);
        assert_eq!(first.unwrap(), ("www", 1));

        let unique = select_by_name("op", "www", listed, |e| e.0, Matching::Unique);
        assert!(matches!(
            unique,
            Err(HetznerError::AmbiguousName { matches: 2, .. })
        ));
    }
}
