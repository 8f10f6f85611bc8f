//! URL matching
//!
//! Scheme first, then the `file` and extension special cases, then host and
//! effective port.

use std::borrow::Cow;

use url::Url;

use crate::pattern::Pattern;
use crate::types::{EXTENSION_SCHEME, FILE_SCHEME};
use crate::url::{effective_port, effective_url, host_str, is_sub_domain_or_equal, trim_ending_dot};

impl Pattern {
    /// Check whether `url` is matched by this pattern.
    ///
    /// Nested-scheme URLs (`filesystem:`) are matched through their inner URL.
    pub fn matches(&self, url: &Url) -> bool {
        let Some(parts) = self.parts() else {
            return false;
        };

        let url = effective_url(url);

        if !parts.is_scheme_wildcard && parts.scheme != url.scheme() {
            return false;
        }

        // Host and port mean nothing for file patterns
        if parts.has_scheme(FILE_SCHEME) {
            return parts.is_path_wildcard || parts.path == url.path();
        }

        let host = trim_ending_dot(host_str(&url));
        // Extension URLs are not special to the URL parser, which keeps
        // their host case; pattern hosts are always lowercase.
        let host: Cow<'_, str> = if url.scheme() == EXTENSION_SCHEME {
            Cow::Owned(host.to_ascii_lowercase())
        } else {
            Cow::Borrowed(host)
        };
        if parts.has_domain_wildcard {
            if !is_sub_domain_or_equal(&host, &parts.host) {
                return false;
            }
        } else if parts.host != host {
            return false;
        }

        // Extension URLs carry no meaningful port
        if parts.scheme == EXTENSION_SCHEME {
            return true;
        }

        parts.is_port_wildcard || parts.port == effective_port(&url)
    }

    /// Parse `url` and match it; unparsable URLs never match.
    pub fn matches_str(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(url) => self.matches(&url),
            Err(e) => {
                log::trace!("not matching unparsable url {url:?}: {e}");
                false
            }
        }
    }
}
