//! Parsing of schema `id` URIs and derivation of model element names.
//!
//! Follows a restricted subset of RFC 3986 ("Uniform Resource Identifier
//! (URI): Generic Syntax"): a scheme and an authority are mandatory, and the
//! path/query/fragment split assumes the well-formed `?`-before-`#` order.

use crate::error::UriError;

/// A schema `id` URI broken into its generic-syntax components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaUri {
    scheme: String,
    authority: String,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl SchemaUri {
    /// Parse a URI string into its components.
    ///
    /// # Errors
    ///
    /// Returns `UriError::MissingScheme` when the string has no `:`, and
    /// `UriError::MissingAuthority` when it has no `//`.
    pub fn parse(input: &str) -> Result<Self, UriError> {
        let colon = input.find(':').ok_or_else(|| UriError::MissingScheme {
            uri: input.to_string(),
        })?;
        let scheme = &input[..colon];

        let slashes = input.find("//").ok_or_else(|| UriError::MissingAuthority {
            uri: input.to_string(),
        })?;
        let after = &input[slashes + 2..];
        let (authority, rest) = match after.find('/') {
            Some(i) => (&after[..i], &after[i..]),
            None => (after, ""),
        };

        let query_pos = rest.find('?');
        let frag_pos = rest.find('#');
        let path_end = [query_pos, frag_pos]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(rest.len());

        let fragment = frag_pos.map(|f| rest[f + 1..].to_string());
        let query = query_pos.map(|q| {
            let end = frag_pos.filter(|f| *f > q).unwrap_or(rest.len());
            rest[q + 1..end].to_string()
        });

        Ok(SchemaUri {
            scheme: scheme.to_string(),
            authority: authority.to_string(),
            path: rest[..path_end].to_string(),
            query,
            fragment,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Last path segment with any trailing `.extension` stripped.
    ///
    /// `foo://example.com:8042/over/there.json` digests to `there`. The
    /// extension is only stripped when the `.` is not the segment's first
    /// character, so dotfile-style segments survive intact.
    pub fn digest_name(&self) -> &str {
        let last = self.path.rsplit('/').next().unwrap_or("");
        match last.rfind('.') {
            Some(i) if i > 0 => &last[..i],
            _ => last,
        }
    }

    /// Second-to-last path segment (the "folder" holding the resource), or
    /// the last segment when the path has a single segment.
    ///
    /// This is the digest used to name the concept registered for a schema
    /// document's root object.
    pub fn digest_id_name(&self) -> &str {
        let segments: Vec<&str> = self.path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.len() {
            0 => "",
            1 => segments[0],
            n => segments[n - 2],
        }
    }

    /// Last `/`-delimited segment of the fragment, or `None` when the URI has
    /// no fragment.
    pub fn digest_fragment_name(&self) -> Option<&str> {
        let fragment = self.fragment.as_deref()?;
        fragment.rsplit('/').find(|s| !s.is_empty()).or(Some(fragment))
    }
}
