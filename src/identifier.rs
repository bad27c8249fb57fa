//! Assignment identifier parsing.
//!
//! An identifier names one student's submission target as
//! `org/template-submitter`. The segment after the slash is split on its
//! **last** hyphen: the submitter is the final hyphen-delimited token and the
//! template name is everything before it (template names may themselves
//! contain hyphens, submitter names may not end up with trailing ones).

use std::sync::OnceLock;

use regex::Regex;

use crate::errors::Error;

/// Full identifier grammar. Each hyphen must sit between alphanumerics;
/// template names may additionally contain `.` and `_`.
const GRAMMAR: &str =
    r"^[A-Za-z0-9]+(-?[A-Za-z0-9]+)*/[A-Za-z0-9._]+-[A-Za-z0-9]+(-?[A-Za-z0-9]+)*$";

fn grammar() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(GRAMMAR).unwrap())
}

/// A validated `org/template-submitter` identifier.
///
/// Constructed once per run via [`Identifier::parse`] and immutable after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    org: String,
    template: String,
    submitter: String,
}

impl Identifier {
    /// Parse and validate an identifier string.
    ///
    /// # Errors
    /// Returns [`Error::InvalidIdentifier`] naming the exact offending string
    /// if it does not match the grammar.
    pub fn parse(identifier: &str) -> Result<Self, Error> {
        if !grammar().is_match(identifier) {
            return Err(Error::InvalidIdentifier(identifier.to_string()));
        }

        // Both separators are guaranteed by the grammar.
        let (org, assignment) = identifier.split_once('/').unwrap();
        let (template, submitter) = assignment.rsplit_once('-').unwrap();

        Ok(Self {
            org: org.to_string(),
            template: template.to_string(),
            submitter: submitter.to_string(),
        })
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn submitter(&self) -> &str {
        &self.submitter
    }

    /// Repository path of the instructor-maintained assignment template.
    pub fn template_repo(&self) -> String {
        format!("{}/{}", self.org, self.template)
    }

    /// Repository path of the per-student assignment repository.
    pub fn student_repo(&self) -> String {
        format!("{}/{}-{}", self.org, self.template, self.submitter)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}-{}", self.org, self.template, self.submitter)
    }
}
