// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resource name templates.
//!
//! Resource names follow templates such as
//! `customers/{customer_id}/adGroupAds/{ad_group_id}~{ad_id}`. A template is a
//! sequence of literal text and named variables. Rendering substitutes the
//! variables, parsing recovers them.
//!
//! Parsing compiles the template to an anchored regular expression with one
//! lazy `(?P<name>.+?)` group per variable.

use regex::Regex;

/// An error in a path template, or in the values used to render it.
#[derive(Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("unbalanced braces in template `{0}`")]
    UnbalancedBraces(String),
    #[error("empty variable name in template `{0}`")]
    EmptyVariable(String),
    #[error("invalid variable name `{1}` in template `{0}`")]
    InvalidVariable(String, String),
    #[error("cannot compile template `{0}`: {1}")]
    Pattern(String, String),
    #[error("adjacent variables without a separator in template `{0}`")]
    AdjacentVariables(String),
    #[error("expected {expected} values, got {got}")]
    ValueCount { expected: usize, got: usize },
}

#[derive(Clone, Debug, PartialEq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// A parsed resource name template.
///
/// # Example
/// ```
/// # use google_ads_gax_internal::path_template::PathTemplate;
/// let template = PathTemplate::new("customers/{customer_id}/campaigns/{campaign_id}")?;
/// let name = template.render(&["123", "456"])?;
/// assert_eq!(name, "customers/123/campaigns/456");
/// let values = template.parse(&name).unwrap();
/// assert_eq!(values, vec![("customer_id", "123"), ("campaign_id", "456")]);
/// # Ok::<(), google_ads_gax_internal::path_template::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct PathTemplate {
    template: String,
    segments: Vec<Segment>,
    matcher: Regex,
}

impl PathTemplate {
    /// Parses `template`.
    pub fn new<T: Into<String>>(template: T) -> Result<Self, Error> {
        let template = template.into();
        let segments = segments(&template)?;
        let pattern = segments.iter().fold(String::from("^"), |mut p, s| {
            match s {
                Segment::Literal(l) => p.push_str(&regex::escape(l)),
                Segment::Variable(v) => p.push_str(&format!("(?P<{v}>.+?)")),
            };
            p
        });
        let matcher = Regex::new(&(pattern + "$"))
            .map_err(|e| Error::Pattern(template.clone(), e.to_string()))?;
        Ok(Self {
            template,
            segments,
            matcher,
        })
    }

    /// The template as written.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The variable names, in order of appearance.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Variable(v) => Some(v.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitutes `values`, in order, for the template variables.
    ///
    /// Values are inserted verbatim, no escaping takes place.
    pub fn render<S: AsRef<str>>(&self, values: &[S]) -> Result<String, Error> {
        let expected = self.variables().count();
        if values.len() != expected {
            return Err(Error::ValueCount {
                expected,
                got: values.len(),
            });
        }
        let mut values = values.iter();
        let mut out = String::with_capacity(self.template.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(l) => out.push_str(l),
                Segment::Variable(_) => {
                    if let Some(v) = values.next() {
                        out.push_str(v.as_ref());
                    }
                }
            }
        }
        Ok(out)
    }

    /// Matches `path` against the template.
    ///
    /// Returns the variable names and their values, or `None` if the path does
    /// not match. Each variable matches a non-empty string. When more than
    /// one split is possible the earlier variables match the shortest
    /// strings.
    pub fn parse<'p>(&self, path: &'p str) -> Option<Vec<(&str, &'p str)>> {
        let captures = self.matcher.captures(path)?;
        self.variables()
            .map(|name| captures.name(name).map(|m| (name, m.as_str())))
            .collect()
    }

    /// Returns true if `path` matches the template.
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

impl PartialEq for PathTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.template)
    }
}

fn segments(template: &str) -> Result<Vec<Segment>, Error> {
    let mut segments = Vec::new();
    let mut rest = template;
    while !rest.is_empty() {
        match rest.find(['{', '}']) {
            None => {
                segments.push(Segment::Literal(rest.to_string()));
                rest = "";
            }
            Some(i) if rest[i..].starts_with('}') => {
                return Err(Error::UnbalancedBraces(template.to_string()));
            }
            Some(i) => {
                if i > 0 {
                    segments.push(Segment::Literal(rest[..i].to_string()));
                }
                let close = rest[i..]
                    .find('}')
                    .ok_or_else(|| Error::UnbalancedBraces(template.to_string()))?;
                let name = &rest[i + 1..i + close];
                if name.is_empty() {
                    return Err(Error::EmptyVariable(template.to_string()));
                }
                if name.contains('{') {
                    return Err(Error::UnbalancedBraces(template.to_string()));
                }
                if !valid_name(name) {
                    return Err(Error::InvalidVariable(
                        template.to_string(),
                        name.to_string(),
                    ));
                }
                if matches!(segments.last(), Some(Segment::Variable(_))) {
                    return Err(Error::AdjacentVariables(template.to_string()));
                }
                segments.push(Segment::Variable(name.to_string()));
                rest = &rest[i + close + 1..];
            }
        }
    }
    Ok(segments)
}

// Variables become capture group names.
fn valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
