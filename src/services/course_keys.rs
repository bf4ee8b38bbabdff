//! Course and block locators in the `course-v1:` / `block-v1:` format.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static COURSE_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^course-v1:([\w\-~.:]+)\+([\w\-~.:]+)\+([\w\-~.:]+)$")
        .expect("course key pattern")
});

static USAGE_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^block-v1:([\w\-~.:]+)\+([\w\-~.:]+)\+([\w\-~.:]+)\+type@([\w\-~.:]+)\+block@([\w\-~.:]+)$",
    )
    .expect("usage key pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum KeyParseError {
    #[error("invalid course key: {0:?}")]
    Course(String),
    #[error("invalid usage key: {0:?}")]
    Usage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CourseKey {
    org: String,
    course: String,
    run: String,
}

impl CourseKey {
    pub(crate) fn parse(value: &str) -> Result<Self, KeyParseError> {
        let captures =
            COURSE_KEY_RE.captures(value).ok_or_else(|| KeyParseError::Course(value.to_string()))?;
        Ok(Self {
            org: captures[1].to_string(),
            course: captures[2].to_string(),
            run: captures[3].to_string(),
        })
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "course-v1:{}+{}+{}", self.org, self.course, self.run)
    }
}

impl FromStr for CourseKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A block inside a course run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct UsageKey {
    course_key: CourseKey,
    block_type: String,
    block_id: String,
}

impl UsageKey {
    pub(crate) fn parse(value: &str) -> Result<Self, KeyParseError> {
        let captures =
            USAGE_KEY_RE.captures(value).ok_or_else(|| KeyParseError::Usage(value.to_string()))?;
        Ok(Self {
            course_key: CourseKey {
                org: captures[1].to_string(),
                course: captures[2].to_string(),
                run: captures[3].to_string(),
            },
            block_type: captures[4].to_string(),
            block_id: captures[5].to_string(),
        })
    }

    pub(crate) fn block_type(&self) -> &str {
        &self.block_type
    }

    pub(crate) fn block_id(&self) -> &str {
        &self.block_id
    }

    pub(crate) fn course_key(&self) -> &CourseKey {
        &self.course_key
    }
}

impl fmt::Display for UsageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "block-v1:{}+{}+{}+type@{}+block@{}",
            self.course_key.org,
            self.course_key.course,
            self.course_key.run,
            self.block_type,
            self.block_id
        )
    }
}

impl FromStr for UsageKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
