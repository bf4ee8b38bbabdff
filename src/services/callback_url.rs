use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static BLOCK_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"block@([^/]+)").expect("block id pattern"));
static ITEM_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"type@([^+]+)").expect("item type pattern"));
static COURSE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(course-v1:[^/]+)").expect("course id pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The callback_url is not valid (missing {}): {url}", .missing.join(", "))]
pub(crate) struct InvalidCallbackUrl {
    pub(crate) url: String,
    pub(crate) missing: Vec<&'static str>,
}

/// Identifiers embedded in an LMS score-update callback URL. Each is the first
/// match in the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CallbackIdentifiers {
    pub(crate) block_id: String,
    pub(crate) item_type: String,
    pub(crate) course_id: String,
}

impl CallbackIdentifiers {
    pub(crate) fn parse(url: &str) -> Result<Self, InvalidCallbackUrl> {
        let block_id = first_capture(&BLOCK_ID_RE, url);
        let item_type = first_capture(&ITEM_TYPE_RE, url);
        let course_id = first_capture(&COURSE_ID_RE, url);

        match (block_id, item_type, course_id) {
            (Some(block_id), Some(item_type), Some(course_id)) => {
                Ok(Self { block_id, item_type, course_id })
            }
            (block_id, item_type, course_id) => {
                let missing = [
                    (block_id.is_none(), "block@"),
                    (item_type.is_none(), "type@"),
                    (course_id.is_none(), "course-v1:"),
                ]
                .into_iter()
                .filter_map(|(absent, token)| absent.then_some(token))
                .collect();
                Err(InvalidCallbackUrl { url: url.to_string(), missing })
            }
        }
    }

    /// Fully qualified block locator, e.g.
    /// `block-v1:org+course+run+type@problem+block@item_id`.
    pub(crate) fn block_locator(&self) -> String {
        let course_part = self.course_id.strip_prefix("course-v1:").unwrap_or(&self.course_id);
        format!("block-v1:{course_part}+type@{}+block@{}", self.item_type, self.block_id)
    }
}

fn first_capture(pattern: &Regex, haystack: &str) -> Option<String> {
    pattern.captures(haystack).map(|captures| captures[1].to_string())
}
