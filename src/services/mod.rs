pub(crate) mod callback_url;
pub(crate) mod course_keys;
pub(crate) mod documents;
pub(crate) mod gradebook;
pub(crate) mod submissions_api;
pub(crate) mod xqueue_submission;
