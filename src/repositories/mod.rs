pub(crate) mod health;
pub(crate) mod student_modules;
