// Skill analysis: required-skill parsing, the three-strategy matcher,
// report rendering and the HTTP handlers that tie extraction, annotation and
// matching together.

pub mod handlers;
pub mod matcher;
pub mod report;
pub mod skills;
