use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::matcher::AnalysisResult;
use crate::analysis::skills::SkillPhrase;

pub const SUITABLE_MESSAGE: &str = "The CV matches all required skills!";
pub const NOT_SUITABLE_MESSAGE: &str = "The CV is missing some required skills.";

/// Human-readable rendering of an `AnalysisResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Comma-joined identified skills.
    pub identified: String,
    /// Comma-joined missing skills.
    pub missing: String,
    /// Coverage to two decimals, e.g. `"33.33%"`.
    pub coverage: String,
    pub verdict: String,
}

pub fn render_report(result: &AnalysisResult) -> AnalysisReport {
    AnalysisReport {
        identified: join_skills(&result.identified_skills),
        missing: join_skills(&result.missing_skills),
        coverage: format!("{:.2}%", result.coverage_percentage),
        verdict: if result.is_suitable {
            SUITABLE_MESSAGE.to_string()
        } else {
            NOT_SUITABLE_MESSAGE.to_string()
        },
    }
}

fn join_skills(skills: &BTreeSet<SkillPhrase>) -> String {
    skills
        .iter()
        .map(SkillPhrase::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
