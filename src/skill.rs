//! Skill pointers and their browsable links.
//!
//! A skill pointer names the rule that produced an answer. Pointers into the
//! server tree, the skill data repository or an etherpad dream are rewritten
//! into URLs a human can open.

use serde::{Deserialize, Serialize};

/// Prefix of skills loaded from an etherpad dream.
pub const DREAM_PREFIX: &str = "/kumar_server/file:/";

/// Prefix of skills bundled with the server.
pub const SERVER_PREFIX: &str = "/kumar_server";

/// Prefix of skills from the skill data repository.
pub const SKILL_DATA_PREFIX: &str = "/kumar_skill_data";

/// Label put in front of dream names in recalled `skill` observations.
pub const DREAM_LABEL: &str = "Etherpad Dream: ";

/// Link bases for skill pointers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillLinks {
    /// Base for dream pads; the dream name is appended.
    pub dream_base: String,
    /// Base for server-tree skills; the path after the prefix is appended.
    pub server_repo_base: String,
    /// Base for skill-data skills; the path after the prefix is appended.
    pub skill_data_repo_base: String,
}

impl Default for SkillLinks {
    fn default() -> Self {
        Self {
            dream_base: "http://dream.kumar.ai/p/".to_string(),
            server_repo_base: "https://github.com/fossasia/kumar_server/blob/development".to_string(),
            skill_data_repo_base: "https://github.com/fossasia/kumar_skill_data/blob/master"
                .to_string(),
        }
    }
}

impl SkillLinks {
    /// Maps a skill pointer to a URL; unknown pointers are returned unchanged.
    ///
    /// Prefixes are tested in order: dream, server tree, skill data.
    #[must_use]
    pub fn link(&self, skill_path: &str) -> String {
        if let Some(name) = skill_path.strip_prefix(DREAM_PREFIX) {
            return format!("{}{name}", self.dream_base);
        }
        if let Some(rest) = skill_path.strip_prefix(SERVER_PREFIX) {
            return format!("{}{rest}", self.server_repo_base);
        }
        if let Some(rest) = skill_path.strip_prefix(SKILL_DATA_PREFIX) {
            return format!("{}{rest}", self.skill_data_repo_base);
        }
        skill_path.to_string()
    }
}

/// Maps a skill pointer to a URL using the default link bases.
///
/// # Examples
///
/// ```
/// use kumarmind::skill_link;
///
/// assert_eq!(skill_link("/kumar_server/file:/foo/bar"), "http://dream.kumar.ai/p/foo/bar");
/// assert_eq!(skill_link("arbitrary/path"), "arbitrary/path");
/// ```
#[must_use]
pub fn skill_link(skill_path: &str) -> String {
    SkillLinks::default().link(skill_path)
}

/// The `skill` observation recalled for a pointer.
#[must_use]
pub fn skill_label(skill_path: &str) -> String {
    match skill_path.strip_prefix(DREAM_PREFIX) {
        Some(name) => format!("{DREAM_LABEL}{name}"),
        None => skill_path.to_string(),
    }
}
