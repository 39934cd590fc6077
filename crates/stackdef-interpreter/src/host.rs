//! Host OS family detection
//!
//! OS family tags combine a family name with the major release, e.g.
//! `redhat7`, `ubuntu16`, `suse12`. They are derived from `/etc/os-release`.

use std::path::Path;
use tracing::debug;

pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Map an os-release `ID` (or `ID_LIKE` entry) to a family name
fn family_for_id(id: &str) -> Option<&'static str> {
    match id {
        "rhel" | "centos" | "rocky" | "almalinux" | "ol" | "redhat" => Some("redhat"),
        "amzn" => Some("amazonlinux"),
        "ubuntu" => Some("ubuntu"),
        "debian" => Some("debian"),
        "sles" | "sled" | "opensuse" | "opensuse-leap" | "suse" => Some("suse"),
        _ => None,
    }
}

fn unquote(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '"' || c == '\'')
}

/// Derive the family tag from the contents of an os-release file
pub fn os_family_from_release(content: &str) -> Option<String> {
    let mut id = None;
    let mut id_like = None;
    let mut version_id = None;

    for line in content.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        match key {
            "ID" => id = Some(unquote(value).to_ascii_lowercase()),
            "ID_LIKE" => id_like = Some(unquote(value).to_ascii_lowercase()),
            "VERSION_ID" => version_id = Some(unquote(value).to_string()),
            _ => {}
        }
    }

    let family = id
        .as_deref()
        .and_then(family_for_id)
        .or_else(|| {
            id_like
                .as_deref()?
                .split_whitespace()
                .find_map(family_for_id)
        })?;

    let major = version_id?
        .split('.')
        .next()
        .filter(|major| !major.is_empty() && major.bytes().all(|b| b.is_ascii_digit()))?
        .to_string();

    Some(format!("{}{}", family, major))
}

/// Family tag of the current host, if it can be determined
pub fn detect_os_family() -> Option<String> {
    detect_os_family_from(Path::new(OS_RELEASE_PATH))
}

pub fn detect_os_family_from(path: &Path) -> Option<String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Cannot read os-release");
            return None;
        }
    };
    let family = os_family_from_release(&content);
    debug!(path = %path.display(), family = ?family, "Detected OS family");
    family
}
