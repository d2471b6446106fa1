//! Device prompt model and classification.
//!
//! A device's idle line carries everything the rest of the crate needs:
//! the hostname, the trailing privilege marker (`>` unprivileged, `#`
//! privileged), and an optional `(conf…)` parenthetical when the session
//! sits in a nested configuration mode.

/// Privilege level indicated by the prompt's trailing marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeMarker {
    /// `>` — restricted mode, no administrative commands available.
    Unprivileged,

    /// `#` — administrative (enable) mode.
    Privileged,
}

/// A resolved device prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Device hostname: the raw prompt minus its marker and any mode
    /// parenthetical.
    pub hostname: String,

    /// Privilege level read from the trailing marker.
    pub marker: PrivilegeMarker,

    /// The exact trailing text the device emits at an idle line. This is
    /// the delimiter the capture loop watches for.
    pub raw: String,
}

impl Prompt {
    /// Build the privileged prompt for `hostname` (`hostname#`).
    pub fn privileged(hostname: impl Into<String>) -> Self {
        let hostname = hostname.into();
        let raw = format!("{hostname}#");
        Self {
            hostname,
            marker: PrivilegeMarker::Privileged,
            raw,
        }
    }
}

/// Result of classifying a raw idle line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptClass {
    /// Prompt ends in `>`.
    Unprivileged,

    /// Prompt ends in a non-`>` marker with no configuration parenthetical.
    Privileged {
        /// Line minus its trailing marker character.
        hostname: String,
    },

    /// Prompt contains a `(conf…)` parenthetical.
    ConfigMode {
        /// Text before the first `(`.
        hostname: String,
    },

    /// Line is empty or too short to carry a hostname and a marker.
    Malformed,
}

/// Classify a raw idle prompt line.
///
/// Trailing and leading whitespace/control characters are stripped before
/// classification. Lines shorter than two characters cannot carry both a
/// hostname and a marker and classify as [`PromptClass::Malformed`].
///
/// Known limitation, kept intentionally: a hostname that itself contains
/// the substring `(conf` is indistinguishable from a real configuration
/// mode suffix with this heuristic and will classify as
/// [`PromptClass::ConfigMode`].
pub fn classify_prompt(line: &str) -> PromptClass {
    let line = line.trim_matches(|c: char| c.is_whitespace() || c.is_control());

    if line.chars().count() < 2 {
        return PromptClass::Malformed;
    }

    if line.ends_with('>') {
        return PromptClass::Unprivileged;
    }

    if line.contains("(conf") {
        // Hostname is everything before the first parenthetical
        let paren = line.find('(').unwrap_or(line.len());
        let hostname = &line[..paren];
        if hostname.is_empty() {
            return PromptClass::Malformed;
        }
        return PromptClass::ConfigMode {
            hostname: hostname.to_string(),
        };
    }

    let mut chars = line.chars();
    chars.next_back();
    PromptClass::Privileged {
        hostname: chars.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unprivileged() {
        assert_eq!(classify_prompt("router1>"), PromptClass::Unprivileged);
        assert_eq!(classify_prompt("router1> \r"), PromptClass::Unprivileged);
    }

    #[test]
    fn test_privileged() {
        assert_eq!(
            classify_prompt("router1#"),
            PromptClass::Privileged {
                hostname: "router1".to_string()
            }
        );
    }

    #[test]
    fn test_config_mode() {
        assert_eq!(
            classify_prompt("router1(config)#"),
            PromptClass::ConfigMode {
                hostname: "router1".to_string()
            }
        );
        assert_eq!(
            classify_prompt("router1(config-if)#"),
            PromptClass::ConfigMode {
                hostname: "router1".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_short_lines() {
        assert_eq!(classify_prompt(""), PromptClass::Malformed);
        assert_eq!(classify_prompt("#"), PromptClass::Malformed);
        assert_eq!(classify_prompt("  \r\n"), PromptClass::Malformed);
    }

    #[test]
    fn test_trailing_controls_stripped() {
        assert_eq!(
            classify_prompt("router1#\r"),
            PromptClass::Privileged {
                hostname: "router1".to_string()
            }
        );
    }

    #[test]
    fn test_hostname_containing_conf_is_misclassified() {
        // Documented ambiguity: this is a hostname, not a mode suffix,
        // but the heuristic cannot tell them apart.
        assert_eq!(
            classify_prompt("edge(conf-lab)#"),
            PromptClass::ConfigMode {
                hostname: "edge".to_string()
            }
        );
    }

    #[test]
    fn test_parenthetical_without_conf_is_part_of_hostname() {
        assert_eq!(
            classify_prompt("router1(standby)#"),
            PromptClass::Privileged {
                hostname: "router1(standby)".to_string()
            }
        );
    }

    #[test]
    fn test_prompt_privileged_builder() {
        let prompt = Prompt::privileged("router1");
        assert_eq!(prompt.raw, "router1#");
        assert_eq!(prompt.marker, PrivilegeMarker::Privileged);
    }
}
