//! Per-window icon lookup and title clean-up.

use crate::tree::Node;
use globset::{Glob, GlobMatcher};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One icon rule as written in the config file.
///
/// `match` is `class=<glob>`, `name=<glob>`, or `*` for anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRule {
    #[serde(rename = "match")]
    pub pattern: String,
    pub icon: String,
}

impl IconRule {
    pub fn new(pattern: &str, icon: &str) -> Self {
        Self {
            pattern: pattern.into(),
            icon: icon.into(),
        }
    }
}

/// Error from compiling an icon rule.
#[derive(Debug, thiserror::Error)]
pub enum IconRuleError {
    #[error("icon rule {0:?}: expected `class=<glob>`, `name=<glob>` or `*`")]
    Syntax(String),
    #[error("icon rule {pattern:?}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

#[derive(Debug)]
enum Matcher {
    Any,
    Class(GlobMatcher),
    Name(GlobMatcher),
}

impl Matcher {
    fn parse(pattern: &str) -> Result<Self, IconRuleError> {
        if pattern.trim() == "*" {
            return Ok(Matcher::Any);
        }
        let (key, glob) = pattern
            .split_once('=')
            .ok_or_else(|| IconRuleError::Syntax(pattern.into()))?;
        let compiled = Glob::new(glob.trim())
            .map_err(|source| IconRuleError::Glob {
                pattern: pattern.into(),
                source,
            })?
            .compile_matcher();
        match key.trim() {
            "class" => Ok(Matcher::Class(compiled)),
            "name" => Ok(Matcher::Name(compiled)),
            _ => Err(IconRuleError::Syntax(pattern.into())),
        }
    }

    fn matches(&self, window: &Node) -> bool {
        match self {
            Matcher::Any => true,
            Matcher::Class(glob) => window.class_name().is_some_and(|c| glob.is_match(c)),
            Matcher::Name(glob) => glob.is_match(window.title()),
        }
    }
}

/// Ordered icon rules; the first matching rule wins.
#[derive(Debug, Default)]
pub struct IconResolver {
    rules: Vec<(Matcher, String)>,
}

impl IconResolver {
    pub fn new(rules: &[IconRule]) -> Result<Self, IconRuleError> {
        let rules = rules
            .iter()
            .map(|rule| Ok((Matcher::parse(&rule.pattern)?, rule.icon.clone())))
            .collect::<Result<_, IconRuleError>>()?;
        Ok(Self { rules })
    }

    pub fn resolve(&self, window: &Node) -> Option<&str> {
        self.rules
            .iter()
            .find(|(matcher, _)| matcher.matches(window))
            .map(|(_, icon)| icon.as_str())
    }
}

/// Built-in icon rules (Nerd Font code points).
pub fn default_icon_rules() -> Vec<IconRule> {
    vec![
        IconRule::new("class=*.slack.com", "\u{f3ef}"),
        IconRule::new("class=Chromium", "\u{e743}"),
        IconRule::new("class=Firefox", "\u{f738}"),
        IconRule::new("class=URxvt", "\u{e795}"),
        IconRule::new("class=Code", "\u{e70c}"),
        IconRule::new("class=code-oss-dev", "\u{e70c}"),
        IconRule::new("name=mutt", "\u{f199}"),
        IconRule::new("*", "\u{faae}"),
    ]
}

/// Built-in per-class strings stripped from window titles.
pub fn default_formatters() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([
        ("Chromium".to_string(), vec![" - Chromium".to_string()]),
        ("Firefox".to_string(), vec![" - Mozilla Firefox".to_string()]),
        ("URxvt".to_string(), vec!["$USER@$HOST: ".to_string()]),
    ])
}

/// Remove the strings configured for the window's class from its title.
pub fn format_title(window: &Node, formatters: &BTreeMap<String, Vec<String>>) -> String {
    let mut title = window.title().to_string();
    if let Some(strip) = window.class_name().and_then(|c| formatters.get(c)) {
        for s in strip.iter().filter(|s| !s.is_empty()) {
            title = title.replace(s.as_str(), "");
        }
    }
    title
}

/// Cut `title` to at most `budget` characters, marking the cut with `...`
/// when there is room for it.
pub fn truncate(title: &str, budget: usize) -> String {
    if title.chars().count() <= budget {
        return title.to_string();
    }
    if budget > 3 {
        let mut cut: String = title.chars().take(budget - 3).collect();
        cut.push_str("...");
        cut
    } else {
        title.chars().take(budget).collect()
    }
}
