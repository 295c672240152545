//! Signatures of user agents that mishandle `SameSite=None`.
//!
//! Rules run in table order and the first one that reports a broken client
//! wins. A user agent that matches no rule (including the empty string) is
//! compatible.
//!
//! Digit classes are spelled `[0-9]` so only ASCII digits are captured.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Which signature disqualified a user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrokenRule {
    /// Chrome or Chrome on iOS before 67.
    ChromeBefore67,
    /// Any browser on iOS before 13.
    IosBefore13,
    /// Safari on macOS 10.14.
    MacOs1014Safari,
    /// Embedded WebKit views on macOS 10.14.
    MacOs1014EmbeddedWebKit,
    /// UC Browser 12.13.2.
    UcBrowser12_13_2,
}

impl BrokenRule {
    pub fn id(&self) -> &'static str {
        match self {
            BrokenRule::ChromeBefore67 => "chrome-before-67",
            BrokenRule::IosBefore13 => "ios-before-13",
            BrokenRule::MacOs1014Safari => "macos-10.14-safari",
            BrokenRule::MacOs1014EmbeddedWebKit => "macos-10.14-embedded-webkit",
            BrokenRule::UcBrowser12_13_2 => "ucbrowser-12.13.2",
        }
    }
}

impl fmt::Display for BrokenRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

static CHROME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(CriOS|Chrome)/([0-9]*)").expect("valid chrome pattern"));
static IOS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"iP.+; CPU .*OS ([0-9]+)_[0-9]").expect("valid ios pattern"));
static MACOS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Macintosh;.*Mac OS X ([0-9]+)_([0-9]+)_.*AppleWebKit")
        .expect("valid macos pattern")
});
static MACOS_SAFARI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Version/.* Safari/").expect("valid safari pattern"));
static MACOS_EMBEDDED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"AppleWebKit/[.0-9]+ \(KHTML, like Gecko\)").expect("valid webkit pattern")
});
static UC_BROWSER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"UCBrowser/([0-9]+)\.([0-9]+)\.([0-9]+)").expect("valid ucbrowser pattern")
});

type Rule = fn(&str) -> Option<BrokenRule>;

/// Evaluation order.
const RULES: [Rule; 4] = [chrome, ios, macos_10_14, uc_browser];

/// First rule that reports `user_agent` as broken, if any.
pub fn first_broken_rule(user_agent: &str) -> Option<BrokenRule> {
    RULES.iter().find_map(|rule| rule(user_agent))
}

fn chrome(user_agent: &str) -> Option<BrokenRule> {
    let caps = CHROME.captures(user_agent)?;
    (version_number(&caps[2]) < 67).then_some(BrokenRule::ChromeBefore67)
}

fn ios(user_agent: &str) -> Option<BrokenRule> {
    let caps = IOS.captures(user_agent)?;
    (version_number(&caps[1]) < 13).then_some(BrokenRule::IosBefore13)
}

fn macos_10_14(user_agent: &str) -> Option<BrokenRule> {
    let caps = MACOS.captures(user_agent)?;
    if version_number(&caps[1]) != 10 || version_number(&caps[2]) != 14 {
        return None;
    }
    if MACOS_SAFARI.is_match(user_agent) {
        return Some(BrokenRule::MacOs1014Safari);
    }
    if MACOS_EMBEDDED.is_match(user_agent) {
        return Some(BrokenRule::MacOs1014EmbeddedWebKit);
    }
    None
}

fn uc_browser(user_agent: &str) -> Option<BrokenRule> {
    let caps = UC_BROWSER.captures(user_agent)?;
    let version = (
        version_number(&caps[1]),
        version_number(&caps[2]),
        version_number(&caps[3]),
    );
    (version == (12, 13, 2)).then_some(BrokenRule::UcBrowser12_13_2)
}

/// Numeric value of a captured digit run. No digits reads as 0; a run too
/// long for u64 saturates.
fn version_number(digits: &str) -> u64 {
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}
