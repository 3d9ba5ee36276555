use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

pub const EXTENSION_MARKER: &str = "доб.";

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\+?[78][^0-9]?([0-9]{3})[^0-9]?-?([0-9]{3})[^0-9]?([0-9]{2})[^0-9]?([0-9]{2})[^0-9]*([0-9]*)",
    )
    .expect("phone pattern is valid")
});

/// Digit groups of a recognized `+7` number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneParts {
    pub area: String,
    pub exchange: String,
    pub part1: String,
    pub part2: String,
    pub extension: Option<String>,
}

impl fmt::Display for PhoneParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "+7({}){}-{}-{}",
            self.area, self.exchange, self.part1, self.part2
        )?;
        if let Some(extension) = &self.extension {
            write!(f, " {} {}", EXTENSION_MARKER, extension)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneParse<'a> {
    Matched(PhoneParts),
    Unmatched(&'a str),
}

impl PhoneParse<'_> {
    pub fn is_match(&self) -> bool {
        matches!(self, PhoneParse::Matched(_))
    }

    pub fn parts(&self) -> Option<&PhoneParts> {
        match self {
            PhoneParse::Matched(parts) => Some(parts),
            PhoneParse::Unmatched(_) => None,
        }
    }

    pub fn into_canonical(self) -> String {
        match self {
            PhoneParse::Matched(parts) => parts.to_string(),
            PhoneParse::Unmatched(raw) => raw.to_string(),
        }
    }
}

/// Splits `raw` into digit groups when it looks like a Russian number
/// (`+7`/`8` prefix followed by ten digits and an optional extension).
/// Only the leading match is considered; anything after the extension
/// digits is ignored.
pub fn parse_phone(raw: &str) -> PhoneParse<'_> {
    let Some(caps) = PHONE_PATTERN.captures(raw) else {
        return PhoneParse::Unmatched(raw);
    };

    let group = |idx: usize| {
        caps.get(idx)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    };
    let extension = group(5);

    PhoneParse::Matched(PhoneParts {
        area: group(1),
        exchange: group(2),
        part1: group(3),
        part2: group(4),
        extension: if extension.is_empty() {
            None
        } else {
            Some(extension)
        },
    })
}

/// Rewrites `raw` into `+7(AAA)BBB-CC-DD[ доб. N]`, or hands it back
/// untouched when it does not look like a phone number.
pub fn normalize_phone(raw: &str) -> String {
    parse_phone(raw).into_canonical()
}
