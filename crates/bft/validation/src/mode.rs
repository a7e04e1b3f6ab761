use std::{fmt, str::FromStr};

/// How deeply a header is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeaderValidationMode {
    /// Run every registered rule.
    #[default]
    Full,
    /// Run only detached rules that opt into light validation.
    Light,
}

impl fmt::Display for HeaderValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("full"),
            Self::Light => f.write_str("light"),
        }
    }
}

impl FromStr for HeaderValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "light" => Ok(Self::Light),
            other => Err(format!("unknown validation mode `{other}`")),
        }
    }
}
