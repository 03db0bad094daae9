use super::*;

use std::str::FromStr;
use tracing::warn;

pub const THEME_KEY: &str = "theme";

/// Visual theme preference, persisted per workspace. Has no effect on any data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Aurora,
    Oceanic,
    Industrial,
    Frost,
}

impl Default for Theme {
    fn default() -> Self {
        Self::Aurora
    }
}

impl Theme {
    pub const ALL: [Theme; 4] = [Self::Aurora, Self::Oceanic, Self::Industrial, Self::Frost];

    pub fn name(self) -> &'static str {
        match self {
            Self::Aurora => "aurora",
            Self::Oceanic => "oceanic",
            Self::Industrial => "industrial",
            Self::Frost => "frost",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Aurora => "Midnight Aurora",
            Self::Oceanic => "Oceanic Mist",
            Self::Industrial => "Industrial Slate",
            Self::Frost => "Minimalist Frost",
        }
    }

    /// The stored preference. Missing or unknown values give the default theme.
    pub fn load<S: Storage>(storage: &S) -> Result<Self> {
        match storage.read(THEME_KEY)? {
            Some(name) => Ok(name.trim().parse().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring stored theme");
                Self::default()
            })),
            None => Ok(Self::default()),
        }
    }

    pub fn save<S: Storage>(self, storage: &S) -> Result<()> {
        storage.write(THEME_KEY, self.name())?;
        Ok(())
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|theme| theme.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownTheme {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
