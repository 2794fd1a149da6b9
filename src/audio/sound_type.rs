//! Notification sound selector.

use serde::{Deserialize, Deserializer, Serialize};

/// The ten notification sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundType {
    /// Plain sine beep.
    #[default]
    Classic,
    /// Deep chime with an overtone.
    Bell,
    /// High square beep-beep-beep.
    Digital,
    /// Chirping frequency slide.
    Bird,
    /// Two plucked triangle notes.
    Piano,
    /// Fast square arpeggio.
    Arcade,
    /// Sci-fi sawtooth slide down.
    Future,
    /// Soft staggered chord.
    Breeze,
    /// Major fanfare.
    Success,
    /// Pulsing alarm.
    Alert,
}

impl SoundType {
    pub const ALL: [SoundType; 10] = [
        SoundType::Classic,
        SoundType::Bell,
        SoundType::Digital,
        SoundType::Bird,
        SoundType::Piano,
        SoundType::Arcade,
        SoundType::Future,
        SoundType::Breeze,
        SoundType::Success,
        SoundType::Alert,
    ];

    /// Identifier used in config files.
    pub fn id(self) -> &'static str {
        match self {
            SoundType::Classic => "classic",
            SoundType::Bell => "bell",
            SoundType::Digital => "digital",
            SoundType::Bird => "bird",
            SoundType::Piano => "piano",
            SoundType::Arcade => "arcade",
            SoundType::Future => "future",
            SoundType::Breeze => "breeze",
            SoundType::Success => "success",
            SoundType::Alert => "alert",
        }
    }

    /// Name shown in the settings picker.
    pub fn label(self) -> &'static str {
        match self {
            SoundType::Classic => "Classic",
            SoundType::Bell => "Zen Bell",
            SoundType::Digital => "Digital",
            SoundType::Bird => "Bird",
            SoundType::Piano => "Piano",
            SoundType::Arcade => "Arcade",
            SoundType::Future => "Sci-Fi",
            SoundType::Breeze => "Breeze",
            SoundType::Success => "Success",
            SoundType::Alert => "Alert",
        }
    }

    /// Parses an identifier, falling back to [`SoundType::Classic`] for
    /// anything unrecognised.
    pub fn from_id(id: &str) -> Self {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.id().eq_ignore_ascii_case(id))
            .unwrap_or_default()
    }
}

impl std::str::FromStr for SoundType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_id(s))
    }
}

impl<'de> Deserialize<'de> for SoundType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Ok(Self::from_id(&id))
    }
}

impl std::fmt::Display for SoundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
