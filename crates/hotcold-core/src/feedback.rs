//! Turning a rank into a temperature.
//!
//! | condition            | tier       |
//! |----------------------|------------|
//! | rank 1               | `Best`     |
//! | rank 2 or 3          | `TopTier`  |
//! | top 20% (inclusive)  | `Hot`      |
//! | top 40%              | `Warm`     |
//! | top 60%              | `Cool`     |
//! | top 80%              | `Cold`     |
//! | otherwise            | `IceCold`  |
//!
//! The first matching row wins.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Qualitative closeness of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// The single closest word.
    Best,
    /// Second or third closest.
    TopTier,
    /// Within the top 20%.
    Hot,
    /// Within the top 40%.
    Warm,
    /// Within the top 60%.
    Cool,
    /// Within the top 80%.
    Cold,
    /// Everything else.
    IceCold,
}

impl Tier {
    /// Emoji shown next to the rank.
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Best | Self::TopTier | Self::Hot => "🔥",
            Self::Warm => "🌤",
            Self::Cool => "🧊",
            Self::Cold | Self::IceCold => "❄️",
        }
    }

    /// Message shown to the player.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Best => "INCREDIBLE! You found the #1 closest word!",
            Self::TopTier => "SO HOT! You're in the top 3!",
            Self::Hot => "HOT! Top 20%!",
            Self::Warm => "WARM! Getting closer...",
            Self::Cool => "COOL... Keep trying",
            Self::Cold => "COLD... Not quite there",
            Self::IceCold => "ICE COLD... Very different meaning",
        }
    }

    /// Kebab-case name, as serialized.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::TopTier => "top-tier",
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Cold => "cold",
            Self::IceCold => "ice-cold",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feedback for one ranked guess.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Feedback {
    /// The tier the rank falls in.
    pub tier: Tier,
    /// Emoji for the tier.
    pub emoji: &'static str,
    /// Player-facing message for the tier.
    pub message: &'static str,
    /// `rank / total * 100`.
    pub percentile: f64,
}

/// Classify `rank` out of `total` ranked words.
///
/// Requires `1 <= rank <= total`; anything else is
/// [`GameError::InvalidRank`].
pub fn classify(rank: usize, total: usize) -> GameResult<Feedback> {
    if rank == 0 || total == 0 || rank > total {
        return Err(GameError::InvalidRank { rank, total });
    }

    // Integer comparison keeps the percentage boundaries exact.
    let within = |percent: u128| (rank as u128) * 100 <= (total as u128) * percent;

    let tier = if rank == 1 {
        Tier::Best
    } else if rank <= 3 {
        Tier::TopTier
    } else if within(20) {
        Tier::Hot
    } else if within(40) {
        Tier::Warm
    } else if within(60) {
        Tier::Cool
    } else if within(80) {
        Tier::Cold
    } else {
        Tier::IceCold
    };

    Ok(Feedback {
        tier,
        emoji: tier.emoji(),
        message: tier.message(),
        percentile: rank as f64 / total as f64 * 100.0,
    })
}
