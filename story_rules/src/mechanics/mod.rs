//! Game mechanics: the confusion accumulator and its presentation stages.

use serde::{Deserialize, Serialize};

/// Bounded confusion counter carried through a run.
///
/// Only ever moved by [`apply_delta`](Confusion::apply_delta); the value never
/// leaves `0..=Confusion::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Confusion(u8);

impl Confusion {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 10;

    /// Start of a run.
    pub fn calm() -> Self {
        Self(Self::MIN)
    }

    /// Add `delta` and clamp to the valid range.
    pub fn apply_delta(self, delta: i32) -> Self {
        let next = (self.0 as i64 + delta as i64).clamp(Self::MIN as i64, Self::MAX as i64);
        Self(next as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn stage(self) -> ConfusionStage {
        ConfusionStage::classify(self)
    }
}

impl TryFrom<u8> for Confusion {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX {
            Err(format!("confusion {} exceeds {}", value, Self::MAX))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<Confusion> for u8 {
    fn from(confusion: Confusion) -> Self {
        confusion.0
    }
}

/// Presentation bucket for confusion. The raw number is never shown to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfusionStage {
    /// 0-2.
    Calm,
    /// 3-5.
    Subtle,
    /// 6-8.
    Uneasy,
    /// 9-10.
    Danger,
}

impl ConfusionStage {
    pub fn classify(confusion: Confusion) -> Self {
        match confusion.value() {
            0..=2 => ConfusionStage::Calm,
            3..=5 => ConfusionStage::Subtle,
            6..=8 => ConfusionStage::Uneasy,
            _ => ConfusionStage::Danger,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfusionStage::Calm => "calm",
            ConfusionStage::Subtle => "subtle",
            ConfusionStage::Uneasy => "uneasy",
            ConfusionStage::Danger => "danger",
        }
    }
}

impl std::fmt::Display for ConfusionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
