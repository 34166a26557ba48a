//! Closed string enumerations shared across the service.
//!
//! Every enum serializes as its SCREAMING_SNAKE_CASE wire name and parses
//! back from that same name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a wire name matches no enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: '{value}'")]
pub struct ParseEnumError {
    /// Name of the enum being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [Self] = &[$( Self::$variant ),+];

            /// Wire name of the variant.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(Self::$variant), )+
                    _ => Err(ParseEnumError {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// Risk classification for users and recommendations.
    RiskLevel {
        /// Conservative.
        Low => "LOW",
        /// Moderate.
        Medium => "MEDIUM",
        /// Aggressive.
        High => "HIGH",
    }
}

wire_enum! {
    /// Self-reported investing experience.
    ExperienceLevel {
        /// New investor.
        Beginner => "BEGINNER",
        /// Some market experience.
        Intermediate => "INTERMEDIATE",
        /// Experienced investor.
        Advanced => "ADVANCED",
    }
}

wire_enum! {
    /// Lifecycle of a recommendation.
    RecommendationStatus {
        /// Open and tracked.
        Active => "ACTIVE",
        /// Closed out.
        Completed => "COMPLETED",
        /// Withdrawn before completion.
        Cancelled => "CANCELLED",
    }
}

wire_enum! {
    /// Action a recommendation suggests.
    RecommendationType {
        /// Open or add to a position.
        Buy => "BUY",
        /// Reduce or close a position.
        Sell => "SELL",
        /// Keep the current position.
        Hold => "HOLD",
    }
}

wire_enum! {
    /// Historical pattern a recommendation was matched against.
    PatternType {
        /// Sustained earnings growth.
        EarningsGrowth => "EARNINGS_GROWTH",
        /// Rebound after a drawdown.
        RecoveryPlay => "RECOVERY_PLAY",
        /// Price breakout from a range.
        Breakout => "BREAKOUT",
        /// Rising dividend payouts.
        DividendGrowth => "DIVIDEND_GROWTH",
        /// Trend continuation.
        Momentum => "MOMENTUM",
    }
}

wire_enum! {
    /// Kind of analysis that produced a result.
    AnalysisType {
        /// Investor relations announcement analysis.
        IrAnalysis => "IR_ANALYSIS",
        /// Risk assessment.
        RiskAssessment => "RISK_ASSESSMENT",
        /// Factor correlation analysis.
        Correlation => "CORRELATION",
        /// Historical pattern matching.
        PatternMatch => "PATTERN_MATCH",
    }
}
