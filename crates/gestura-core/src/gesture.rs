//! Gesture kinds and the phases they emit.

use crate::error::GestureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported gesture kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    /// Single click
    Click,
    /// Double click
    Dblclick,
    /// Context menu: right click or touch long-press
    Menu,
    /// Mouse or touch drag
    Drag,
}

impl GestureKind {
    /// Every gesture kind.
    pub const ALL: [Self; 4] = [Self::Click, Self::Dblclick, Self::Menu, Self::Drag];

    /// Lowercase gesture name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Dblclick => "dblclick",
            Self::Menu => "menu",
            Self::Drag => "drag",
        }
    }

    /// Phases this gesture emits.
    #[must_use]
    pub const fn phases(self) -> &'static [Phase] {
        match self {
            Self::Click | Self::Dblclick | Self::Menu => &[Phase::Default],
            Self::Drag => &[Phase::Start, Phase::Move, Phase::End],
        }
    }

    /// Check whether this gesture emits `phase`.
    pub fn emits(self, phase: Phase) -> bool {
        self.phases().contains(&phase)
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GestureKind {
    type Err = GestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GestureError::UnknownGesture(s.to_string()))
    }
}

/// Named phase of a gesture firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// The only phase of single-shot gestures
    Default,
    /// Drag started
    Start,
    /// Drag moved
    Move,
    /// Drag ended
    End,
}

impl Phase {
    /// Every phase.
    pub const ALL: [Self; 4] = [Self::Default, Self::Start, Self::Move, Self::End];

    /// Lowercase phase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Start => "start",
            Self::Move => "move",
            Self::End => "end",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Phase names are matched case-insensitively.
impl FromStr for Phase {
    type Err = GestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GestureError::UnknownPhase(s.to_string()))
    }
}
