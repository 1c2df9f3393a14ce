//! Improvement kinds and their user-facing labels.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Closed set of improvements the scanner can report.
///
/// Each variant serializes as [`ImprovementKind::label`], which is also the
/// text shown in chat responses and stored in history records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImprovementKind {
    /// Python file defines functions but never uses async/await.
    AddAsyncFunctions,
    /// Python file defines functions without any return annotation.
    AddTypeHints,
    /// Python file iterates with `range(len(..))`.
    UseEnumerate,
    /// Script file declares variables with `var`.
    ReplaceVarWithConstLet,
    /// Script file uses `function(` expressions.
    UseArrowFunctions,
    /// Stylesheet has no `:root` custom-property block.
    AddCssVariables,
}

impl ImprovementKind {
    /// Every variant, in scanner check order.
    pub const ALL: [ImprovementKind; 6] = [
        ImprovementKind::AddAsyncFunctions,
        ImprovementKind::AddTypeHints,
        ImprovementKind::UseEnumerate,
        ImprovementKind::ReplaceVarWithConstLet,
        ImprovementKind::UseArrowFunctions,
        ImprovementKind::AddCssVariables,
    ];

    /// Localized label for the improvement.
    pub fn label(self) -> &'static str {
        match self {
            ImprovementKind::AddAsyncFunctions => "Добавить асинхронные функции",
            ImprovementKind::AddTypeHints => "Добавить type hints",
            ImprovementKind::UseEnumerate => "Заменить на enumerate() или прямую итерацию",
            ImprovementKind::ReplaceVarWithConstLet => "Заменить var на const/let",
            ImprovementKind::UseArrowFunctions => "Использовать arrow functions",
            ImprovementKind::AddCssVariables => "Добавить CSS переменные",
        }
    }
}

impl fmt::Display for ImprovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a label does not name any known improvement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownImprovement(pub String);

impl fmt::Display for UnknownImprovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown improvement: {}", self.0)
    }
}

impl std::error::Error for UnknownImprovement {}

impl FromStr for ImprovementKind {
    type Err = UnknownImprovement;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ImprovementKind::ALL
            .into_iter()
            .find(|kind| kind.label() == value)
            .ok_or_else(|| UnknownImprovement(value.to_string()))
    }
}

impl Serialize for ImprovementKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ImprovementKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
