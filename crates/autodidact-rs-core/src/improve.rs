//! Improvement actions and the applier that runs them.

use crate::error::CoreError;
use crate::messages;
use autodidact_rs_protocol::{ImprovementDetails, ImprovementKind, ImprovementOutcome};
use log::{info, warn};

/// Handler run for one improvement kind.
///
/// Handlers only record that they ran; no source file is modified.
pub trait ImprovementAction: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Run the action.
    fn apply(&self) -> Result<(), CoreError>;
}

struct AsyncPatterns;
struct TypeHints;
struct EnumerateLoops;
struct ConstLet;
struct ArrowFunctions;
struct CssVariables;

macro_rules! logging_action {
    ($ty:ident, $name:literal) => {
        impl ImprovementAction for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn apply(&self) -> Result<(), CoreError> {
                info!("applying improvement (action={})", $name);
                Ok(())
            }
        }
    };
}

logging_action!(AsyncPatterns, "async_patterns");
logging_action!(TypeHints, "type_hints");
logging_action!(EnumerateLoops, "enumerate_loops");
logging_action!(ConstLet, "const_let");
logging_action!(ArrowFunctions, "arrow_functions");
logging_action!(CssVariables, "css_variables");

/// Handler for `kind`.
pub fn action_for(kind: ImprovementKind) -> &'static dyn ImprovementAction {
    match kind {
        ImprovementKind::AddAsyncFunctions => &AsyncPatterns,
        ImprovementKind::AddTypeHints => &TypeHints,
        ImprovementKind::UseEnumerate => &EnumerateLoops,
        ImprovementKind::ReplaceVarWithConstLet => &ConstLet,
        ImprovementKind::UseArrowFunctions => &ArrowFunctions,
        ImprovementKind::AddCssVariables => &CssVariables,
    }
}

type ActionRef = &'static dyn ImprovementAction;
type Resolver = Box<dyn Fn(ImprovementKind) -> ActionRef + Send + Sync>;

/// Runs improvement actions and aggregates their results.
pub struct ImprovementApplier {
    resolve: Resolver,
}

impl Default for ImprovementApplier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ImprovementApplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImprovementApplier").finish_non_exhaustive()
    }
}

impl ImprovementApplier {
    /// Applier using the built-in handler for each kind.
    pub fn new() -> Self {
        Self::with_resolver(action_for)
    }

    /// Applier with a custom kind-to-handler mapping.
    pub fn with_resolver<F>(resolve: F) -> Self
    where
        F: Fn(ImprovementKind) -> ActionRef + Send + Sync + 'static,
    {
        Self {
            resolve: Box::new(resolve),
        }
    }

    /// Run the handler for every kind, in order, without deduplication.
    pub fn apply(&self, kinds: &[ImprovementKind]) -> ImprovementOutcome {
        let mut details = ImprovementDetails::default();
        for &kind in kinds {
            let action = (self.resolve)(kind);
            match action.apply() {
                Ok(()) => details.applied.push(kind),
                Err(err) => {
                    warn!("improvement failed (action={}): {err}", action.name());
                    details.errors.push(messages::apply_error(kind, &err));
                }
            }
        }
        let message = messages::apply_summary(details.applied.len(), details.errors.len());
        info!(
            "improvements applied (applied={}, errors={})",
            details.applied.len(),
            details.errors.len()
        );
        ImprovementOutcome {
            success: !details.applied.is_empty(),
            message,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ImprovementAction, ImprovementApplier, action_for};
    use crate::error::CoreError;
    use autodidact_rs_protocol::ImprovementKind;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    struct Broken;

    impl ImprovementAction for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn apply(&self) -> Result<(), CoreError> {
            Err(CoreError::Action("disk full".to_string()))
        }
    }

    #[test]
    fn every_kind_has_a_distinct_handler() {
        let names: HashSet<&str> = ImprovementKind::ALL
            .into_iter()
            .map(|kind| action_for(kind).name())
            .collect();
        assert_eq!(names.len(), ImprovementKind::ALL.len());
    }

    #[test]
    fn empty_input_is_not_a_success() {
        let outcome = ImprovementApplier::new().apply(&[]);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Применено улучшений: 0, ошибок: 0");
        assert!(outcome.details.applied.is_empty());
    }

    #[test]
    fn duplicates_are_applied_twice() {
        let kinds = [ImprovementKind::AddTypeHints, ImprovementKind::AddTypeHints];
        let outcome = ImprovementApplier::new().apply(&kinds);
        assert!(outcome.success);
        assert_eq!(outcome.details.applied, kinds.to_vec());
        assert_eq!(outcome.message, "Применено улучшений: 2, ошибок: 0");
    }

    #[test]
    fn failures_are_collected_with_label() {
        let applier = ImprovementApplier::with_resolver(|kind| match kind {
            ImprovementKind::AddCssVariables => &Broken as &'static dyn ImprovementAction,
            other => action_for(other),
        });
        let outcome = applier.apply(&[
            ImprovementKind::AddCssVariables,
            ImprovementKind::UseArrowFunctions,
        ]);
        assert!(outcome.success);
        assert_eq!(outcome.details.applied, vec![ImprovementKind::UseArrowFunctions]);
        assert_eq!(
            outcome.details.errors,
            vec!["Ошибка при применении Добавить CSS переменные: disk full".to_string()]
        );
        assert_eq!(outcome.message, "Применено улучшений: 1, ошибок: 1");
    }
}
