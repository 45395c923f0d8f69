//! Evaluation traces.
//!
//! A trace records every check the evaluator made, in order. Authoring
//! tools use it to show rule designers exactly which rows fired.

use serde::{Deserialize, Serialize};

use crate::core::{GroupId, RuleRowId};
use crate::rules::Clause;

use super::decision::Decision;

/// One check made during evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceStep {
    /// An exclusion clause was checked.
    ExclusionChecked {
        /// Storage row id.
        row: RuleRowId,
        /// The clause.
        clause: Clause,
        /// Did it match (and therefore deny the class)?
        matched: bool,
    },

    /// A prerequisite clause was checked.
    ClauseChecked {
        /// Group the clause belongs to.
        group: GroupId,
        /// Storage row id.
        row: RuleRowId,
        /// The clause.
        clause: Clause,
        /// Was it satisfied?
        satisfied: bool,
    },

    /// All clauses of a group were checked.
    GroupResolved {
        /// Group number.
        group: GroupId,
        /// Were all its clauses satisfied?
        satisfied: bool,
    },
}

/// A decision together with the checks that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// The outcome.
    pub decision: Decision,
    /// Every check, in evaluation order.
    pub trace: Vec<TraceStep>,
}

/// Receives trace steps from the evaluator.
///
/// Steps are built lazily so untraced evaluation does no extra work.
pub(crate) trait Tracer {
    fn record(&mut self, step: impl FnOnce() -> TraceStep);
}

/// Discards every step.
pub(crate) struct NoTrace;

impl Tracer for NoTrace {
    #[inline]
    fn record(&mut self, _step: impl FnOnce() -> TraceStep) {}
}

impl Tracer for Vec<TraceStep> {
    fn record(&mut self, step: impl FnOnce() -> TraceStep) {
        self.push(step());
    }
}
