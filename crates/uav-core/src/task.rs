//! Task types and their tie-break priority.

use serde::{Deserialize, Serialize};

/// A classification of what an agent is currently trying to do.
///
/// Ordered by priority ascending; [`TaskType::priority`] gives the tie-break
/// value used during collision resolution (higher wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    NoTask,
    ToRandomPoint,
    ToCharge,
    AttackEnemy,
    /// Carrying goods toward the drop cell.
    ToGoodsEnd,
    /// Flying empty toward a pickup cell.
    ToGoodsStart,
}

impl TaskType {
    pub fn priority(self) -> u8 {
        match self {
            TaskType::NoTask => 0,
            TaskType::ToRandomPoint => 1,
            TaskType::ToCharge => 2,
            TaskType::AttackEnemy => 3,
            TaskType::ToGoodsEnd => 4,
            TaskType::ToGoodsStart => 5,
        }
    }
}

/// Whether an agent is flying a normal (cargo/idle/charge) task or is
/// committed to an attack run. Idle-scatter and full-charge gating in the
/// scheduler both key off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Usage {
    Normal,
    Attack,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ordering_matches_table() {
        assert!(TaskType::ToGoodsStart.priority() > TaskType::ToGoodsEnd.priority());
        assert!(TaskType::ToGoodsEnd.priority() > TaskType::AttackEnemy.priority());
        assert!(TaskType::AttackEnemy.priority() > TaskType::ToCharge.priority());
        assert!(TaskType::ToCharge.priority() > TaskType::ToRandomPoint.priority());
        assert!(TaskType::ToRandomPoint.priority() > TaskType::NoTask.priority());
    }
}
