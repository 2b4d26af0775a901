use crate::canonical::{Dimension, Expr, Trigger, When};
use crate::legacy::drone::{Condition, Conditions};

/// Converts one include/exclude pair.
///
/// Include wins: when include patterns are present the exclude patterns are
/// dropped, not combined.
pub fn build_expr(condition: &Condition) -> Option<Expr> {
    if !condition.include.is_empty() {
        return Some(Expr::In(condition.include.clone()));
    }
    if !condition.exclude.is_empty() {
        return Some(Expr::In(condition.exclude.clone()).negate());
    }
    None
}

/// Builds a trigger from any set of dimensions. Returns `None`, not an empty map,
/// when no dimension contributes.
pub fn build_trigger_from<'a, I>(dimensions: I) -> Option<Trigger>
where
    I: IntoIterator<Item = (Dimension, &'a Condition)>,
{
    let trigger: Trigger = dimensions
        .into_iter()
        .filter_map(|(dimension, condition)| build_expr(condition).map(|expr| (dimension, expr)))
        .collect();
    (!trigger.is_empty()).then_some(trigger)
}

/// Builds the trigger of a pipeline or step from all ten condition dimensions.
pub fn build_trigger(conditions: &Conditions) -> Option<Trigger> {
    build_trigger_from(dimensions(conditions))
}

/// Wraps [`build_trigger`] into the canonical `when` block.
pub fn build_when(conditions: &Conditions) -> Option<When> {
    build_trigger(conditions).map(When::from)
}

fn dimensions(conditions: &Conditions) -> [(Dimension, &Condition); 10] {
    [
        (Dimension::Action, &conditions.action),
        (Dimension::Branch, &conditions.branch),
        (Dimension::Cron, &conditions.cron),
        (Dimension::Event, &conditions.event),
        (Dimension::Instance, &conditions.instance),
        (Dimension::Paths, &conditions.paths),
        (Dimension::Ref, &conditions.reference),
        (Dimension::Repo, &conditions.repo),
        (Dimension::Status, &conditions.status),
        (Dimension::Target, &conditions.target),
    ]
}
