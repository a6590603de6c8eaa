use super::rules::MatchRule;
use crate::route::RouteDescriptor;

/// A route claimed by a rule; `rule` is the index of the first rule whose
/// predicates all held, and that rule alone supplies the apply payload.
#[derive(Debug, Clone)]
pub struct MatchedRoute {
    pub route: RouteDescriptor,
    pub rule: usize,
}

/// Per-route matching result, in route-table registration order.
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    Included(MatchedRoute),
    /// No rule's predicates all held; reported, never silently dropped.
    Excluded(RouteDescriptor),
}

/// Run every route through the rule list. A route is included iff at least
/// one rule matches (OR across rules, AND within a rule); the first matching
/// rule wins. Output order is registration order, never re-sorted here.
pub fn match_routes(routes: &[RouteDescriptor], rules: &[MatchRule]) -> Vec<MatchOutcome> {
    routes
        .iter()
        .map(|route| match rules.iter().position(|rule| rule.matches(route)) {
            Some(rule) => MatchOutcome::Included(MatchedRoute {
                route: route.clone(),
                rule,
            }),
            None => MatchOutcome::Excluded(route.clone()),
        })
        .collect()
}
