//! Before/after route diffing for the human-readable changelog.
//!
//! At commit time the edit session hands this module the pre-edit
//! snapshot and the working set; it produces an ordered list of change
//! descriptions per route. Points that changed hands between routes are
//! reported as moves on both sides and are excluded from the added and
//! removed summaries, so a reshuffle never reads as churn.

use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::points::Route;

/// The ordered change entries produced for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChanges {
    pub route_id: Uuid,
    pub route_name: String,
    pub entries: Vec<String>,
}

/// One detected cross-route move.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MoveRecord {
    code: String,
    point_name: String,
    from_id: Uuid,
    from_name: String,
    to_id: Uuid,
    to_name: String,
}

/// Diffs two route collections into per-route change descriptions.
///
/// Routes are reported in `after` order; routes with no changes are
/// omitted. Entries per route appear in a fixed order: scalar field
/// changes, outgoing moves, incoming moves, added, removed, edited.
/// Grouping follows first appearance, never hash order, so the same edit
/// always produces the same text.
///
/// # Examples
///
/// ```
/// use engine::domain::changelog::diff_routes;
/// use engine::domain::points::{Route, RouteDraft};
///
/// let before: Vec<Route> = Vec::new();
/// let after = vec![Route::new(RouteDraft {
///     name: "North loop".to_owned(),
///     code: "N1".to_owned(),
///     shift: "Morning".to_owned(),
///     delivery_points: Vec::new(),
/// })?];
///
/// let changes = diff_routes(&before, &after);
/// assert_eq!(changes[0].entries, ["Route \"North loop\" created"]);
/// # Ok::<(), engine::domain::points::PointValidationError>(())
/// ```
pub fn diff_routes(before: &[Route], after: &[Route]) -> Vec<RouteChanges> {
    let moves = detect_moves(before, after);

    let mut changes = Vec::new();
    for after_route in after {
        let Some(before_route) = find_route(before, after_route.id()) else {
            changes.push(RouteChanges {
                route_id: after_route.id(),
                route_name: after_route.name().to_owned(),
                entries: vec![format!("Route \"{}\" created", after_route.name())],
            });
            continue;
        };

        let mut entries = Vec::new();
        push_scalar_changes(&mut entries, before_route, after_route);
        push_outgoing_moves(&mut entries, &moves, after_route.id());
        push_incoming_moves(&mut entries, &moves, after_route.id());
        push_membership_changes(&mut entries, &moves, before_route, after_route);

        if !entries.is_empty() {
            changes.push(RouteChanges {
                route_id: after_route.id(),
                route_name: after_route.name().to_owned(),
                entries,
            });
        }
    }
    changes
}

/// Finds every point that left one route's before-state and surfaced in a
/// different route's after-state.
///
/// The check is directional on purpose: the code must be new to the
/// destination, present in the source's before-state, and gone from the
/// source's after-state (a source deleted in this edit counts as gone).
/// A point that merely appears somewhere new is an add, not a move.
fn detect_moves(before: &[Route], after: &[Route]) -> Vec<MoveRecord> {
    let mut moves = Vec::new();
    for after_route in after {
        let arrived: Vec<_> = match find_route(before, after_route.id()) {
            Some(before_route) => after_route
                .delivery_points()
                .iter()
                .filter(|point| !before_route.contains_code(point.code()))
                .collect(),
            None => after_route.delivery_points().iter().collect(),
        };

        for point in arrived {
            let source = before.iter().find(|candidate| {
                candidate.id() != after_route.id()
                    && candidate.contains_code(point.code())
                    && !find_route(after, candidate.id())
                        .is_some_and(|current| current.contains_code(point.code()))
            });
            if let Some(source) = source {
                moves.push(MoveRecord {
                    code: point.code().to_owned(),
                    point_name: point.name().to_owned(),
                    from_id: source.id(),
                    from_name: source.name().to_owned(),
                    to_id: after_route.id(),
                    to_name: after_route.name().to_owned(),
                });
            }
        }
    }
    moves
}

fn find_route(routes: &[Route], id: Uuid) -> Option<&Route> {
    routes.iter().find(|route| route.id() == id)
}

fn push_scalar_changes(entries: &mut Vec<String>, before: &Route, after: &Route) {
    let fields = [
        ("Name", before.name(), after.name()),
        ("Code", before.code(), after.code()),
        ("Shift", before.shift(), after.shift()),
    ];
    for (label, old, new) in fields {
        if old != new {
            entries.push(format!("{label} changed: {old} → {new}"));
        }
    }
}

fn push_outgoing_moves(entries: &mut Vec<String>, moves: &[MoveRecord], route_id: Uuid) {
    let outgoing: Vec<&MoveRecord> = moves.iter().filter(|m| m.from_id == route_id).collect();
    for (_, group) in group_in_order(&outgoing, |m| m.to_id) {
        let destination = group.first().map_or("", |m| m.to_name.as_str());
        entries.push(format!(
            "Moved {} location(s) to \"{}\": {}",
            group.len(),
            destination,
            point_names(&group)
        ));
    }
}

fn push_incoming_moves(entries: &mut Vec<String>, moves: &[MoveRecord], route_id: Uuid) {
    let incoming: Vec<&MoveRecord> = moves.iter().filter(|m| m.to_id == route_id).collect();
    for (_, group) in group_in_order(&incoming, |m| m.from_id) {
        let source = group.first().map_or("", |m| m.from_name.as_str());
        entries.push(format!(
            "Received {} location(s) from \"{}\": {}",
            group.len(),
            source,
            point_names(&group)
        ));
    }
}

fn push_membership_changes(
    entries: &mut Vec<String>,
    moves: &[MoveRecord],
    before: &Route,
    after: &Route,
) {
    let moved_in: HashSet<&str> = moves
        .iter()
        .filter(|m| m.to_id == after.id())
        .map(|m| m.code.as_str())
        .collect();
    let moved_out: HashSet<&str> = moves
        .iter()
        .filter(|m| m.from_id == after.id())
        .map(|m| m.code.as_str())
        .collect();

    let added: Vec<&str> = after
        .delivery_points()
        .iter()
        .filter(|point| !before.contains_code(point.code()) && !moved_in.contains(point.code()))
        .map(|point| point.name())
        .collect();
    if !added.is_empty() {
        entries.push(format!(
            "Added {} location(s): {}",
            added.len(),
            added.join(", ")
        ));
    }

    let removed: Vec<&str> = before
        .delivery_points()
        .iter()
        .filter(|point| !after.contains_code(point.code()) && !moved_out.contains(point.code()))
        .map(|point| point.name())
        .collect();
    if !removed.is_empty() {
        entries.push(format!(
            "Removed {} location(s): {}",
            removed.len(),
            removed.join(", ")
        ));
    }

    let edited: Vec<&str> = after
        .delivery_points()
        .iter()
        .filter(|point| {
            before.delivery_points().iter().any(|previous| {
                previous.code() == point.code()
                    && (previous.name() != point.name()
                        || previous.schedule() != point.schedule()
                        || previous.latitude() != point.latitude()
                        || previous.longitude() != point.longitude())
            })
        })
        .map(|point| point.name())
        .collect();
    if !edited.is_empty() {
        entries.push(format!(
            "Edited {} location(s): {}",
            edited.len(),
            edited.join(", ")
        ));
    }
}

/// Groups records by key, preserving first-appearance order of both keys
/// and members. A plain scan keeps the output deterministic at this
/// module's scale.
fn group_in_order<'a>(
    records: &[&'a MoveRecord],
    key: impl Fn(&MoveRecord) -> Uuid,
) -> Vec<(Uuid, Vec<&'a MoveRecord>)> {
    let mut groups: Vec<(Uuid, Vec<&'a MoveRecord>)> = Vec::new();
    for &record in records {
        let group_key = key(record);
        match groups.iter_mut().find(|(existing, _)| *existing == group_key) {
            Some((_, members)) => members.push(record),
            None => groups.push((group_key, vec![record])),
        }
    }
    groups
}

fn point_names(group: &[&MoveRecord]) -> String {
    group
        .iter()
        .map(|m| m.point_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "changelog_tests.rs"]
mod tests;
