//! Auto-positioning of panels whose coordinates aren't authored.
//!
//! Positions spread outward from every placed panel: a panel that is `up` of
//! an anchor sits directly above it, one that is `right` of it starts where
//! the anchor ends, and so on. The walk is depth-first and uses an explicit
//! stack, so long chains of panels can't overflow the call stack.

use crate::types::{Direction, PanelGraph, PanelId};

/// Outcome of [`resolve_all_positions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Panels that received a position during this run, in placement order
    pub placed: Vec<PanelId>,
    /// Auto-positioned panels still without a position after the run
    pub unresolved: Vec<PanelId>,
    /// Unresolved panels whose only placements fell outside `i32` coordinates
    pub out_of_range: Vec<PanelId>,
}

impl ResolveReport {
    /// Whether every panel in the graph now has a position.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Assigns a position to every auto-positioned panel reachable from a placed one.
///
/// A walk is started from every panel in load order, so disconnected pieces
/// of the graph are covered as well. Panels that are already placed are never
/// moved, which makes a second run a no-op.
///
/// # Returns
///
/// A [`ResolveReport`] listing the panels placed and those left unresolved.
pub fn resolve_all_positions(graph: &mut PanelGraph) -> ResolveReport {
    let mut expanded = vec![false; graph.len()];
    let mut report = ResolveReport::default();
    let mut overflowed = Vec::new();

    let mut walk = Walk {
        expanded: &mut expanded,
        placed: &mut report.placed,
        overflowed: &mut overflowed,
    };
    let starts: Vec<PanelId> = graph.ids().collect();
    for start in starts {
        walk.run(graph, start);
    }

    report.unresolved = graph
        .iter()
        .filter(|(_, panel)| !panel.is_position_resolved)
        .map(|(id, _)| id)
        .collect();
    // A panel another anchor managed to place later is fine.
    report.out_of_range = report
        .unresolved
        .iter()
        .copied()
        .filter(|id| overflowed.contains(id))
        .collect();
    report
}

/// Whether `id` can serve as an anchor that hasn't been expanded yet.
fn can_expand(graph: &PanelGraph, id: PanelId, expanded: &[bool]) -> bool {
    match graph.get(id) {
        Some(panel) => panel.is_position_resolved && !expanded[id.index()],
        None => false,
    }
}

/// Bookkeeping shared by every walk of one resolver run.
struct Walk<'a> {
    expanded: &'a mut [bool],
    placed: &'a mut Vec<PanelId>,
    overflowed: &'a mut Vec<PanelId>,
}

impl Walk<'_> {
    /// Depth-first walk from `start`, placing unresolved neighbors as it goes.
    fn run(&mut self, graph: &mut PanelGraph, start: PanelId) {
        if !can_expand(graph, start, self.expanded) {
            return;
        }
        self.expanded[start.index()] = true;

        // Each frame is an anchor and the index of the next direction to try.
        let mut stack: Vec<(PanelId, usize)> = vec![(start, 0)];

        while let Some(top) = stack.last_mut() {
            let (anchor, cursor) = *top;
            if cursor == Direction::ALL.len() {
                stack.pop();
                continue;
            }
            top.1 += 1;

            let direction = Direction::ALL[cursor];
            let Some(next) = graph.neighbor(anchor, direction) else {
                continue;
            };

            match place_neighbor(graph, anchor, next, direction) {
                Placement::Placed => self.placed.push(next),
                Placement::OutOfRange => {
                    if !self.overflowed.contains(&next) {
                        self.overflowed.push(next);
                    }
                }
                Placement::AlreadyPlaced => {}
            }

            if can_expand(graph, next, self.expanded) {
                self.expanded[next.index()] = true;
                stack.push((next, 0));
            }
        }
    }
}

/// What [`place_neighbor`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Placed,
    AlreadyPlaced,
    OutOfRange,
}

/// Gives `next` a position relative to `anchor` if it doesn't have one yet.
fn place_neighbor(
    graph: &mut PanelGraph,
    anchor: PanelId,
    next: PanelId,
    direction: Direction,
) -> Placement {
    let Some(anchor_panel) = graph.get(anchor) else {
        return Placement::AlreadyPlaced;
    };
    let (anchor_pos, anchor_size) = (anchor_panel.position, anchor_panel.size);
    let anchor_name = anchor_panel.name.clone();

    let Some(panel) = graph.get_mut(next) else {
        return Placement::AlreadyPlaced;
    };
    if panel.is_position_resolved {
        return Placement::AlreadyPlaced;
    }

    let Some(position) = direction.place(anchor_pos, anchor_size, panel.size) else {
        log::warn!(
            "Panel {} {} of {} lands outside the coordinate range",
            panel.name,
            direction,
            anchor_name
        );
        return Placement::OutOfRange;
    };
    panel.position = position;
    panel.is_position_resolved = true;
    log::debug!(
        "Placed panel {} {} of {} at ({}, {})",
        panel.name,
        direction,
        anchor_name,
        panel.position.x,
        panel.position.y
    );
    Placement::Placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Panel, PanelPosition, PanelSize};

    fn placed(
        graph: &mut PanelGraph,
        name: &str,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
    ) -> PanelId {
        graph
            .add_panel(Panel::new(name, PanelPosition::new(x, y), PanelSize::new(w, h)))
            .unwrap()
    }

    fn auto(graph: &mut PanelGraph, name: &str, w: u32, h: u32) -> PanelId {
        graph
            .add_panel(Panel::auto_positioned(name, PanelSize::new(w, h)))
            .unwrap()
    }

    fn link(graph: &mut PanelGraph, from: PanelId, dir: Direction, to: PanelId) {
        graph.set_neighbor(from, dir, Some(to));
    }

    fn pos(graph: &PanelGraph, id: PanelId) -> PanelPosition {
        graph.get(id).unwrap().position
    }

    #[test]
    fn test_each_direction_places_exactly() {
        let mut graph = PanelGraph::new();
        let a = placed(&mut graph, "a", 100, 100, 300, 200);
        let up = auto(&mut graph, "up", 50, 40);
        let down = auto(&mut graph, "down", 50, 40);
        let left = auto(&mut graph, "left", 50, 40);
        let right = auto(&mut graph, "right", 50, 40);
        link(&mut graph, a, Direction::Up, up);
        link(&mut graph, a, Direction::Down, down);
        link(&mut graph, a, Direction::Left, left);
        link(&mut graph, a, Direction::Right, right);

        let report = resolve_all_positions(&mut graph);

        assert!(report.is_complete());
        assert_eq!(report.placed.len(), 4);
        assert_eq!(pos(&graph, up), PanelPosition::new(100, 60));
        assert_eq!(pos(&graph, down), PanelPosition::new(100, 300));
        assert_eq!(pos(&graph, left), PanelPosition::new(50, 100));
        assert_eq!(pos(&graph, right), PanelPosition::new(400, 100));
        for id in [up, down, left, right] {
            assert!(graph.get(id).unwrap().is_visible());
        }
    }

    #[test]
    fn test_authored_positions_are_untouched() {
        let mut graph = PanelGraph::new();
        let a = placed(&mut graph, "a", 0, 0, 100, 100);
        let b = placed(&mut graph, "b", 500, 700, 100, 100);
        link(&mut graph, a, Direction::Right, b);

        let report = resolve_all_positions(&mut graph);

        assert!(report.placed.is_empty());
        assert_eq!(pos(&graph, a), PanelPosition::new(0, 0));
        assert_eq!(pos(&graph, b), PanelPosition::new(500, 700));
    }

    #[test]
    fn test_chain_propagates_through_placed_panels() {
        let mut graph = PanelGraph::new();
        // Load order puts the unresolved panels first so they are skipped as starts.
        let c = auto(&mut graph, "c", 100, 50);
        let b = auto(&mut graph, "b", 200, 50);
        let a = placed(&mut graph, "a", 0, 0, 100, 100);
        link(&mut graph, a, Direction::Right, b);
        link(&mut graph, b, Direction::Down, c);

        let report = resolve_all_positions(&mut graph);

        assert!(report.is_complete());
        assert_eq!(report.placed, vec![b, c]);
        assert_eq!(pos(&graph, b), PanelPosition::new(100, 0));
        assert_eq!(pos(&graph, c), PanelPosition::new(100, 50));
    }

    #[test]
    fn test_cycle_terminates() {
        let mut graph = PanelGraph::new();
        let a = placed(&mut graph, "a", 0, 0, 100, 100);
        let b = auto(&mut graph, "b", 100, 100);
        link(&mut graph, a, Direction::Right, b);
        link(&mut graph, b, Direction::Left, a);

        let report = resolve_all_positions(&mut graph);

        assert!(report.is_complete());
        assert_eq!(pos(&graph, b), PanelPosition::new(100, 0));
        assert_eq!(pos(&graph, a), PanelPosition::new(0, 0));
    }

    #[test]
    fn test_ring_of_four_panels_terminates() {
        let mut graph = PanelGraph::new();
        let a = placed(&mut graph, "a", 0, 0, 10, 10);
        let b = auto(&mut graph, "b", 10, 10);
        let c = auto(&mut graph, "c", 10, 10);
        let d = auto(&mut graph, "d", 10, 10);
        link(&mut graph, a, Direction::Right, b);
        link(&mut graph, b, Direction::Down, c);
        link(&mut graph, c, Direction::Left, d);
        link(&mut graph, d, Direction::Up, a);

        let report = resolve_all_positions(&mut graph);

        assert!(report.is_complete());
        assert_eq!(pos(&graph, b), PanelPosition::new(10, 0));
        assert_eq!(pos(&graph, c), PanelPosition::new(10, 10));
        assert_eq!(pos(&graph, d), PanelPosition::new(0, 10));
    }

    #[test]
    fn test_diamond_places_shared_panel_once() {
        let mut graph = PanelGraph::new();
        let top = placed(&mut graph, "top", 0, 0, 100, 100);
        let left = auto(&mut graph, "left", 100, 100);
        let right = auto(&mut graph, "right", 100, 100);
        let bottom = auto(&mut graph, "bottom", 100, 100);
        link(&mut graph, top, Direction::Down, left);
        link(&mut graph, top, Direction::Right, right);
        link(&mut graph, left, Direction::Right, bottom);
        link(&mut graph, right, Direction::Down, bottom);

        let report = resolve_all_positions(&mut graph);

        assert!(report.is_complete());
        assert_eq!(report.placed.iter().filter(|id| **id == bottom).count(), 1);
        // Right is expanded before Down, so `right` is the anchor that wins.
        assert_eq!(pos(&graph, bottom), PanelPosition::new(100, 100));
    }

    #[test]
    fn test_unreachable_panels_are_reported() {
        let mut graph = PanelGraph::new();
        let a = placed(&mut graph, "a", 0, 0, 10, 10);
        let island = auto(&mut graph, "island", 10, 10);
        let shore = auto(&mut graph, "shore", 10, 10);
        // Only an edge *into* the placed panel; nothing leads out to the island.
        link(&mut graph, island, Direction::Left, a);
        link(&mut graph, island, Direction::Right, shore);

        let report = resolve_all_positions(&mut graph);

        assert!(!report.is_complete());
        assert_eq!(report.unresolved, vec![island, shore]);
        assert!(!graph.get(island).unwrap().is_visible());
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let mut graph = PanelGraph::new();
        let a = placed(&mut graph, "a", 0, 0, 100, 100);
        let b = auto(&mut graph, "b", 100, 100);
        let c = auto(&mut graph, "c", 100, 100);
        link(&mut graph, a, Direction::Down, b);
        link(&mut graph, b, Direction::Left, c);

        resolve_all_positions(&mut graph);
        let before: Vec<_> = graph.iter().map(|(_, p)| p.position).collect();
        let report = resolve_all_positions(&mut graph);
        let after: Vec<_> = graph.iter().map(|(_, p)| p.position).collect();

        assert!(report.placed.is_empty());
        assert_eq!(before, after);
    }

    #[test]
    fn test_blank_panels_stay_blank_after_placement() {
        let mut graph = PanelGraph::new();
        let a = placed(&mut graph, "a", 0, 0, 100, 100);
        let mut spacer = Panel::auto_positioned("spacer", PanelSize::new(20, 100));
        spacer.is_renderable = false;
        let spacer = graph.add_panel(spacer).unwrap();
        link(&mut graph, a, Direction::Right, spacer);

        resolve_all_positions(&mut graph);

        let spacer = graph.get(spacer).unwrap();
        assert!(spacer.is_position_resolved);
        assert!(!spacer.is_renderable);
        assert_eq!(spacer.position, PanelPosition::new(100, 0));
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let mut graph = PanelGraph::new();
        let mut prev = placed(&mut graph, "p0", 0, 0, 1, 1);
        for i in 1..20_000 {
            let next = auto(&mut graph, &format!("p{i}"), 1, 1);
            link(&mut graph, prev, Direction::Right, next);
            prev = next;
        }

        let report = resolve_all_positions(&mut graph);

        assert!(report.is_complete());
        assert_eq!(pos(&graph, prev), PanelPosition::new(19_999, 0));
    }

    #[test]
    fn test_mismatched_diamond_takes_the_first_expanded_anchor() {
        let mut graph = PanelGraph::new();
        let top = placed(&mut graph, "top", 0, 0, 100, 100);
        let below = auto(&mut graph, "below", 300, 50);
        let beside = auto(&mut graph, "beside", 100, 100);
        let corner = auto(&mut graph, "corner", 100, 100);
        link(&mut graph, top, Direction::Down, below);
        link(&mut graph, top, Direction::Right, beside);
        link(&mut graph, below, Direction::Right, corner);
        link(&mut graph, beside, Direction::Down, corner);

        resolve_all_positions(&mut graph);

        // Via `below` the corner would land at (300, 100); `beside` gets there first.
        assert_eq!(pos(&graph, beside), PanelPosition::new(100, 0));
        assert_eq!(pos(&graph, corner), PanelPosition::new(100, 100));
    }

    #[test]
    fn test_far_right_placement_is_out_of_range() {
        let mut graph = PanelGraph::new();
        let anchor = placed(&mut graph, "anchor", 2_000_000_000, 0, 500_000_000, 10);
        let beyond = auto(&mut graph, "beyond", 10, 10);
        link(&mut graph, anchor, Direction::Right, beyond);

        let report = resolve_all_positions(&mut graph);

        assert!(!report.is_complete());
        assert_eq!(report.unresolved, vec![beyond]);
        assert_eq!(report.out_of_range, vec![beyond]);
        assert!(!graph.get(beyond).unwrap().is_visible());
    }

    #[test]
    fn test_oversized_width_does_not_wrap_to_the_right() {
        let mut graph = PanelGraph::new();
        let anchor = placed(&mut graph, "anchor", 0, 0, 10, 10);
        let huge = auto(&mut graph, "huge", 3_000_000_000, 10);
        link(&mut graph, anchor, Direction::Left, huge);

        let report = resolve_all_positions(&mut graph);

        assert_eq!(report.out_of_range, vec![huge]);
        assert!(!graph.get(huge).unwrap().is_position_resolved);
        assert_eq!(pos(&graph, huge), PanelPosition::default());
    }

    #[test]
    fn test_overflow_from_one_anchor_is_forgiven_if_another_places_it() {
        let mut graph = PanelGraph::new();
        let edge = placed(&mut graph, "edge", i32::MAX - 5, 0, 10, 10);
        let home = placed(&mut graph, "home", 0, 0, 10, 10);
        let shared = auto(&mut graph, "shared", 10, 10);
        link(&mut graph, edge, Direction::Right, shared);
        link(&mut graph, home, Direction::Down, shared);

        let report = resolve_all_positions(&mut graph);

        assert!(report.is_complete());
        assert!(report.out_of_range.is_empty());
        assert_eq!(pos(&graph, shared), PanelPosition::new(0, 10));
    }
}
