//! Camera and panel-to-panel transitions.
//!
//! The viewer rests on one panel at its fit scale. A directional request that
//! leads to another panel starts a transition: every frame the camera moves a
//! fixed number of pixels towards the destination and spreads the remaining
//! scale change over the frames still to go. Once the destination is within
//! one frame's travel the camera snaps onto it exactly.

use crate::constants::MIN_REMAINING_DISTANCE;
use crate::scaling::{fit_scale, Viewport};
use crate::types::{Direction, Panel, PanelGraph, PanelId};
use crate::vector::Vector2D;

/// What the renderer needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerFrame {
    /// World x shown at the left edge of the viewport
    pub x: f64,
    /// World y shown at the top edge of the viewport
    pub y: f64,
    /// Screen pixels per world pixel
    pub scale: f64,
}

/// Whether the camera is resting or moving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraState {
    /// Resting on the current panel at its fit scale
    Idle,
    /// Moving towards `destination`
    Transitioning {
        /// Panel the camera is heading to
        destination: PanelId,
        /// Per-frame step in world pixels
        velocity: Vector2D,
        /// Destination's transition speed, captured when the move started
        speed: f64,
    },
}

/// The viewer's continuous position and zoom.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vector2D,
    scale: f64,
    current: PanelId,
    state: CameraState,
    viewport: Viewport,
}

impl Camera {
    /// Creates a camera resting on `start` at its fit scale.
    ///
    /// # Returns
    ///
    /// `None` if `start` isn't a panel of `graph`.
    pub fn new(graph: &PanelGraph, start: PanelId, viewport: Viewport) -> Option<Self> {
        let panel = graph.get(start)?;
        Some(Self {
            position: panel.position.to_vector(),
            scale: fit_scale(panel.size, viewport),
            current: start,
            state: CameraState::Idle,
            viewport,
        })
    }

    /// The panel the camera rests on, or is travelling to.
    pub fn current_panel(&self) -> PanelId {
        self.current
    }

    /// Resting or moving, and where to.
    pub fn state(&self) -> CameraState {
        self.state
    }

    /// Whether a transition is under way.
    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, CameraState::Transitioning { .. })
    }

    /// The viewport the fit scale is computed against.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current position and scale.
    pub fn frame(&self) -> ViewerFrame {
        ViewerFrame {
            x: self.position.x(),
            y: self.position.y(),
            scale: self.scale,
        }
    }

    /// Updates the viewport size.
    ///
    /// A resting camera refits its scale to the new size; a moving one picks
    /// the new size up in its next frame.
    pub fn resize(&mut self, graph: &PanelGraph, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        if !self.is_transitioning() {
            if let Some(panel) = graph.get(self.current) {
                self.scale = fit_scale(panel.size, viewport);
            }
        }
    }

    /// Handles a request to move one panel in `direction`.
    ///
    /// Requests are ignored while a transition is running, and a direction
    /// without a neighbor is a silent no-op.
    ///
    /// # Returns
    ///
    /// `true` if the request changed the camera's state.
    pub fn on_directional_input(&mut self, graph: &PanelGraph, direction: Direction) -> bool {
        if self.is_transitioning() {
            return false;
        }
        match graph.neighbor(self.current, direction) {
            Some(destination) => self.start_transition(graph, destination),
            None => false,
        }
    }

    /// Starts moving towards `destination`.
    ///
    /// The destination's own speed governs the whole move. A destination
    /// that can't be travelled to (no distance left, or a speed that isn't
    /// positive) is reached instantly instead.
    ///
    /// # Returns
    ///
    /// `true` if the camera moved or started moving.
    pub fn start_transition(&mut self, graph: &PanelGraph, destination: PanelId) -> bool {
        let Some(panel) = graph.get(destination) else {
            return false;
        };
        log::info!("Switching panels to panel {}", panel.name);
        self.current = destination;

        let remaining = panel.position.to_vector() - self.position;
        if !panel.has_valid_speed() {
            log::warn!(
                "Panel {} has transition speed {}; jumping straight to it",
                panel.name,
                panel.transition_speed
            );
            self.snap_to(panel);
            return true;
        }
        if remaining.magnitude() < MIN_REMAINING_DISTANCE {
            self.snap_to(panel);
            return true;
        }

        self.state = CameraState::Transitioning {
            destination,
            velocity: Vector2D::from_polar(remaining.angle(), panel.transition_speed),
            speed: panel.transition_speed,
        };
        true
    }

    /// Runs one frame of the state machine.
    ///
    /// Must be called exactly once per frame: the transition math assumes one
    /// speed's worth of travel per call.
    pub fn advance_frame(&mut self, graph: &PanelGraph) -> ViewerFrame {
        let CameraState::Transitioning {
            destination,
            velocity,
            speed,
        } = self.state
        else {
            return self.frame();
        };
        let Some(panel) = graph.get(destination) else {
            self.state = CameraState::Idle;
            return self.frame();
        };

        let distance = (panel.position.to_vector() - self.position).magnitude();
        if distance <= speed || distance < MIN_REMAINING_DISTANCE {
            self.snap_to(panel);
            return self.frame();
        }

        let frames_left = distance / speed;
        let target_scale = fit_scale(panel.size, self.viewport);
        self.scale += (target_scale - self.scale) / frames_left;
        self.position = self.position + velocity;
        self.frame()
    }

    /// Lands exactly on `panel` and goes idle.
    fn snap_to(&mut self, panel: &Panel) {
        self.position = panel.position.to_vector();
        self.scale = fit_scale(panel.size, self.viewport);
        self.state = CameraState::Idle;
        log::info!(
            "Viewer at {}, {}. Scale: {}",
            self.position.x(),
            self.position.y(),
            self.scale
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PanelPosition, PanelSize};

    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    /// Two panels side by side, `a` at the origin and `b` to its right.
    fn two_panels(
        b_pos: (i32, i32),
        b_size: (u32, u32),
        speed: f64,
    ) -> (PanelGraph, PanelId, PanelId) {
        let mut graph = PanelGraph::new();
        let a = graph
            .add_panel(Panel::new("a", PanelPosition::new(0, 0), PanelSize::new(800, 600)))
            .unwrap();
        let mut b = Panel::new(
            "b",
            PanelPosition::new(b_pos.0, b_pos.1),
            PanelSize::new(b_size.0, b_size.1),
        );
        b.transition_speed = speed;
        let b = graph.add_panel(b).unwrap();
        graph.set_neighbor(a, Direction::Right, Some(b));
        graph.set_neighbor(b, Direction::Left, Some(a));
        (graph, a, b)
    }

    #[test]
    fn test_camera_starts_idle_on_panel() {
        let (graph, a, _) = two_panels((100, 0), (800, 600), 10.0);
        let camera = Camera::new(&graph, a, VIEWPORT).unwrap();
        assert_eq!(camera.state(), CameraState::Idle);
        assert_eq!(camera.current_panel(), a);
        assert_eq!(
            camera.frame(),
            ViewerFrame {
                x: 0.0,
                y: 0.0,
                scale: 1.0
            }
        );
    }

    #[test]
    fn test_transition_lands_exactly_after_ten_frames() {
        let (graph, a, b) = two_panels((100, 0), (800, 600), 10.0);
        let mut camera = Camera::new(&graph, a, VIEWPORT).unwrap();

        assert!(camera.on_directional_input(&graph, Direction::Right));
        assert!(camera.is_transitioning());
        assert_eq!(camera.current_panel(), b);

        for _ in 0..9 {
            camera.advance_frame(&graph);
            assert!(camera.is_transitioning());
        }
        assert_eq!(camera.frame().x, 90.0);

        let frame = camera.advance_frame(&graph);
        assert_eq!(camera.state(), CameraState::Idle);
        assert_eq!(frame.x, 100.0);
        assert_eq!(frame.y, 0.0);
        assert_eq!(frame.scale, 1.0);
    }

    #[test]
    fn test_diagonal_transition_snaps_to_destination() {
        let (graph, a, _) = two_panels((33, 44), (800, 600), 10.0);
        let mut camera = Camera::new(&graph, a, VIEWPORT).unwrap();
        camera.on_directional_input(&graph, Direction::Right);

        let mut frames = 0;
        while camera.is_transitioning() {
            camera.advance_frame(&graph);
            frames += 1;
            assert!(frames < 100, "transition never finished");
        }

        // 55px at 10px per frame: five full steps, then a snap from 5px out.
        assert_eq!(frames, 6);
        let frame = camera.frame();
        assert_eq!((frame.x, frame.y), (33.0, 44.0));
    }

    #[test]
    fn test_scale_eases_towards_destination_fit() {
        // b fits at scale 2.0; 800px at 100px/frame is 8 frames.
        let (graph, a, _) = two_panels((800, 0), (400, 300), 100.0);
        let mut camera = Camera::new(&graph, a, VIEWPORT).unwrap();
        camera.on_directional_input(&graph, Direction::Right);

        let first = camera.advance_frame(&graph);
        assert_eq!(first.scale, 1.125);
        assert_eq!(first.x, 100.0);

        let mut last_scale = first.scale;
        while camera.is_transitioning() {
            let frame = camera.advance_frame(&graph);
            assert!(frame.scale >= last_scale);
            last_scale = frame.scale;
        }
        assert_eq!(camera.frame().scale, 2.0);
        assert_eq!(camera.frame().x, 800.0);
    }

    #[test]
    fn test_missing_neighbor_is_a_no_op() {
        let (graph, a, _) = two_panels((100, 0), (800, 600), 10.0);
        let mut camera = Camera::new(&graph, a, VIEWPORT).unwrap();
        let before = camera.frame();

        assert!(!camera.on_directional_input(&graph, Direction::Up));
        assert!(!camera.on_directional_input(&graph, Direction::Left));
        assert_eq!(camera.state(), CameraState::Idle);
        assert_eq!(camera.current_panel(), a);
        assert_eq!(camera.advance_frame(&graph), before);
    }

    #[test]
    fn test_input_ignored_while_transitioning() {
        let (graph, a, b) = two_panels((100, 0), (800, 600), 10.0);
        let mut camera = Camera::new(&graph, a, VIEWPORT).unwrap();
        camera.on_directional_input(&graph, Direction::Right);
        camera.advance_frame(&graph);

        assert!(!camera.on_directional_input(&graph, Direction::Left));
        assert_eq!(camera.current_panel(), b);
    }

    #[test]
    fn test_zero_speed_is_instant() {
        let (graph, a, b) = two_panels((100, 0), (400, 300), 0.0);
        let mut camera = Camera::new(&graph, a, VIEWPORT).unwrap();

        assert!(camera.on_directional_input(&graph, Direction::Right));
        assert_eq!(camera.state(), CameraState::Idle);
        assert_eq!(camera.current_panel(), b);
        let frame = camera.frame();
        assert_eq!((frame.x, frame.y, frame.scale), (100.0, 0.0, 2.0));
    }

    #[test]
    fn test_negative_speed_is_instant() {
        let (graph, a, _) = two_panels((100, 0), (800, 600), -5.0);
        let mut camera = Camera::new(&graph, a, VIEWPORT).unwrap();
        camera.on_directional_input(&graph, Direction::Right);
        assert!(!camera.is_transitioning());
        assert_eq!(camera.frame().x, 100.0);
    }

    #[test]
    fn test_coincident_destination_is_instant() {
        let (graph, a, b) = two_panels((0, 0), (400, 300), 10.0);
        let mut camera = Camera::new(&graph, a, VIEWPORT).unwrap();

        assert!(camera.on_directional_input(&graph, Direction::Right));
        assert!(!camera.is_transitioning());
        assert_eq!(camera.current_panel(), b);
        assert_eq!(camera.frame().scale, 2.0);
        assert!(camera.frame().scale.is_finite());
    }

    #[test]
    fn test_resize_refits_idle_camera() {
        let (graph, a, _) = two_panels((100, 0), (800, 600), 10.0);
        let mut camera = Camera::new(&graph, a, VIEWPORT).unwrap();
        camera.resize(&graph, Viewport::new(1600.0, 1200.0));
        assert_eq!(camera.frame().scale, 2.0);
        assert_eq!(camera.viewport(), Viewport::new(1600.0, 1200.0));
    }

    #[test]
    fn test_camera_needs_existing_start_panel() {
        let (graph, _, _) = two_panels((100, 0), (800, 600), 10.0);
        let mut other = PanelGraph::new();
        for i in 0..5 {
            other
                .add_panel(Panel::new(
                    format!("p{i}"),
                    PanelPosition::default(),
                    PanelSize::new(1, 1),
                ))
                .unwrap();
        }
        let far = other.ids().last().unwrap();
        assert!(Camera::new(&graph, far, VIEWPORT).is_none());
    }
}
