//! Rectangle-selection gesture state machine.

use std::fmt;

use crate::coord::{BoundingBox, GeoPoint};

/// Where the selector currently is in the gesture lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorState {
    /// No selection in progress; single-click picking is allowed.
    #[default]
    Idle,
    /// Selection mode toggled on, waiting for the first corner.
    Armed,
    /// Pointer down, rectangle growing from the anchor corner.
    Drawing,
}

impl fmt::Display for SelectorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Armed => write!(f, "armed"),
            Self::Drawing => write!(f, "drawing"),
        }
    }
}

/// Errors from driving the selector out of order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// Arming is only allowed from idle.
    #[error("Selection mode can only be armed from idle (currently {0})")]
    NotIdle(SelectorState),
}

/// Turns a three-phase pointer gesture into one normalized bounding box.
///
/// State machine: `Idle → Armed → Drawing → Idle`. Release emits the
/// finalized box and returns to idle; [`RegionSelector::cancel`] abandons
/// the gesture from either active state without emitting anything.
///
/// While armed or drawing, [`RegionSelector::is_pick_suppressed`] is true:
/// the map shell must refuse the competing single-click picking interaction
/// so the two gestures cannot interleave.
///
/// # Usage
///
/// ```
/// use lapidarium::coord::GeoPoint;
/// use lapidarium::selection::RegionSelector;
///
/// let mut selector = RegionSelector::new();
/// selector.arm().unwrap();
/// selector.pointer_down(GeoPoint::new(0.0, 0.0).unwrap());
/// let bounds = selector
///     .pointer_up(GeoPoint::new(5.0, 5.0).unwrap())
///     .expect("release while drawing emits a box");
/// assert_eq!(bounds.north, 5.0);
/// ```
#[derive(Debug, Default)]
pub struct RegionSelector {
    state: State,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Armed,
    Drawing {
        anchor: GeoPoint,
    },
}

impl RegionSelector {
    /// Create a selector in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current gesture state.
    pub fn state(&self) -> SelectorState {
        match self.state {
            State::Idle => SelectorState::Idle,
            State::Armed => SelectorState::Armed,
            State::Drawing { .. } => SelectorState::Drawing,
        }
    }

    /// True while single-click picking must be refused.
    pub fn is_pick_suppressed(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    /// Enter selection mode. Allowed only from idle.
    pub fn arm(&mut self) -> Result<(), SelectorError> {
        match self.state {
            State::Idle => {
                self.state = State::Armed;
                tracing::debug!("Selection mode armed");
                Ok(())
            }
            _ => Err(SelectorError::NotIdle(self.state())),
        }
    }

    /// Record the first corner of the rectangle.
    ///
    /// Transitions armed → drawing; a press in any other state is ignored.
    pub fn pointer_down(&mut self, corner: GeoPoint) {
        if matches!(self.state, State::Armed) {
            tracing::debug!(anchor = %corner, "Selection drag started");
            self.state = State::Drawing { anchor: corner };
        }
    }

    /// Live preview of the rectangle while dragging.
    ///
    /// Returns the box spanned by the anchor and the current pointer
    /// position, for visual feedback only; the finalized box comes from
    /// [`RegionSelector::pointer_up`]. Returns `None` unless drawing.
    pub fn pointer_move(&self, position: GeoPoint) -> Option<BoundingBox> {
        match self.state {
            State::Drawing { anchor } => Some(BoundingBox::from_corners(anchor, position)),
            _ => None,
        }
    }

    /// Finish the gesture and emit the finalized box.
    ///
    /// Transitions drawing → idle. A release at the anchor point yields a
    /// degenerate (zero-area) box, which is a valid selection. Returns
    /// `None` (and stays put) unless drawing.
    pub fn pointer_up(&mut self, corner: GeoPoint) -> Option<BoundingBox> {
        match self.state {
            State::Drawing { anchor } => {
                let bounds = BoundingBox::from_corners(anchor, corner);
                self.state = State::Idle;
                tracing::debug!(bounds = %bounds, "Selection finalized");
                Some(bounds)
            }
            _ => None,
        }
    }

    /// Abandon the gesture without emitting a box.
    ///
    /// Transitions armed or drawing → idle; returns whether an active
    /// gesture was discarded. Nothing downstream (containment filtering,
    /// aggregation) may run for a cancelled gesture.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            State::Idle => false,
            _ => {
                tracing::debug!(state = %self.state(), "Selection cancelled");
                self.state = State::Idle;
                true
            }
        }
    }
}
