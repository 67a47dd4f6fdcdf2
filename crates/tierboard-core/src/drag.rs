//! Pointer drag lifecycle for player rows.
//!
//! A session starts on pointer down, becomes active once the sensor's
//! activation constraint is met, follows pointer moves, and resolves a drop
//! target on pointer up. Releasing before activation, over nothing, or over
//! the dragged row itself aborts the gesture.

use crate::board::{Board, PlayerId};
use crate::collision::{CollisionArgs, CollisionStrategy, Droppable, RowsFirst, first_collision};
use crate::command::Command;
use kurbo::{Point, Rect, Vec2};
use std::time::{Duration, Instant};

/// Mouse drags activate after this much pointer travel.
pub const MOUSE_ACTIVATION_DISTANCE: f64 = 8.0;
/// Touch drags activate after the finger rests this long...
pub const TOUCH_ACTIVATION_DELAY: Duration = Duration::from_millis(150);
/// ...without straying further than this.
pub const TOUCH_ACTIVATION_TOLERANCE: f64 = 8.0;

/// Input device that started the drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensor {
    Mouse,
    Touch,
}

/// Phase of a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// Pointer is down, activation constraint not met yet.
    Pending,
    /// The row is being dragged.
    Active,
    /// The gesture was abandoned and will not produce a drop.
    Aborted,
}

/// An in-flight drag of one player row.
#[derive(Debug, Clone)]
pub struct DragSession {
    source: PlayerId,
    sensor: Sensor,
    phase: DragPhase,
    origin: Point,
    pointer: Point,
    initial_rect: Rect,
    started_at: Instant,
}

impl DragSession {
    /// Pointer down on a row occupying `rect`.
    pub fn begin(
        source: impl Into<PlayerId>,
        pointer: Point,
        rect: Rect,
        sensor: Sensor,
        at: Instant,
    ) -> Self {
        Self {
            source: source.into(),
            sensor,
            phase: DragPhase::Pending,
            origin: pointer,
            pointer,
            initial_rect: rect,
            started_at: at,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == DragPhase::Active
    }

    /// Pointer travel since pointer down.
    pub fn delta(&self) -> Vec2 {
        self.pointer - self.origin
    }

    /// The dragged row's rectangle at the current pointer position.
    pub fn collision_rect(&self) -> Rect {
        self.initial_rect + self.delta()
    }

    /// Re-check the activation constraint at `now`.
    pub fn tick(&mut self, now: Instant) {
        if self.phase != DragPhase::Pending {
            return;
        }
        let travel = self.delta().hypot();
        match self.sensor {
            Sensor::Mouse => {
                if travel >= MOUSE_ACTIVATION_DISTANCE {
                    self.phase = DragPhase::Active;
                }
            }
            Sensor::Touch => {
                if travel > TOUCH_ACTIVATION_TOLERANCE {
                    log::debug!("Touch drag of {} aborted: moved before delay", self.source);
                    self.phase = DragPhase::Aborted;
                } else if now.saturating_duration_since(self.started_at) >= TOUCH_ACTIVATION_DELAY {
                    self.phase = DragPhase::Active;
                }
            }
        }
    }

    /// Pointer moved to `pointer` at `now`.
    pub fn pointer_move(&mut self, pointer: Point, now: Instant) {
        if self.phase == DragPhase::Aborted {
            return;
        }
        if self.phase == DragPhase::Pending && self.sensor == Sensor::Touch {
            // The delay is judged against the resting position.
            self.tick(now);
            if self.phase == DragPhase::Active {
                self.pointer = pointer;
                return;
            }
        }
        self.pointer = pointer;
        self.tick(now);
    }

    /// Abandon the gesture.
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Aborted;
    }

    /// Winning drop target among `droppables`, without any filtering.
    pub fn over(&self, board: &Board, droppables: &[Droppable]) -> Option<String> {
        if !self.is_active() {
            return None;
        }
        let args = CollisionArgs {
            active_rect: self.collision_rect(),
            pointer: Some(self.pointer),
            droppables,
        };
        let collisions = RowsFirst::new(|id: &str| board.is_player(id)).detect(&args);
        first_collision(&collisions).map(str::to_string)
    }

    /// Pointer up at `now`: the command for the drop, or `None` when the
    /// gesture is aborted or the drop is a no-op.
    pub fn end(
        mut self,
        board: &Board,
        droppables: &[Droppable],
        now: Instant,
    ) -> Option<Command> {
        self.tick(now);
        let target = self.over(board, droppables)?;
        if target == self.source {
            return None;
        }
        Command::from_drop(board, &self.source, &target)
    }
}
