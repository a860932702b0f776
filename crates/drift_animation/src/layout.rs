//! Origin layouts for element sets
//!
//! Elements are anchored along two arcs, one on each side of a center point,
//! fanning from the top of the arc to the bottom with a slowly growing radius.

use crate::element::MovingElement;
use drift_core::{Point, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Which arc an element sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Two mirrored arcs around a center
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcLayout {
    pub center: Point,
    /// Radius of the first element on each arc
    pub base_radius: f32,
    /// Radius added for every following element
    pub radius_step: f32,
    /// Vertical squash of the arc
    pub vertical_scale: f32,
    pub left_count: usize,
    pub right_count: usize,
    /// Initial speed per axis is drawn from `[-initial_speed, initial_speed)`
    pub initial_speed: f32,
}

impl Default for ArcLayout {
    fn default() -> Self {
        Self {
            center: Point::new(830.0, 350.0),
            base_radius: 280.0,
            radius_step: 20.0,
            vertical_scale: 0.8,
            left_count: 6,
            right_count: 6,
            initial_speed: 0.15,
        }
    }
}

impl ArcLayout {
    /// Anchor of element `index` out of `count` on the given side
    pub fn origin(&self, side: Side, index: usize, count: usize) -> Point {
        let angle = (index as f32 / count.max(1) as f32) * PI - PI / 2.0;
        let angle = match side {
            Side::Left => angle + PI,
            Side::Right => angle,
        };
        let radius = self.base_radius + index as f32 * self.radius_step;
        Point::new(
            self.center.x + angle.cos() * radius,
            self.center.y + angle.sin() * radius * self.vertical_scale,
        )
    }

    /// All anchors, left arc first
    pub fn origins(&self) -> Vec<(Side, Point)> {
        let left = (0..self.left_count)
            .map(|i| (Side::Left, self.origin(Side::Left, i, self.left_count)));
        let right = (0..self.right_count)
            .map(|i| (Side::Right, self.origin(Side::Right, i, self.right_count)));
        left.chain(right).collect()
    }

    /// Build elements on their anchors with a small random drift and a
    /// distinct jitter phase each
    pub fn spawn<R: Rng>(&self, rng: &mut R) -> Vec<MovingElement> {
        let speed = self.initial_speed.abs();
        self.origins()
            .into_iter()
            .enumerate()
            .map(|(i, (_, origin))| {
                let velocity = if speed > 0.0 {
                    Vec2::new(rng.gen_range(-speed..speed), rng.gen_range(-speed..speed))
                } else {
                    Vec2::ZERO
                };
                MovingElement::new(origin)
                    .with_velocity(velocity)
                    .with_phase(i as f32 * 0.7)
            })
            .collect()
    }
}
