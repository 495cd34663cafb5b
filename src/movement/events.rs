//! Movement domain: semantic transition events for presentation layers.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Air,
    Wall,
}

/// A jump impulse was applied this tick.
#[derive(Debug)]
pub struct JumpedEvent {
    pub kind: JumpKind,
}

impl Message for JumpedEvent {}

/// Ground contact after being airborne.
#[derive(Debug)]
pub struct LandedEvent;

impl Message for LandedEvent {}

#[derive(Debug)]
pub struct DashStartedEvent {
    pub dir: Vec2,
}

impl Message for DashStartedEvent {}

#[derive(Debug)]
pub struct DashEndedEvent;

impl Message for DashEndedEvent {}
