use bevy_ecs::prelude::*;
use tracing::debug;

use crate::world::{Location, Look, Position, WorldId};

/// What caused a teleport.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TeleportCause {
    /// Requested by server-side code, such as a plugin.
    Plugin,
    /// Requested through a command.
    Command,
    /// The host moving a spectating player onto the entity or point they
    /// selected.
    Spectate,
    /// Travelling through a nether or end portal.
    Portal,
    Unknown,
}

/// A pending teleport. Inserting this component on a client asks the host to
/// move them; the host applies it in [`TeleportSet`] and removes it.
///
/// Systems running before [`TeleportSet`] may cancel a teleport by removing
/// the component.
#[derive(Component, Copy, Clone, PartialEq, Debug)]
pub struct TeleportRequest {
    pub target: Location,
    pub cause: TeleportCause,
}

impl TeleportRequest {
    pub fn new(target: Location, cause: TeleportCause) -> Self {
        Self { target, cause }
    }
}

/// The system set pending [`TeleportRequest`]s are applied in. Runs in
/// `PostUpdate`.
#[derive(SystemSet, Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TeleportSet;

pub(crate) fn apply_teleports(
    mut commands: Commands,
    mut clients: Query<(
        Entity,
        &TeleportRequest,
        &mut WorldId,
        &mut Position,
        &mut Look,
    )>,
) {
    for (entity, request, mut world, mut pos, mut look) in &mut clients {
        debug!(
            "Teleporting {entity:?} to {:?} ({:?})",
            request.target.position, request.cause
        );

        world.0 = request.target.world;
        pos.set(request.target.position);
        *look = request.target.look;

        commands.entity(entity).remove::<TeleportRequest>();
    }
}
