use bevy_ecs::prelude::*;
use delayed_respawn_host::{ActionBar, GameMode, TeleportCause, TeleportRequest};
use tracing::{debug, warn};

use crate::clock::{Millis, RespawnClock};
use crate::registry::{RespawnRegistry, RespawnStatus};

/// The action bar text shown while `remaining` milliseconds are left, e.g.
/// `리스폰까지 2.5초`.
pub fn countdown_message(remaining: Millis) -> String {
    let seconds = remaining as f64 / 1000.0;
    format!("리스폰까지 {seconds:.1}초")
}

/// Updates every delayed player's countdown and releases the ones whose
/// delay is over.
pub(crate) fn tick_respawns(
    mut commands: Commands,
    mut clients: Query<(&mut GameMode, &mut ActionBar)>,
    mut registry: ResMut<RespawnRegistry>,
    clock: Res<RespawnClock>,
) {
    registry.tick(clock.now_millis(), |player, client, status| {
        let Ok((mut game_mode, mut action_bar)) = clients.get_mut(client) else {
            if let RespawnStatus::Released(_) = status {
                warn!("Released respawn of {player}, but client {client:?} no longer exists");
            }
            return;
        };

        match status {
            RespawnStatus::Pending { remaining } => {
                action_bar.set(countdown_message(remaining));
            }
            RespawnStatus::Released(respawn) => {
                action_bar.clear();
                *game_mode = respawn.game_mode();

                commands.entity(client).insert(TeleportRequest::new(
                    respawn.location(),
                    TeleportCause::Plugin,
                ));

                debug!("Released {player} in {}", respawn.game_mode());
            }
        }
    });
}
