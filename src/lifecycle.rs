//! Moves pending respawns between the registry and disk as players come and
//! go, and starts new ones when players die.

use bevy_app::AppExit;
use bevy_ecs::prelude::*;
use delayed_respawn_host::{
    GameMode, PlayerJoinEvent, PlayerQuitEvent, PlayerRespawnEvent, TeleportCause,
    TeleportRequest, UniqueId, Worlds,
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::clock::{Millis, RespawnClock};
use crate::config::RespawnSettings;
use crate::record::RespawnRecord;
use crate::registry::RespawnRegistry;
use crate::respawn::Respawn;
use crate::store::RespawnStore;

pub(crate) fn begin_on_respawn(
    mut events: EventReader<PlayerRespawnEvent>,
    mut clients: Query<(&UniqueId, &mut GameMode)>,
    mut registry: ResMut<RespawnRegistry>,
    settings: Res<RespawnSettings>,
    clock: Res<RespawnClock>,
) {
    for event in events.read() {
        let Ok((id, mut game_mode)) = clients.get_mut(event.client) else {
            continue;
        };

        if !game_mode.is_vulnerable() {
            continue;
        }

        let respawn = registry.begin(
            id.0,
            event.client,
            event.respawn_location,
            *game_mode,
            settings.respawn_delay_millis(),
            clock.now_millis(),
        );

        *game_mode = GameMode::Spectator;

        debug!(
            "Delaying respawn of {} until {}ms",
            id.0,
            respawn.respawn_time()
        );
    }
}

pub(crate) fn restore_on_join(
    mut events: EventReader<PlayerJoinEvent>,
    mut clients: Query<(&UniqueId, &mut GameMode)>,
    mut registry: ResMut<RespawnRegistry>,
    store: Res<RespawnStore>,
    worlds: Res<Worlds>,
    clock: Res<RespawnClock>,
) {
    let now = clock.now_millis();

    for event in events.read() {
        let Ok((id, mut game_mode)) = clients.get_mut(event.client) else {
            continue;
        };

        if let Some(respawn) = load(id.0, &store, &worlds, now) {
            registry.insert(id.0, event.client, respawn);
            *game_mode = GameMode::Spectator;
        }
    }
}

/// Restores pending respawns of players who were already connected when the
/// plugin started.
pub(crate) fn restore_online_players(
    mut clients: Query<(Entity, &UniqueId, &mut GameMode)>,
    mut registry: ResMut<RespawnRegistry>,
    store: Res<RespawnStore>,
    worlds: Res<Worlds>,
    clock: Res<RespawnClock>,
) {
    let now = clock.now_millis();

    for (client, id, mut game_mode) in &mut clients {
        if let Some(respawn) = load(id.0, &store, &worlds, now) {
            registry.insert(id.0, client, respawn);
            *game_mode = GameMode::Spectator;
        }
    }
}

pub(crate) fn persist_on_quit(
    mut events: EventReader<PlayerQuitEvent>,
    mut registry: ResMut<RespawnRegistry>,
    store: Res<RespawnStore>,
    worlds: Res<Worlds>,
    clock: Res<RespawnClock>,
) {
    let now = clock.now_millis();

    for event in events.read() {
        if let Some(respawn) = registry.evict(event.id.0) {
            save(event.id.0, &respawn, &store, &worlds, now);
        }
    }
}

/// Writes every pending respawn to disk when the app is about to exit.
pub(crate) fn flush_on_exit(
    mut exits: EventReader<AppExit>,
    mut registry: ResMut<RespawnRegistry>,
    store: Res<RespawnStore>,
    worlds: Res<Worlds>,
    clock: Res<RespawnClock>,
) {
    if exits.is_empty() {
        return;
    }
    exits.clear();

    let now = clock.now_millis();
    let count = registry.len();

    for (player, respawn) in registry.drain() {
        save(player, &respawn, &store, &worlds, now);
    }

    if count > 0 {
        info!("Saved {count} pending respawn(s) to {}", store.root().display());
    }
}

/// Keeps the host from moving a delayed player's camera onto whatever they
/// click while spectating.
pub(crate) fn cancel_spectate_teleports(
    mut commands: Commands,
    requests: Query<(Entity, &UniqueId, &TeleportRequest)>,
    registry: Res<RespawnRegistry>,
) {
    for (client, id, request) in &requests {
        if request.cause == TeleportCause::Spectate && registry.is_tracked(id.0) {
            commands.entity(client).remove::<TeleportRequest>();
            debug!("Cancelled spectate teleport of {}", id.0);
        }
    }
}

/// Takes the player's record off disk and turns it back into a live respawn.
/// Expired and unreadable records are dropped.
fn load(player: Uuid, store: &RespawnStore, worlds: &Worlds, now: Millis) -> Option<Respawn> {
    let record = match store.take(player) {
        Ok(Some(record)) => record,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to load pending respawn of {player}: {e}");
            return None;
        }
    };

    if record.is_expired() {
        debug!(
            "Discarding expired respawn of {player} ({}ms remaining)",
            record.respawn_time
        );
        return None;
    }

    match record.decode(worlds, now) {
        Ok(respawn) => {
            debug!(
                "Restored respawn of {player} with {}ms remaining",
                record.respawn_time
            );
            Some(respawn)
        }
        Err(e) => {
            warn!("Dropping pending respawn of {player}: {e}");
            None
        }
    }
}

fn save(player: Uuid, respawn: &Respawn, store: &RespawnStore, worlds: &Worlds, now: Millis) {
    let mut record = match RespawnRecord::encode(respawn, worlds, now) {
        Ok(record) => record,
        Err(e) => {
            warn!("Dropping pending respawn of {player}: {e}");
            return;
        }
    };

    // Due but not yet released: keep it alive so the next session releases it.
    record.respawn_time = record.respawn_time.max(1);

    if let Err(e) = store.save(player, &record) {
        error!(
            "Failed to save pending respawn of {player} to {}: {e}",
            store.path(player).display()
        );
    }
}
