//! server_core: the authoritative player-character core.
//!
//! Owns every health/death/respawn/equip decision; non-authoritative sides
//! only observe replicated state and send requests the authority may apply
//! or silently ignore. One ordered simulation step per network tick (see
//! `ecs::schedule`); all delays are countdown state, never blocking waits.

use data_runtime::configs::abilities::AbilitiesCfg;
use data_runtime::configs::combat::CombatCfg;
use data_runtime::configs::game_mode::GameModeCfg;
use data_runtime::configs::movement::MovementCfg;
use glam::Vec3;
use net_core::command::ClientCmd;
use net_core::snapshot::{KillFeedMsg, SnapshotDecode};
use sim_core::CollisionQuery;

pub mod ecs;
pub mod events;
pub mod health;
pub mod hopball;
pub mod player;
pub mod spawn;
pub mod tag;

pub use events::GameEvent;
pub use health::AssistTracker;
pub use hopball::{CarryState, Hopball};
pub use player::{BodyPart, Player, PlayerId, PlayerStore, Team, WORLD_ATTACKER};
pub use spawn::{SpawnPoint, SpawnRegistry};

/// Authoritative match state: players, spawn registry, objective, tuning,
/// and the per-tick buses the schedule drains.
pub struct ServerState {
    pub movement_cfg: MovementCfg,
    pub abilities_cfg: AbilitiesCfg,
    pub combat_cfg: CombatCfg,
    pub mode: GameModeCfg,
    pub players: PlayerStore,
    pub spawns: SpawnRegistry,
    pub hopball: Option<Hopball>,
    pub assists: AssistTracker,
    /// Collision oracle; a bad map still must not panic the tick.
    pub world: Box<dyn CollisionQuery>,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) pending_cmds: Vec<(PlayerId, ClientCmd)>,
    pub(crate) pending_kill_feed: Vec<KillFeedMsg>,
    pub(crate) outbox: Vec<Vec<u8>>,
    pub(crate) time_s: f32,
}

impl ServerState {
    /// Build with default tuning, a ring of spawn points, and the hopball
    /// present when the mode calls for it.
    pub fn new(world: Box<dyn CollisionQuery>, mode: GameModeCfg) -> Self {
        Self::with_configs(
            world,
            mode,
            MovementCfg::default(),
            AbilitiesCfg::default(),
            CombatCfg::default(),
            SpawnRegistry::ring(12.0),
        )
    }

    pub fn with_configs(
        world: Box<dyn CollisionQuery>,
        mode: GameModeCfg,
        movement_cfg: MovementCfg,
        abilities_cfg: AbilitiesCfg,
        combat_cfg: CombatCfg,
        spawns: SpawnRegistry,
    ) -> Self {
        let hopball = mode
            .hopball
            .then(|| Hopball::new(Vec3::new(0.0, 0.5, 0.0)));
        Self {
            movement_cfg,
            abilities_cfg,
            combat_cfg,
            mode,
            players: PlayerStore::default(),
            spawns,
            hopball,
            assists: AssistTracker::default(),
            world,
            events: Vec::new(),
            pending_cmds: Vec::new(),
            pending_kill_feed: Vec::new(),
            outbox: Vec::new(),
            time_s: 0.0,
        }
    }

    /// Join a player: place them at a free spawn point and hand back the id.
    pub fn connect(&mut self, team: Team) -> PlayerId {
        let pawn = sim_core::Pawn::new(Vec3::ZERO);
        let id = self.players.spawn(team, pawn, self.combat_cfg.max_health);
        // Reserve/place/release, same discipline as a respawn.
        let reservation = self.spawns.reserve(id);
        let (pos, yaw) = reservation
            .and_then(|r| self.spawns.get(r))
            .map_or((Vec3::ZERO, 0.0), |sp| (sp.pos, sp.yaw));
        if let Some(p) = self.players.get_mut(id) {
            p.pawn.pos = pos;
            p.pawn.yaw = yaw;
            p.pawn.grounded = true;
        }
        if let Some(r) = reservation {
            self.spawns.release(r);
        }
        id
    }

    /// Queue raw command bytes from a client. Undecodable bytes are logged
    /// and dropped; one client's garbage must not stall the tick.
    pub fn enqueue_cmd(&mut self, from: PlayerId, bytes: &[u8]) {
        let mut slice = bytes;
        match ClientCmd::decode(&mut slice) {
            Ok(cmd) => self.pending_cmds.push((from, cmd)),
            Err(e) => log::warn!("dropping undecodable command from {from:?}: {e:#}"),
        }
    }

    /// Queue an already-decoded command (in-proc hosts and tests).
    pub fn enqueue(&mut self, from: PlayerId, cmd: ClientCmd) {
        self.pending_cmds.push((from, cmd));
    }

    /// One authoritative tick.
    pub fn step_authoritative(&mut self, dt: f32) {
        self.time_s += dt;
        let mut ctx = ecs::schedule::Ctx::new(dt);
        let mut schedule = ecs::schedule::Schedule;
        schedule.run(self, &mut ctx);
    }

    /// Drain the outbound gameplay events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drain framed snapshot messages for broadcast.
    pub fn drain_outbox(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.outbox)
    }

    #[inline]
    #[must_use]
    pub fn time_s(&self) -> f32 {
        self.time_s
    }
}
