//! Authoritative player store and basic types.

use net_core::snapshot::{FLAG_CARRYING, FLAG_CROUCHING, FLAG_DEAD, FLAG_GROUNDED, FLAG_TAGGED};
use sim_core::input::{EdgeSet, InputSample};
use sim_core::{Abilities, Pawn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(pub u32);

/// Sentinel attacker for world/out-of-bounds damage. Always lethal and
/// bypasses the tag-mode damage interception.
pub const WORLD_ATTACKER: PlayerId = PlayerId(u32::MAX);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Solo,
    Red,
    Blue,
}

/// Body region reported with a hit; carried through untouched (no
/// multiplier is part of the authoritative contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPart {
    Body,
    Head,
    Limb,
}

impl BodyPart {
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            BodyPart::Body => 0,
            BodyPart::Head => 1,
            BodyPart::Limb => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub team: Team,
    pub pawn: Pawn,
    pub abilities: Abilities,
    pub input: InputSample,
    /// Edge detectors fed from the owner's sequenced input frames.
    pub edges: EdgeSet,
    /// Sequence of the last input frame applied (echoed as the ack).
    pub last_input_seq: u32,
    pub health: f32,
    pub dead: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub tagged: bool,
    pub time_tagged_s: f32,
    /// Respawn countdown; meaningful only while dead.
    pub respawn_t: f32,
    /// Spawn point held from death until placement.
    pub reservation: Option<u32>,
    /// Seconds since the last damage taken (regen grace).
    pub since_damage_s: f32,
    pub carrying: bool,
    /// Per-player snapshot sequence (per-field ordered channel).
    pub repl_seq: u32,
}

impl Player {
    pub fn new(id: PlayerId, team: Team, pawn: Pawn, max_health: f32) -> Self {
        Self {
            id,
            team,
            pawn,
            abilities: Abilities::default(),
            input: InputSample::default(),
            edges: EdgeSet::default(),
            last_input_seq: 0,
            health: max_health,
            dead: false,
            kills: 0,
            deaths: 0,
            assists: 0,
            tagged: false,
            time_tagged_s: 0.0,
            respawn_t: 0.0,
            reservation: None,
            since_damage_s: f32::MAX,
            carrying: false,
            repl_seq: 0,
        }
    }

    #[inline]
    pub fn alive(&self) -> bool {
        !self.dead
    }

    /// Replication flag byte.
    pub fn flags(&self) -> u8 {
        let mut f = 0;
        if self.dead {
            f |= FLAG_DEAD;
        }
        if self.pawn.crouching {
            f |= FLAG_CROUCHING;
        }
        if self.pawn.grounded {
            f |= FLAG_GROUNDED;
        }
        if self.tagged {
            f |= FLAG_TAGGED;
        }
        if self.carrying {
            f |= FLAG_CARRYING;
        }
        f
    }
}

/// Flat store keyed by stable ids, in the style of an actor table.
#[derive(Default)]
pub struct PlayerStore {
    next_id: u32,
    players: Vec<Player>,
}

impl PlayerStore {
    pub fn spawn(&mut self, team: Team, pawn: Pawn, max_health: f32) -> PlayerId {
        self.next_id += 1;
        let id = PlayerId(self.next_id);
        self.players.push(Player::new(id, team, pawn, max_health));
        id
    }

    #[inline]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }
}
