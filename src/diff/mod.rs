//! Structural delta between two phases.
//!
//! A [`PhaseDiff`] is computed by comparing flat views of two phase values,
//! never by tracking mutations: transitions produce fresh snapshots, so a
//! plain equality check per entity finds everything that changed.
//!
//! The network payload is [`PhaseDiff::to_map`], a flat JSON object holding
//! only the attributes and entity lists that changed. Seats that disappear
//! (a lobby LEAVE) are listed under `removedPlayers`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::board::IslandId;
use crate::characters::{Character, CharacterKind};
use crate::containers::{StudentContainer, StudentCounts};
use crate::core::{Mage, PlayerId, TowerColor};
use crate::phase::{Phase, PhaseName, Table};
use crate::pieces::{Professor, Tower};

// === Entity views ===

/// Public view of a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub seat: PlayerId,
    pub username: String,
    pub mage: Option<Mage>,
    pub tower_color: Option<TowerColor>,
    pub towers_left: u8,
    pub coins: u8,
    pub hand: usize,
    pub played: Option<u8>,
}

/// A school board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub seat: PlayerId,
    pub entrance: StudentCounts,
    pub hall: StudentCounts,
}

/// One island slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IslandView {
    pub id: IslandId,
    /// Root of the group this slot belongs to.
    pub group: IslandId,
    pub students: StudentCounts,
    pub tower: Option<Tower>,
    pub blocks: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudView {
    pub index: usize,
    pub students: StudentCounts,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterView {
    pub kind: CharacterKind,
    pub cost: u8,
    pub used: bool,
    pub students: Option<StudentCounts>,
    pub blocks: u8,
}

impl From<&Character> for CharacterView {
    fn from(card: &Character) -> Self {
        Self {
            kind: card.kind(),
            cost: card.cost(),
            used: card.used(),
            students: card.students().map(|s| *s.counts()),
            blocks: card.blocks(),
        }
    }
}

/// Scalar attributes of a phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attribute {
    Phase(PhaseName),
    CurrentPlayer(Option<String>),
    MotherNature(Option<IslandId>),
    SackEmpty(bool),
    CharacterUsed(bool),
    PlayerCount(usize),
}

impl Attribute {
    /// Key in the flat payload.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Attribute::Phase(_) => "phase",
            Attribute::CurrentPlayer(_) => "currentPlayer",
            Attribute::MotherNature(_) => "motherNature",
            Attribute::SackEmpty(_) => "sackEmpty",
            Attribute::CharacterUsed(_) => "characterUsed",
            Attribute::PlayerCount(_) => "playerCount",
        }
    }

    fn value(&self) -> Value {
        match self {
            Attribute::Phase(name) => Value::from(name.as_str()),
            Attribute::CurrentPlayer(user) => user.clone().map_or(Value::Null, Value::from),
            Attribute::MotherNature(island) => island.map_or(Value::Null, |i| Value::from(i.0)),
            Attribute::SackEmpty(flag) | Attribute::CharacterUsed(flag) => Value::from(*flag),
            Attribute::PlayerCount(n) => Value::from(*n),
        }
    }
}

/// Flattened content of a phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct PhaseView {
    attributes: Vec<Attribute>,
    players: Vec<PlayerView>,
    professors: Vec<Professor>,
    boards: Vec<BoardView>,
    islands: Vec<IslandView>,
    clouds: Vec<CloudView>,
    characters: Vec<CharacterView>,
}

impl PhaseView {
    fn of(phase: &Phase) -> Self {
        let mut view = PhaseView {
            attributes: vec![
                Attribute::Phase(phase.name()),
                Attribute::CurrentPlayer(phase.current_username().map(str::to_string)),
                Attribute::CharacterUsed(phase.action().is_some_and(|a| a.character_played())),
            ],
            ..PhaseView::default()
        };

        match phase.table() {
            None => {
                if let Phase::Lobby(lobby) = phase {
                    view.attributes.push(Attribute::PlayerCount(lobby.players().len()));
                    view.players = lobby
                        .players()
                        .iter()
                        .enumerate()
                        .map(|(seat, username)| PlayerView {
                            seat: PlayerId::new(seat as u8),
                            username: username.clone(),
                            mage: None,
                            tower_color: None,
                            towers_left: 0,
                            coins: 0,
                            hand: 0,
                            played: None,
                        })
                        .collect();
                }
            }
            Some(table) => view.fill_table(table),
        }
        view
    }

    fn fill_table(&mut self, table: &Table) {
        self.attributes.extend([
            Attribute::PlayerCount(table.player_count()),
            Attribute::MotherNature(Some(table.mother_nature.island())),
            Attribute::SackEmpty(table.sack_exhausted || table.sack.is_empty()),
        ]);

        for player in table.players.iter() {
            self.players.push(PlayerView {
                seat: player.seat,
                username: player.username.clone(),
                mage: player.mage,
                tower_color: Some(player.tower_color),
                towers_left: player.towers_left,
                coins: player.coins,
                hand: player.deck.len(),
                played: player.played.map(|a| a.value()),
            });
            self.boards.push(BoardView {
                seat: player.seat,
                entrance: *player.entrance.counts(),
                hall: *player.hall.counts(),
            });
        }

        self.professors = table.professors.iter().collect();
        self.islands = table
            .islands
            .iter()
            .map(|island| IslandView {
                id: island.id(),
                group: table.islands.root(island.id()),
                students: *island.students(),
                tower: island.tower(),
                blocks: island.blocks().len(),
            })
            .collect();
        self.clouds = table
            .clouds
            .iter()
            .enumerate()
            .map(|(index, cloud)| CloudView {
                index,
                students: *cloud.counts(),
            })
            .collect();
        self.characters = table.characters.iter().map(CharacterView::from).collect();
    }
}

/// Entities of `new` that are absent from or different in `old`.
fn changed<T: PartialEq + Clone, K: PartialEq>(old: &[T], new: &[T], key: impl Fn(&T) -> K) -> Vec<T> {
    new.iter()
        .filter(|item| !old.iter().any(|o| key(o) == key(item) && o == *item))
        .cloned()
        .collect()
}

/// Keys present in `old` but gone from `new`.
fn removed<T, K: PartialEq>(old: &[T], new: &[T], key: impl Fn(&T) -> K) -> Vec<K> {
    old.iter()
        .map(&key)
        .filter(|k| !new.iter().any(|n| key(n) == *k))
        .collect()
}

/// Delta between two phases.
///
/// ## Example
///
/// ```
/// use archipelago::core::GameConfig;
/// use archipelago::diff::PhaseDiff;
/// use archipelago::phase::Phase;
///
/// let Phase::Lobby(lobby) = Phase::lobby(GameConfig::new(2)) else { unreachable!() };
/// let before = Phase::Lobby(lobby.clone());
/// let after = lobby.join("alice").unwrap();
///
/// let diff = PhaseDiff::compare(&before, &after);
/// assert_eq!(diff.players.len(), 1);
/// assert!(diff.to_map().contains_key("playerCount"));
/// assert!(!diff.to_map().contains_key("phase"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDiff {
    pub attributes: Vec<Attribute>,
    pub players: Vec<PlayerView>,
    pub removed_players: Vec<PlayerId>,
    pub professors: Vec<Professor>,
    pub boards: Vec<BoardView>,
    pub islands: Vec<IslandView>,
    pub clouds: Vec<CloudView>,
    pub characters: Vec<CharacterView>,
}

impl PhaseDiff {
    /// Everything that differs between `old` and `new`.
    #[must_use]
    pub fn compare(old: &Phase, new: &Phase) -> Self {
        Self::between(&PhaseView::of(old), &PhaseView::of(new))
    }

    /// The full state of `phase`, for a client with no prior state.
    #[must_use]
    pub fn initial(phase: &Phase) -> Self {
        Self::between(&PhaseView::default(), &PhaseView::of(phase))
    }

    fn between(old: &PhaseView, new: &PhaseView) -> Self {
        Self {
            attributes: changed(&old.attributes, &new.attributes, |a| a.key()),
            players: changed(&old.players, &new.players, |p| p.seat),
            removed_players: removed(&old.players, &new.players, |p| p.seat),
            professors: changed(&old.professors, &new.professors, |p| p.color),
            boards: changed(&old.boards, &new.boards, |b| b.seat),
            islands: changed(&old.islands, &new.islands, |i| i.id),
            clouds: changed(&old.clouds, &new.clouds, |c| c.index),
            characters: changed(&old.characters, &new.characters, |c| c.kind),
        }
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
            && self.players.is_empty()
            && self.removed_players.is_empty()
            && self.professors.is_empty()
            && self.boards.is_empty()
            && self.islands.is_empty()
            && self.clouds.is_empty()
            && self.characters.is_empty()
    }

    /// Changed scalar attribute by key.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.key() == key)
    }

    /// Flat payload: one key per changed attribute, one array per changed
    /// entity list.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for attribute in &self.attributes {
            map.insert(attribute.key().to_string(), attribute.value());
        }
        insert_list(&mut map, "players", &self.players);
        insert_list(&mut map, "removedPlayers", &self.removed_players);
        insert_list(&mut map, "professors", &self.professors);
        insert_list(&mut map, "boards", &self.boards);
        insert_list(&mut map, "islands", &self.islands);
        insert_list(&mut map, "clouds", &self.clouds);
        insert_list(&mut map, "characters", &self.characters);
        map
    }
}

fn insert_list<T: Serialize>(map: &mut Map<String, Value>, key: &str, items: &[T]) {
    if items.is_empty() {
        return;
    }
    // Views are plain data; serialization cannot fail.
    if let Ok(value) = serde_json::to_value(items) {
        map.insert(key.to_string(), value);
    }
}
