//! Board state shared by every phase after the lobby.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::endgame::{EndReason, GameResult};
use crate::board::{Archipelago, Conquest, IslandId, MotherNature};
use crate::characters::{Character, CharacterKind};
use crate::containers::{transfer, Cloud, Entrance, Hall, Sack, StudentContainer};
use crate::core::config::{ACTIVE_CHARACTERS, BANK_COINS, ISLAND_COUNT, MIN_ISLAND_GROUPS};
use crate::core::{Color, GameConfig, GameError, GameRng, Mage, PlayerId, RuleSet, TowerColor};
use crate::influence::{Influence, InfluenceCalculator, TieBreak};
use crate::pieces::{Assistant, AssistantDeck, ProfessorTable, Student};

/// Hall counts that earn a coin in expert mode.
const COIN_STEP: u8 = 3;

/// A seated player and their school board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub username: String,
    pub seat: PlayerId,
    pub mage: Option<Mage>,
    pub tower_color: TowerColor,
    /// Towers not yet placed on an island.
    pub towers_left: u8,
    pub coins: u8,
    pub entrance: Entrance,
    pub hall: Hall,
    /// Assistants still in hand.
    pub deck: AssistantDeck,
    /// Assistant played this round.
    pub played: Option<Assistant>,
}

impl Player {
    fn new(username: &str, seat: PlayerId, tower_color: TowerColor, rules: &RuleSet, coins: u8) -> Self {
        Self {
            username: username.to_string(),
            seat,
            mage: None,
            tower_color,
            towers_left: rules.towers,
            coins,
            entrance: Entrance::new(rules.entrance_size),
            hall: Hall::new(),
            deck: AssistantDeck::full(),
            played: None,
        }
    }
}

/// What happened when an island group was resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A block was consumed instead.
    Blocked,
    /// No single leader, or the leader already controls the group.
    Unchanged,
    /// Control moved to `player`.
    Conquered { player: PlayerId, conquest: Conquest },
}

/// Everything on the table once the match has started.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub config: GameConfig,
    pub rules: RuleSet,
    pub players: Vector<Player>,
    pub islands: Archipelago,
    pub mother_nature: MotherNature,
    pub sack: Sack,
    pub clouds: Vector<Cloud>,
    pub professors: ProfessorTable,
    /// Active characters (expert mode only).
    pub characters: Vector<Character>,
    pub bank: u8,
    pub rng: GameRng,
    /// Planning rounds started so far.
    pub round: u32,
    /// The current round is the last one.
    pub last_round: bool,
    /// The sack could not refill the clouds.
    pub sack_exhausted: bool,
}

impl Table {
    /// Lay out a new match for `usernames` (seat order).
    ///
    /// Mother nature lands on a random island; every island except hers and
    /// the opposite one gets one student from a ten-student bag. Entrances
    /// are filled from the sack and, in expert mode, three characters are set
    /// out and coins handed out.
    pub fn setup(config: &GameConfig, usernames: &[String]) -> Result<Self, GameError> {
        let rules = config.rules();
        let mut rng = GameRng::new(config.seed);

        let mut islands = Archipelago::new();
        let start = IslandId(rng.gen_range_usize(0..ISLAND_COUNT) as u8);
        let opposite = IslandId(((start.index() + ISLAND_COUNT / 2) % ISLAND_COUNT) as u8);
        let mut bag = Sack::setup_bag();
        for island in (0..ISLAND_COUNT as u8).map(IslandId) {
            if island == start || island == opposite {
                continue;
            }
            let student = bag.remove_random(&mut rng)?;
            islands.add_student(island, student);
        }

        let mut sack = Sack::after_setup();
        let coins = if config.expert { config.starting_coins } else { 0 };

        let mut players = Vector::new();
        for (seat, username) in usernames.iter().enumerate() {
            let tower_color = TowerColor::for_seat(seat)
                .ok_or_else(|| GameError::illegal(format!("no tower color for seat {seat}")))?;
            let mut player = Player::new(username, PlayerId::new(seat as u8), tower_color, &rules, coins);
            sack.draw_into(&mut player.entrance, usize::from(rules.entrance_size), &mut rng);
            players.push_back(player);
        }

        let characters = if config.expert {
            let kinds = match &config.characters {
                Some(kinds) => kinds.clone(),
                None => {
                    let mut all = CharacterKind::ALL.to_vec();
                    rng.shuffle(&mut all);
                    all.truncate(ACTIVE_CHARACTERS);
                    all
                }
            };
            kinds
                .into_iter()
                .map(|kind| Character::setup(kind, &mut sack, &mut rng))
                .collect()
        } else {
            Vector::new()
        };

        let handed_out = usize::from(coins) * usernames.len();
        let bank = if config.expert {
            BANK_COINS.saturating_sub(handed_out.min(usize::from(BANK_COINS)) as u8)
        } else {
            0
        };

        let clouds = (0..usernames.len()).map(|_| Cloud::new(rules.cloud_size)).collect();

        info!(
            players = usernames.len(),
            expert = config.expert,
            mother_nature = %start,
            "table set up"
        );

        Ok(Self {
            config: config.clone(),
            rules,
            players,
            islands,
            mother_nature: MotherNature::new(start),
            sack,
            clouds,
            professors: ProfessorTable::new(),
            characters,
            bank,
            rng,
            round: 0,
            last_round: false,
            sack_exhausted: false,
        })
    }

    // === Seats ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn player(&self, seat: PlayerId) -> &Player {
        &self.players[seat.index()]
    }

    pub fn player_mut(&mut self, seat: PlayerId) -> &mut Player {
        &mut self.players[seat.index()]
    }

    /// Seat of `username`, if seated.
    #[must_use]
    pub fn seat_of(&self, username: &str) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| p.username == username)
            .map(|p| p.seat)
    }

    /// Seat of `username`, or [`GameError::InvalidPlayer`].
    pub fn require_seat(&self, username: &str) -> Result<PlayerId, GameError> {
        self.seat_of(username)
            .ok_or_else(|| GameError::invalid_player(username))
    }

    /// Active character of `kind`, if in play.
    #[must_use]
    pub fn character(&self, kind: CharacterKind) -> Option<&Character> {
        self.characters.iter().find(|c| c.kind() == kind)
    }

    // === Round bookkeeping ===

    /// Refill every cloud for a new round.
    ///
    /// When the sack cannot fill all of them the clouds stay empty and the
    /// round becomes the last one.
    pub fn fill_clouds(&mut self) {
        let needed = self.clouds.len() * usize::from(self.rules.cloud_size);
        if self.sack.len() < needed {
            info!(left = self.sack.len(), needed, "sack exhausted; last round");
            self.sack_exhausted = true;
            self.last_round = true;
            return;
        }

        let cloud_size = usize::from(self.rules.cloud_size);
        for cloud in self.clouds.iter_mut() {
            self.sack.draw_into(cloud, cloud_size, &mut self.rng);
        }
    }

    /// Forget the assistants played last round.
    pub fn clear_assistants(&mut self) {
        for player in self.players.iter_mut() {
            player.played = None;
        }
    }

    // === Students and professors ===

    /// Move a student of `color` from the entrance of `seat` to their hall.
    pub fn move_to_hall(&mut self, seat: PlayerId, color: Color, rule: TieBreak) -> Result<(), GameError> {
        let player = self.player_mut(seat);
        transfer(&mut player.entrance, &mut player.hall, color)?;
        self.hall_gained(seat, color, rule);
        Ok(())
    }

    /// Place a student straight into the hall of `seat`.
    pub fn add_to_hall(&mut self, seat: PlayerId, student: Student, rule: TieBreak) -> Result<(), GameError> {
        self.player_mut(seat).hall.add(student)?;
        self.hall_gained(seat, student.color, rule);
        Ok(())
    }

    /// Bookkeeping after a hall gained a student: coin reward and professor.
    fn hall_gained(&mut self, seat: PlayerId, color: Color, rule: TieBreak) {
        let count = self.player(seat).hall.count(color);
        if self.config.expert && count % COIN_STEP == 0 && self.bank > 0 {
            self.bank -= 1;
            self.player_mut(seat).coins += 1;
            debug!(%seat, %color, count, "coin awarded");
        }
        self.refresh_professor(color, rule);
    }

    /// Re-evaluate the professor of `color`.
    ///
    /// The player with the most students of that color in their hall takes
    /// it; when `rule` finds no single winner the current owner keeps it.
    pub fn refresh_professor(&mut self, color: Color, rule: TieBreak) {
        let counts = self
            .players
            .iter()
            .map(|p| (p.seat, u32::from(p.hall.count(color))));
        if let Some(winner) = rule.winner(counts) {
            if self.professors.owner(color) != Some(winner) {
                debug!(%color, %winner, "professor moved");
                self.professors.assign(color, winner);
            }
        }
    }

    /// Re-evaluate every professor.
    pub fn refresh_professors(&mut self, rule: TieBreak) {
        for color in Color::ALL {
            self.refresh_professor(color, rule);
        }
    }

    // === Islands ===

    /// Resolve influence on the group containing `island`.
    ///
    /// A blocked group loses one block, which goes back to the card it came
    /// from. Otherwise a single strict leader conquers the group, placing as
    /// many towers as they have left; displaced towers return to their owners.
    pub fn resolve(&mut self, island: IslandId, calculator: &InfluenceCalculator) -> Resolution {
        match calculator.evaluate(&self.islands, island, &self.professors, self.player_count()) {
            Influence::Blocked => {
                if let Some(block) = self.islands.take_block(island) {
                    if let Some(card) = self.characters.iter_mut().find(|c| c.kind() == block.origin) {
                        card.return_block();
                    }
                }
                debug!(%island, "block consumed");
                Resolution::Blocked
            }
            Influence::Scores(sheet) => {
                let Some(leader) = sheet.leader(TieBreak::Exclusive) else {
                    return Resolution::Unchanged;
                };
                if self.islands.controller(island) == Some(leader) {
                    return Resolution::Unchanged;
                }

                let (color, budget) = {
                    let player = self.player(leader);
                    (player.tower_color, player.towers_left)
                };
                let conquest = self.islands.conquer(island, leader, color, budget);
                self.player_mut(leader).towers_left -= conquest.placed;
                for &(owner, returned) in &conquest.displaced {
                    self.player_mut(owner).towers_left += returned;
                }
                Resolution::Conquered {
                    player: leader,
                    conquest,
                }
            }
        }
    }

    // === End of match ===

    /// Instant end condition, if reached.
    #[must_use]
    pub fn game_over(&self) -> Option<EndReason> {
        if let Some(player) = self.players.iter().find(|p| p.towers_left == 0) {
            return Some(EndReason::NoTowersLeft(player.seat));
        }
        if self.islands.group_count() <= MIN_ISLAND_GROUPS {
            return Some(EndReason::FewIslandGroups);
        }
        None
    }

    /// Final standings: fewest towers left, then most professors.
    #[must_use]
    pub fn standings(&self) -> GameResult {
        let Some(fewest) = self.players.iter().map(|p| p.towers_left).min() else {
            return GameResult::NoWinner;
        };
        let contenders: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.towers_left == fewest)
            .map(|p| p.seat)
            .collect();

        let best = contenders
            .iter()
            .map(|&seat| self.professors.count_owned(seat))
            .max()
            .unwrap_or(0);
        let winners: Vec<PlayerId> = contenders
            .into_iter()
            .filter(|&seat| self.professors.count_owned(seat) == best)
            .collect();

        match winners.as_slice() {
            [single] => GameResult::Winner(*single),
            _ => GameResult::Winners(winners),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: PlayerId = PlayerId::new(0);
    const B: PlayerId = PlayerId::new(1);

    fn names(n: usize) -> Vec<String> {
        ["alice", "bob", "carol"][..n].iter().map(|s| s.to_string()).collect()
    }

    fn table(n: usize, expert: bool) -> Table {
        Table::setup(&GameConfig::new(n).with_expert(expert).with_seed(17), &names(n)).unwrap()
    }

    #[test]
    fn test_setup_two_players() {
        let table = table(2, false);

        let empty: Vec<_> = table
            .islands
            .iter()
            .filter(|i| i.students().is_empty())
            .map(|i| i.id())
            .collect();
        let mn = table.mother_nature.island();
        assert_eq!(empty.len(), 2);
        assert!(empty.contains(&mn));
        assert!(empty.contains(&IslandId(((mn.index() + 6) % 12) as u8)));

        for player in table.players.iter() {
            assert_eq!(player.entrance.len(), 7);
            assert_eq!(player.towers_left, 8);
            assert_eq!(player.coins, 0);
        }
        assert_eq!(table.sack.len(), 120 - 14);
        assert!(table.characters.is_empty());
        assert_eq!(table.clouds.len(), 2);
    }

    #[test]
    fn test_setup_expert_three_players() {
        let table = table(3, true);

        assert_eq!(table.characters.len(), 3);
        assert_eq!(table.bank, 17);
        assert!(table.players.iter().all(|p| p.coins == 1 && p.entrance.len() == 9));
        assert_eq!(table.player(PlayerId::new(2)).tower_color, TowerColor::Grey);

        let stocked: usize = table
            .characters
            .iter()
            .filter_map(|c| c.students().map(StudentContainer::len))
            .sum();
        assert_eq!(table.sack.len(), 120 - 27 - stocked);
    }

    #[test]
    fn test_setup_is_deterministic() {
        assert_eq!(table(3, true), table(3, true));
    }

    #[test]
    fn test_seat_lookup() {
        let table = table(2, false);
        assert_eq!(table.seat_of("bob"), Some(B));
        assert_eq!(table.require_seat("mallory"), Err(GameError::invalid_player("mallory")));
    }

    #[test]
    fn test_fill_clouds() {
        let mut table = table(2, false);
        table.fill_clouds();
        assert!(table.clouds.iter().all(|c| c.len() == 3));
        assert!(!table.sack_exhausted);
    }

    #[test]
    fn test_fill_clouds_with_short_sack() {
        let mut table = table(2, false);
        table.sack = Sack::with_counts(crate::containers::StudentCounts::uniform(1));

        table.fill_clouds();

        assert!(table.sack_exhausted);
        assert!(table.last_round);
        assert!(table.clouds.iter().all(|c| c.is_empty()));
        assert_eq!(table.sack.len(), 5);
    }

    fn give_hall(table: &mut Table, seat: PlayerId, color: Color, n: usize) {
        for _ in 0..n {
            table.player_mut(seat).hall.add(Student::new(color)).unwrap();
        }
    }

    #[test]
    fn test_professor_needs_strict_majority() {
        let mut table = table(2, false);
        give_hall(&mut table, A, Color::Green, 2);
        table.refresh_professor(Color::Green, TieBreak::Exclusive);
        assert_eq!(table.professors.owner(Color::Green), Some(A));

        give_hall(&mut table, B, Color::Green, 2);
        table.refresh_professor(Color::Green, TieBreak::Exclusive);
        assert_eq!(table.professors.owner(Color::Green), Some(A));

        table.refresh_professor(Color::Green, TieBreak::Inclusive(B));
        assert_eq!(table.professors.owner(Color::Green), Some(B));
    }

    #[test]
    fn test_coin_awarded_on_third_student() {
        let mut table = table(2, true);
        give_hall(&mut table, A, Color::Red, 2);
        let bank = table.bank;

        table.add_to_hall(A, Student::new(Color::Red), TieBreak::Exclusive).unwrap();

        assert_eq!(table.player(A).coins, 2);
        assert_eq!(table.bank, bank - 1);
        assert_eq!(table.professors.owner(Color::Red), Some(A));
    }

    #[test]
    fn test_no_coin_when_bank_empty() {
        let mut table = table(2, true);
        table.bank = 0;
        give_hall(&mut table, A, Color::Red, 2);

        table.add_to_hall(A, Student::new(Color::Red), TieBreak::Exclusive).unwrap();

        assert_eq!(table.player(A).coins, 1);
    }

    #[test]
    fn test_resolve_conquers_and_returns_towers() {
        let mut table = table(2, false);
        table.professors.assign(Color::Yellow, A);
        table.islands.add_student(IslandId(3), Student::new(Color::Yellow));

        let first = table.resolve(IslandId(3), &InfluenceCalculator::new());
        assert!(matches!(first, Resolution::Conquered { player: A, .. }));
        assert_eq!(table.player(A).towers_left, 7);

        table.professors.assign(Color::Yellow, B);
        table.islands.add_student(IslandId(3), Student::new(Color::Yellow));
        let second = table.resolve(IslandId(3), &InfluenceCalculator::new());

        // B: the yellow students; A: one tower.
        assert!(matches!(second, Resolution::Conquered { player: B, .. }));
        assert_eq!(table.player(A).towers_left, 8);
        assert_eq!(table.player(B).towers_left, 7);
    }

    #[test]
    fn test_resolve_blocked_returns_block_to_card() {
        let config = GameConfig::new(2).with_characters(vec![
            CharacterKind::Grandma,
            CharacterKind::Knight,
            CharacterKind::Monk,
        ]);
        let mut table = Table::setup(&config, &names(2)).unwrap();
        table.characters[0].take_block();
        table
            .islands
            .place_block(IslandId(5), crate::pieces::BlockCard::new(CharacterKind::Grandma));

        let outcome = table.resolve(IslandId(5), &InfluenceCalculator::new());

        assert_eq!(outcome, Resolution::Blocked);
        assert_eq!(table.islands.group(IslandId(5)).blocks, 0);
        assert_eq!(table.character(CharacterKind::Grandma).map(Character::blocks), Some(4));
    }

    #[test]
    fn test_game_over_on_few_groups() {
        let mut table = table(2, false);
        assert_eq!(table.game_over(), None);
        for i in 1..10 {
            table.islands.merge(IslandId(0), IslandId(i));
        }
        assert_eq!(table.islands.group_count(), 3);
        assert_eq!(table.game_over(), Some(EndReason::FewIslandGroups));
    }

    #[test]
    fn test_standings() {
        let mut table = table(3, false);
        table.player_mut(A).towers_left = 2;
        table.player_mut(B).towers_left = 2;
        assert_eq!(table.standings(), GameResult::Winners(vec![A, B]));

        table.professors.assign(Color::Pink, B);
        assert_eq!(table.standings(), GameResult::Winner(B));
    }
}
