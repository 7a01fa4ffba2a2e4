//! Phase diffs, snapshots and the per-match actor.

use std::sync::Arc;
use std::thread;

use archipelago::containers::StudentContainer;
use archipelago::core::{Color, Command, CommandKind, Destination, GameConfig, GameId, Mage};
use archipelago::diff::{Attribute, PhaseDiff};
use archipelago::game::{Game, GameHandle, Snapshot, SnapshotError, SNAPSHOT_VERSION};
use archipelago::phase::{Phase, PhaseName};
use archipelago::IslandId;

const ID: GameId = GameId(42);

// =============================================================================
// Helpers
// =============================================================================

fn cmd(user: &str, kind: CommandKind) -> Command {
    Command::new(ID, user, kind)
}

fn setup_commands(config: &GameConfig) -> Vec<Command> {
    let names = ["alice", "bob", "carol"];
    let mut commands: Vec<Command> = names[..config.player_count]
        .iter()
        .map(|n| cmd(n, CommandKind::Join))
        .collect();
    commands.extend(
        names[..config.player_count]
            .iter()
            .zip(Mage::ALL)
            .map(|(n, mage)| cmd(n, CommandKind::ChooseMage { mage })),
    );
    commands
}

fn started(config: GameConfig) -> Game {
    let mut game = Game::new(ID, config.clone()).unwrap();
    for command in setup_commands(&config) {
        game.execute(&command).unwrap();
    }
    game
}

/// A legal command for the current player, if the phase takes one.
fn next_command(phase: &Phase) -> Option<Command> {
    let user = phase.current_username()?.to_string();
    let seat = phase.current_player()?;
    let table = phase.table()?;
    let kind = match phase {
        Phase::Planning(planning) => {
            let taken: Vec<u8> = planning
                .order()
                .iter()
                .filter_map(|&p| table.player(p).played.map(|a| a.value()))
                .collect();
            let deck = &table.player(seat).deck;
            let value = deck
                .iter()
                .map(|a| a.value())
                .find(|v| !taken.contains(v))
                .or_else(|| deck.iter().next().map(|a| a.value()))?;
            CommandKind::PlayAssistant { value }
        }
        Phase::StudentMove(_) => {
            let entrance = &table.player(seat).entrance;
            let color = Color::ALL.into_iter().find(|&c| entrance.count(c) > 0)?;
            CommandKind::MoveStudent {
                color,
                destination: Destination::Island(IslandId(5)),
            }
        }
        Phase::MnMove(_) => CommandKind::MoveMotherNature { steps: 1 },
        Phase::CloudPick(_) => CommandKind::PickCloud {
            cloud: table.clouds.iter().position(|c| !c.is_empty())?,
        },
        _ => return None,
    };
    Some(cmd(&user, kind))
}

fn advance(game: &mut Game, commands: usize) {
    for _ in 0..commands {
        let Some(command) = next_command(game.phase()) else {
            return;
        };
        game.execute(&command).unwrap();
    }
}

// =============================================================================
// Diffs
// =============================================================================

/// Test that every returned diff matches a direct comparison.
#[test]
fn test_execute_returns_phase_diff() {
    let mut game = started(GameConfig::new(2).with_seed(3));
    for _ in 0..30 {
        let before = game.phase().clone();
        let Some(command) = next_command(&before) else {
            break;
        };
        let diff = game.execute(&command).unwrap();

        assert_eq!(diff, PhaseDiff::compare(&before, game.phase()));
        assert!(!diff.is_empty());
        assert!(PhaseDiff::compare(game.phase(), game.phase()).is_empty());
    }
}

/// Test the payload of a student move to an island.
#[test]
fn test_student_move_diff() {
    let mut game = started(GameConfig::new(2).with_seed(3));
    advance(&mut game, 2);
    assert_eq!(game.phase().name(), PhaseName::StudentMove);

    let command = next_command(game.phase()).unwrap();
    let diff = game.execute(&command).unwrap();

    assert_eq!(diff.boards.len(), 1);
    assert_eq!(diff.islands.len(), 1);
    assert_eq!(diff.islands[0].id, IslandId(5));
    assert!(diff.attribute("phase").is_none());
    assert!(diff.players.is_empty());

    let map = diff.to_map();
    assert!(map.contains_key("boards"));
    assert!(map.contains_key("islands"));
    assert!(!map.contains_key("clouds"));
}

/// Test that moving mother nature reports her new island.
#[test]
fn test_mother_nature_diff() {
    let mut game = started(GameConfig::new(2).with_seed(3));
    while game.phase().name() != PhaseName::MnMove {
        advance(&mut game, 1);
    }
    let landing = {
        let table = game.phase().table().unwrap();
        table.islands.ring_from(table.mother_nature.island()).next()
    };

    let command = next_command(game.phase()).unwrap();
    let diff = game.execute(&command).unwrap();

    assert_eq!(diff.attribute("motherNature"), Some(&Attribute::MotherNature(landing)));
    assert_eq!(diff.to_map()["motherNature"], serde_json::json!(landing.unwrap().0));
}

/// Test that the initial diff carries the full state.
#[test]
fn test_initial_diff_is_complete() {
    let game = started(GameConfig::new(3).with_expert(true).with_seed(9));
    let diff = game.initial_diff();

    assert_eq!(diff.players.len(), 3);
    assert_eq!(diff.boards.len(), 3);
    assert_eq!(diff.islands.len(), 12);
    assert_eq!(diff.clouds.len(), 3);
    assert_eq!(diff.characters.len(), 3);
    assert_eq!(diff.professors.len(), 5);

    let map = diff.to_map();
    for key in ["phase", "currentPlayer", "motherNature", "sackEmpty", "playerCount"] {
        assert!(map.contains_key(key), "missing {key}");
    }
    assert_eq!(map["phase"], "PLANNING");
    assert_eq!(map["currentPlayer"], "alice");
}

/// Test that a JSON round trip of the phase changes nothing.
#[test]
fn test_json_round_trip_diff_is_empty() {
    let mut game = started(GameConfig::new(3).with_expert(true).with_seed(12));
    advance(&mut game, 20);

    let json = serde_json::to_string(game.phase()).unwrap();
    let back: Phase = serde_json::from_str(&json).unwrap();

    assert!(PhaseDiff::compare(game.phase(), &back).is_empty());
    assert_eq!(&back, game.phase());
}

// =============================================================================
// Snapshots
// =============================================================================

/// Test that a resumed match continues exactly like the live one.
#[test]
fn test_resume_continues_identically() {
    let mut live = started(GameConfig::new(2).with_seed(77));
    advance(&mut live, 15);

    let bytes = live.snapshot().to_bytes().unwrap();
    let mut resumed = Game::resume(Snapshot::from_bytes(&bytes).unwrap());
    assert_eq!(resumed, live);

    advance(&mut live, 40);
    advance(&mut resumed, 40);
    assert_eq!(resumed.phase(), live.phase());
}

/// Test the JSON encoding of a snapshot.
#[test]
fn test_snapshot_json() {
    let mut game = started(GameConfig::new(2).with_expert(true).with_seed(4));
    advance(&mut game, 5);

    let snapshot = game.snapshot();
    let json = snapshot.to_json().unwrap();
    assert!(json.contains("\"version\": 1"));
    assert_eq!(Snapshot::from_json(&json).unwrap(), snapshot);
}

/// Test that a snapshot from another format version is refused.
#[test]
fn test_snapshot_version_mismatch() {
    let mut snapshot = started(GameConfig::new(2)).snapshot();
    snapshot.version = SNAPSHOT_VERSION + 1;
    let bytes = snapshot.to_bytes().unwrap();

    assert!(matches!(
        Snapshot::from_bytes(&bytes),
        Err(SnapshotError::Version { found: 2, expected: 1 })
    ));
    assert!(matches!(
        Snapshot::from_bytes(&[1, 2, 3]),
        Err(SnapshotError::Binary(_))
    ));
}

/// Test saving to and loading from disk.
#[test]
fn test_snapshot_file() {
    let game = started(GameConfig::new(3).with_seed(1));
    let path = std::env::temp_dir().join(format!("archipelago-snapshot-{}.bin", std::process::id()));

    game.snapshot().save(&path).unwrap();
    let loaded = Snapshot::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, game.snapshot());
    assert!(matches!(
        Snapshot::load(path.with_extension("missing")),
        Err(SnapshotError::Io { .. })
    ));
}

// =============================================================================
// Actor
// =============================================================================

/// Test that the actor applies commands like a local game.
#[test]
fn test_actor_matches_local_game() {
    let config = GameConfig::new(2).with_seed(19);
    let mut local = started(config.clone());
    let handle = GameHandle::spawn(Game::new(ID, config.clone()).unwrap()).unwrap();
    for command in setup_commands(&config) {
        handle.execute(command).unwrap();
    }

    for _ in 0..25 {
        let Some(command) = next_command(local.phase()) else {
            break;
        };
        let expected = local.execute(&command).unwrap();
        assert_eq!(handle.execute(command).unwrap(), expected);
    }

    assert_eq!(handle.snapshot().unwrap(), local.snapshot());
    assert_eq!(handle.shutdown().unwrap(), local);
}

/// Test that matches on separate actors run side by side.
#[test]
fn test_actors_run_in_parallel() {
    let workers: Vec<_> = (0..4u64)
        .map(|seed| {
            thread::spawn(move || {
                let config = GameConfig::new(2).with_seed(seed);
                let mut local = started(config.clone());
                advance(&mut local, 20);

                let mut replay = started(config);
                let handle = GameHandle::spawn(replay.clone()).unwrap();
                for _ in 0..20 {
                    let Some(command) = next_command(replay.phase()) else {
                        break;
                    };
                    replay.execute(&command).unwrap();
                    handle.execute(command).unwrap();
                }
                (local, handle.shutdown().unwrap())
            })
        })
        .collect();

    for worker in workers {
        let (local, remote) = worker.join().unwrap();
        assert_eq!(local, remote);
    }
}

/// Test that one actor serializes commands from many threads.
#[test]
fn test_actor_serializes_joins() {
    let handle = Arc::new(GameHandle::spawn(Game::new(ID, GameConfig::new(3)).unwrap()).unwrap());

    let joins: Vec<_> = ["alice", "bob", "carol", "dave"]
        .into_iter()
        .map(|name| {
            let handle = Arc::clone(&handle);
            thread::spawn(move || handle.execute(cmd(name, CommandKind::Join)).is_ok())
        })
        .collect();
    let accepted = joins
        .into_iter()
        .filter_map(|j| j.join().ok())
        .filter(|ok| *ok)
        .count();

    assert_eq!(accepted, 3);
    let snapshot = handle.snapshot().unwrap();
    assert_eq!(snapshot.phase.name(), PhaseName::Prepare);
}
