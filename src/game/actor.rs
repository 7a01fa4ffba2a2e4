//! One thread per match, fed through a mailbox.
//!
//! The actor owns the [`Game`]; handles only hold the sending side of its
//! channel. Messages are processed one at a time, so two commands never run
//! concurrently against the same match, while distinct matches share
//! nothing.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use tracing::{debug, info};

use super::snapshot::Snapshot;
use super::Game;
use crate::core::{Command, GameError, GameId};
use crate::diff::PhaseDiff;

enum Message {
    Execute {
        command: Command,
        reply: Sender<Result<PhaseDiff, GameError>>,
    },
    Snapshot {
        reply: Sender<Snapshot>,
    },
    Shutdown,
}

/// Handle to a running match actor.
///
/// ## Example
///
/// ```
/// use archipelago::core::{Command, CommandKind, GameConfig, GameId};
/// use archipelago::game::{Game, GameHandle};
///
/// let game = Game::new(GameId(1), GameConfig::new(2)).unwrap();
/// let handle = GameHandle::spawn(game).unwrap();
///
/// let diff = handle
///     .execute(Command::new(GameId(1), "alice", CommandKind::Join))
///     .unwrap();
/// assert_eq!(diff.players.len(), 1);
///
/// let game = handle.shutdown().unwrap();
/// assert_eq!(game.id(), GameId(1));
/// ```
#[derive(Debug)]
pub struct GameHandle {
    id: GameId,
    sender: Sender<Message>,
    thread: Option<JoinHandle<Game>>,
}

impl GameHandle {
    /// Move `game` onto its own thread.
    pub fn spawn(game: Game) -> std::io::Result<Self> {
        let id = game.id();
        let (sender, receiver) = unbounded::<Message>();
        let thread = thread::Builder::new()
            .name(format!("game-{}", id.0))
            .spawn(move || run(game, receiver))?;
        info!(%id, "game actor started");

        Ok(Self {
            id,
            sender,
            thread: Some(thread),
        })
    }

    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Execute a command and wait for its diff.
    pub fn execute(&self, command: Command) -> Result<PhaseDiff, GameError> {
        let (reply, response) = bounded(1);
        self.send(Message::Execute { command, reply })?;
        response.recv().map_err(|_| stopped(self.id))?
    }

    /// Capture the current state.
    pub fn snapshot(&self) -> Result<Snapshot, GameError> {
        let (reply, response) = bounded(1);
        self.send(Message::Snapshot { reply })?;
        response.recv().map_err(|_| stopped(self.id))
    }

    /// Stop the actor and take the game back.
    pub fn shutdown(mut self) -> Result<Game, GameError> {
        self.send(Message::Shutdown)?;
        let thread = self.thread.take().ok_or_else(|| stopped(self.id))?;
        thread.join().map_err(|_| GameError::illegal(format!("{} actor panicked", self.id)))
    }

    fn send(&self, message: Message) -> Result<(), GameError> {
        self.sender.send(message).map_err(|_| stopped(self.id))
    }
}

impl Drop for GameHandle {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            // The actor may already be gone; nothing to report then.
            let _ = self.sender.send(Message::Shutdown);
            let _ = thread.join();
        }
    }
}

fn stopped(id: GameId) -> GameError {
    GameError::illegal(format!("{id} actor is not running"))
}

fn run(mut game: Game, mailbox: Receiver<Message>) -> Game {
    while let Ok(message) = mailbox.recv() {
        match message {
            Message::Execute { command, reply } => {
                let result = game.execute(&command);
                if reply.send(result).is_err() {
                    debug!(id = %game.id(), "caller dropped before reply");
                }
            }
            Message::Snapshot { reply } => {
                let _ = reply.send(game.snapshot());
            }
            Message::Shutdown => break,
        }
    }
    info!(id = %game.id(), "game actor stopped");
    game
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CommandKind, GameConfig};
    use crate::phase::PhaseName;

    fn handle() -> GameHandle {
        GameHandle::spawn(Game::new(GameId(7), GameConfig::new(2).with_seed(1)).unwrap()).unwrap()
    }

    #[test]
    fn test_commands_are_applied_in_order() {
        let handle = handle();
        handle.execute(Command::new(GameId(7), "alice", CommandKind::Join)).unwrap();
        let diff = handle.execute(Command::new(GameId(7), "bob", CommandKind::Join)).unwrap();

        assert_eq!(diff.attribute("phase"), Some(&crate::diff::Attribute::Phase(PhaseName::Prepare)));
        assert_eq!(handle.snapshot().unwrap().phase.name(), PhaseName::Prepare);
    }

    #[test]
    fn test_errors_are_returned_to_caller() {
        let handle = handle();
        let result = handle.execute(Command::new(GameId(7), "alice", CommandKind::PickCloud { cloud: 0 }));
        assert_eq!(result, Err(GameError::unsupported(PhaseName::Lobby, "PICK_CLOUD")));
    }

    #[test]
    fn test_handles_from_many_threads() {
        let handle = std::sync::Arc::new(handle());
        let joins: Vec<_> = ["alice", "bob"]
            .into_iter()
            .map(|name| {
                let handle = std::sync::Arc::clone(&handle);
                thread::spawn(move || handle.execute(Command::new(GameId(7), name, CommandKind::Join)))
            })
            .collect();
        for join in joins {
            assert!(join.join().unwrap().is_ok());
        }
        assert_eq!(handle.snapshot().unwrap().phase.name(), PhaseName::Prepare);
    }

    #[test]
    fn test_shutdown_returns_game() {
        let handle = handle();
        handle.execute(Command::new(GameId(7), "alice", CommandKind::Join)).unwrap();
        let game = handle.shutdown().unwrap();
        assert_eq!(game.phase().name(), PhaseName::Lobby);
    }
}
