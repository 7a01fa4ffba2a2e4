//! Piece primitives: small value records placed on and moved around the board.
//!
//! - `Student`: one colored disc
//! - `Professor`: color-bound dominance marker with an optional owner
//! - `Tower`: a player's territorial marker
//! - `BlockCard`: a no-entry tile that belongs to a character card
//! - `Assistant`: a planning card (value + mother-nature moves)

mod assistant;
mod block;
mod professor;
mod student;
mod tower;

pub use assistant::{Assistant, AssistantDeck};
pub use block::BlockCard;
pub use professor::{Professor, ProfessorTable};
pub use student::Student;
pub use tower::Tower;
