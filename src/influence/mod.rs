//! Influence computation.
//!
//! The base calculator turns an island group and the professor table into a
//! per-player [`ScoreSheet`]. Turn-scoped rule changes are expressed as an
//! ordered list of [`Modifier`]s applied to that sheet, so a card never
//! rewraps the calculator and a fresh action phase simply starts with an
//! empty list.
//!
//! A [`TieBreak`] turns scores (or hall counts, for professors) into a single
//! winner.

mod calculator;
mod extractor;

pub use calculator::{Influence, InfluenceCalculator, Modifier, PlayerScore, ScoreSheet};
pub use extractor::TieBreak;
