/// Chess domain types and move generation.
pub mod chess;
/// The rules façade that referees a game.
pub mod referee;
