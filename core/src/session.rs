//! The live game state for one page session.
//!
//! The game simulation owns and mutates a `GameSession`; the save store only
//! ever borrows it. Nothing here is global.

use crate::{
    person::Person,
    types::{Age, Year},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameSession {
    pub player:     Person,
    pub companions: Vec<Person>,
    pub year:       Year,
    pub age:        Age,
}

impl GameSession {
    pub fn new(player: Person, year: Year) -> Self {
        let age = player.age;
        Self { player, companions: Vec::new(), year, age }
    }

    /// Everything the game tracks, player first.
    pub fn characters(&self) -> impl Iterator<Item = &Person> {
        std::iter::once(&self.player).chain(self.companions.iter())
    }
}
