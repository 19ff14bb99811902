// Six-sided die driven by the engine's shared generator

use rand::Rng;
use std::collections::VecDeque;

pub const DICE_FACES: u8 = 6;

/// Six-sided die.
///
/// A die can be loaded with a fixed sequence of faces; those are returned
/// first, in order, before it falls back to the random generator.
#[derive(Debug, Clone)]
pub struct Dice {
    value: u8,
    loaded: VecDeque<u8>,
}

impl Dice {
    pub fn new() -> Self {
        Dice {
            value: 1,
            loaded: VecDeque::new(),
        }
    }

    /// Die that yields `faces` before rolling randomly. Faces are clamped to 1..=6.
    pub fn scripted<I: IntoIterator<Item = u8>>(faces: I) -> Self {
        Dice {
            value: 1,
            loaded: faces
                .into_iter()
                .map(|f| f.clamp(1, DICE_FACES))
                .collect(),
        }
    }

    /// Rolls and returns a face in 1..=6
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u8 {
        self.value = match self.loaded.pop_front() {
            Some(face) => face,
            None => rng.random_range(1..=DICE_FACES),
        };
        self.value
    }

    /// Face shown by the last roll
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Scripted faces not yet consumed
    pub fn loaded_remaining(&self) -> usize {
        self.loaded.len()
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::new()
    }
}
