pub mod braille;
pub mod terminal;
