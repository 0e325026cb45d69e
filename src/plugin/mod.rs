pub mod mintmanga;

pub use mintmanga::Mintmanga;
