pub mod evaluate;
pub mod play;
pub mod verify;
