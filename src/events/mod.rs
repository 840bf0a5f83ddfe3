pub mod keyboard;
pub mod keys;
pub mod pointer;

pub use keyboard::wire_bell_keydown;
pub use pointer::{wire_bell_tap, wire_permission_buttons};
