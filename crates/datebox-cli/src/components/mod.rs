pub mod grid;
pub mod pick;
pub mod replay;
