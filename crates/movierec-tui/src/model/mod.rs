pub mod poster;
pub mod recommendations;
