pub mod controls;
pub mod preview;
pub mod trim_bar;
