pub mod key_display;
pub mod mode_bar;
pub mod progress_bar;
pub mod word_display;
