//! kidkeys: a typing toy for small children.
//!
//! Easy mode shows and sounds out whatever letter or digit is pressed. Hard
//! mode drills short words with a score and a session high score. The same
//! public directory that holds the letter sounds can be served over HTTP.

pub mod app;
pub mod audio;
pub mod config;
pub mod event;
pub mod game;
pub mod logging;
pub mod server;
pub mod ui;
