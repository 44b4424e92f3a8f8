//! Engines behind the PC assembly bot: a drag-and-drop placement board and
//! a multiple-choice quiz. Both are plain state machines that report what
//! changed as events; the bot binary turns those events into messages.

pub mod assembly;
pub mod config;
pub mod error;
pub mod feedback;
pub mod progress;
pub mod quiz;
