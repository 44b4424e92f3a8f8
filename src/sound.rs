use std::path::{Path, PathBuf};

use teloxide::prelude::*;
use teloxide::types::InputFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Success,
    Wrong,
}

impl Cue {
    fn file_name(self) -> &'static str {
        match self {
            Cue::Success => "success.mp3",
            Cue::Wrong => "wrong.mp3",
        }
    }
}

/// Optional sound effects, sent as audio files from a directory.
pub struct Sounds {
    dir: Option<PathBuf>,
}

impl Sounds {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    /// The file for `cue`, if a sound directory is configured and has it.
    pub fn path_for(&self, cue: Cue) -> Option<PathBuf> {
        let path = self.dir.as_deref().map(|d: &Path| d.join(cue.file_name()))?;
        path.is_file().then_some(path)
    }

    /// Fire and forget. Nothing is reported if the sound cannot be played.
    pub fn play(&self, bot: &Bot, chat: ChatId, cue: Cue) {
        let Some(path) = self.path_for(cue) else {
            return;
        };
        let bot = bot.clone();
        tokio::spawn(async move {
            if let Err(e) = bot
                .send_audio(chat, InputFile::file(path))
                .disable_notification(true)
                .await
            {
                log::debug!("sound {cue:?} not played in {chat}: {e}");
            }
        });
    }
}
