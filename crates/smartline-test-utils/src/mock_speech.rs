// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock speech collaborators.
//!
//! `ScriptedRecognizer` returns pre-loaded transcripts in order, letting a
//! test drive the audio path without a real STT backend. `TextRenderer`
//! "speaks" by returning the prompt bytes unchanged.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use smartline_core::{SmartlineError, SpeechRecognizer, SpeechRenderer};

/// Queue-backed [`SpeechRecognizer`].
#[derive(Default)]
pub struct ScriptedRecognizer {
    transcripts: Mutex<VecDeque<String>>,
}

impl ScriptedRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transcripts(transcripts: Vec<String>) -> Self {
        Self {
            transcripts: Mutex::new(transcripts.into()),
        }
    }

    /// Append a transcript to the queue.
    pub async fn push(&self, transcript: &str) {
        self.transcripts.lock().await.push_back(transcript.to_string());
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn recognize(&self, _audio: &[u8]) -> Result<String, SmartlineError> {
        self.transcripts
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| SmartlineError::Recognition {
                message: "scripted recognizer exhausted".to_string(),
            })
    }
}

/// Identity [`SpeechRenderer`]: the "audio" is the UTF-8 prompt itself.
#[derive(Default)]
pub struct TextRenderer;

#[async_trait]
impl SpeechRenderer for TextRenderer {
    async fn render(&self, text: &str) -> Result<Vec<u8>, SmartlineError> {
        Ok(text.as_bytes().to_vec())
    }
}
