// SPDX-FileCopyrightText: 2026 Smartline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits for speech-to-text and text-to-speech services.
//!
//! The dialog engine itself never touches audio; adapters that front a
//! telephony or microphone channel implement these and hand the engine
//! plain text.

use async_trait::async_trait;

use crate::error::SmartlineError;

/// Turns raw caller audio into text.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Recognizes one utterance.
    ///
    /// Fails with [`SmartlineError::Recognition`] when no text could be
    /// produced; adapters should re-prompt rather than advance the dialog.
    async fn recognize(&self, audio: &[u8]) -> Result<String, SmartlineError>;
}

/// Renders reply text as audio. Fire-and-forget from the engine's view.
#[async_trait]
pub trait SpeechRenderer: Send + Sync {
    async fn render(&self, text: &str) -> Result<Vec<u8>, SmartlineError>;
}
