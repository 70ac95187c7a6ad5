//! Word pronunciation using the Web Speech API
//!
//! Words are spoken with the browser's speech synthesizer in Russian. Voices
//! load asynchronously, so the voice is looked up again until one is found.

use wasm_bindgen::JsCast;
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice};

use crate::platform::Speech;

const LANG: &str = "ru-RU";

/// Speech synthesizer for the target words
pub struct WebSpeech {
    synth: Option<SpeechSynthesis>,
    voice: Option<SpeechSynthesisVoice>,
}

impl Default for WebSpeech {
    fn default() -> Self {
        Self::new()
    }
}

impl WebSpeech {
    pub fn new() -> Self {
        // Not every browser ships speech synthesis
        let synth = web_sys::window().and_then(|w| w.speech_synthesis().ok());
        if synth.is_none() {
            log::warn!("Speech synthesis not supported - words will not be spoken");
        }
        Self {
            synth,
            voice: None,
        }
    }

    /// Prefer a Russian voice, else whatever comes first
    fn pick_voice(synth: &SpeechSynthesis) -> Option<SpeechSynthesisVoice> {
        let voices: Vec<SpeechSynthesisVoice> = synth
            .get_voices()
            .iter()
            .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
            .collect();
        voices
            .iter()
            .find(|v| v.lang().starts_with("ru"))
            .or_else(|| voices.first())
            .cloned()
    }
}

impl Speech for WebSpeech {
    fn speak(&mut self, text: &str, rate: f32) {
        let Some(synth) = &self.synth else { return };

        // Never queue behind an older word
        synth.cancel();

        if self.voice.is_none() {
            self.voice = Self::pick_voice(synth);
        }

        let Ok(utterance) = SpeechSynthesisUtterance::new_with_text(text) else {
            log::warn!("Failed to create utterance for {:?}", text);
            return;
        };
        utterance.set_lang(LANG);
        utterance.set_rate(rate);
        utterance.set_pitch(1.0);
        utterance.set_volume(1.0);
        utterance.set_voice(self.voice.as_ref());
        synth.speak(&utterance);
    }

    fn cancel(&mut self) {
        if let Some(synth) = &self.synth {
            synth.cancel();
        }
    }
}
