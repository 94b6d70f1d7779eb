/*!
 * Determination and validation of the language a subtitle is written in.
 *
 * The language of a document comes from, in order: an explicit override,
 * the configured default, a language tag embedded in the file name
 * (`movie.en.srt`), or statistical detection over the cue text. The same
 * detector is used afterwards to check that a stated tag matches what the
 * cues actually contain.
 */

use std::path::Path;
use log::debug;
use crate::app_config::LanguageDetectionConfig;
use crate::errors::SubtitleError;
use crate::language_utils::{LanguageRegistry, UNDETERMINED};

/// A single detector guess
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageGuess {
    /// ISO 639-1 code where one exists, ISO 639-3 otherwise
    pub lang: String,
    /// Confidence in `[0, 1]`
    pub prob: f64,
}

/// Statistical language detection over free text
pub trait LanguageDetector {
    /// Ranked guesses, most probable first
    fn detect_langs(&self, text: &str) -> Result<Vec<LanguageGuess>, SubtitleError>;
}

/// Detector backed by the whatlang trigram models
#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect_langs(&self, text: &str) -> Result<Vec<LanguageGuess>, SubtitleError> {
        let info = whatlang::detect(text)
            .ok_or_else(|| SubtitleError::Detection("no language features found in text".to_string()))?;

        let code_639_3 = info.lang().code();
        let lang = isolang::Language::from_639_3(code_639_3)
            .and_then(|lang| lang.to_639_1())
            .unwrap_or(code_639_3)
            .to_string();

        Ok(vec![LanguageGuess { lang, prob: info.confidence() }])
    }
}

// @struct: Resolves and validates document languages
pub struct LanguageResolver<'a> {
    registry: &'a dyn LanguageRegistry,
    detector: &'a dyn LanguageDetector,
    settings: LanguageDetectionConfig,
}

impl<'a> LanguageResolver<'a> {
    pub fn new(registry: &'a dyn LanguageRegistry, detector: &'a dyn LanguageDetector) -> Self {
        Self::with_settings(registry, detector, LanguageDetectionConfig::default())
    }

    pub fn with_settings(
        registry: &'a dyn LanguageRegistry,
        detector: &'a dyn LanguageDetector,
        settings: LanguageDetectionConfig,
    ) -> Self {
        Self { registry, detector, settings }
    }

    // @returns: Language tag for a document, `und` when nothing conclusive is found
    pub fn determine(
        &self,
        language_override: Option<&str>,
        default_language: Option<&str>,
        file: &Path,
        content: &str,
    ) -> Result<String, SubtitleError> {
        if let Some(language) = language_override {
            return Ok(language.to_string());
        }
        if let Some(language) = default_language {
            return Ok(language.to_string());
        }
        if let Some(language) = self.language_from_filename(file) {
            debug!("Language '{}' taken from file name {:?}", language, file);
            return Ok(language);
        }

        if !self.has_enough_content(content) {
            return Ok(UNDETERMINED.to_string());
        }

        match self.detector.detect_langs(content)?.into_iter().next() {
            Some(guess) if guess.prob > self.settings.detect_threshold => {
                debug!("Detected language '{}' with probability {:.3}", guess.lang, guess.prob);
                Ok(guess.lang)
            }
            _ => Ok(UNDETERMINED.to_string()),
        }
    }

    /// Look for a language tag in the two suffixes preceding the extension
    pub fn language_from_filename(&self, file: &Path) -> Option<String> {
        let name = file.file_name()?.to_string_lossy();
        if name.ends_with('.') {
            return None;
        }
        let suffixes: Vec<&str> = name.trim_start_matches('.').split('.').skip(1).collect();
        let end = suffixes.len().saturating_sub(1);
        let start = suffixes.len().saturating_sub(3);

        suffixes[start..end]
            .iter()
            .filter_map(|suffix| {
                let normalized = suffix.replace([':', '_'], "-");
                normalized.split('-').next().map(str::to_string)
            })
            .find(|token| !token.is_empty() && self.registry.is_language(token))
    }

    /// Whether `language` agrees with the detected language of `content`.
    /// Undetermined tags and short content always pass.
    pub fn is_correct(&self, language: &str, content: &str) -> Result<bool, SubtitleError> {
        if language == UNDETERMINED {
            return Ok(true);
        }
        let Some(code_2) = self.registry.get_2letter_code(language) else {
            return Ok(true);
        };
        if !self.has_enough_content(content) {
            return Ok(true);
        }

        Ok(self
            .detector
            .detect_langs(content)?
            .first()
            .is_none_or(|guess| guess.lang == code_2 && guess.prob > self.settings.validate_threshold))
    }

    fn has_enough_content(&self, content: &str) -> bool {
        content.chars().count() >= self.settings.min_content_chars
    }
}
