/*!
 * Tests for language determination and validation
 */

use std::path::Path;
use anyhow::Result;
use subscrub::{
    IsoLanguageRegistry, LanguageDetector, LanguageResolver, LoadOptions, Subtitle, WhatlangDetector,
};
use subscrub::app_config::LanguageDetectionConfig;
use crate::common::{self, StubDetector};

/// An explicit override wins even when the content is clearly another language
#[test]
fn test_determine_withOverride_shouldUseItVerbatim() -> Result<()> {
    let detector = StubDetector::new("en", 0.99);
    let resolver = LanguageResolver::new(&IsoLanguageRegistry, &detector);

    let language = resolver.determine(
        Some("fr"),
        Some("de"),
        Path::new("movie.es.srt"),
        &common::long_english_text(),
    )?;

    assert_eq!(language, "fr");
    Ok(())
}

/// The configured default language comes before file name and detection
#[test]
fn test_determine_withDefaultLanguage_shouldUseDefault() -> Result<()> {
    let detector = StubDetector::new("en", 0.99);
    let resolver = LanguageResolver::new(&IsoLanguageRegistry, &detector);

    let language = resolver.determine(None, Some("nl"), Path::new("movie.es.srt"), &common::long_english_text())?;

    assert_eq!(language, "nl");
    assert_eq!(detector.calls(), 0);
    Ok(())
}

/// A language suffix in the file name is used without running the detector
#[test]
fn test_determine_withLanguageSuffix_shouldSkipDetector() -> Result<()> {
    let detector = StubDetector::new("de", 0.99);
    let resolver = LanguageResolver::new(&IsoLanguageRegistry, &detector);

    let language = resolver.determine(None, None, Path::new("movie.en.srt"), &common::long_english_text())?;

    assert_eq!(language, "en");
    assert_eq!(detector.calls(), 0);
    Ok(())
}

/// Suffix tokens are normalized before the registry lookup
#[test]
fn test_language_from_filename_withVariants_shouldExtractTag() {
    let detector = StubDetector::silent();
    let resolver = LanguageResolver::new(&IsoLanguageRegistry, &detector);

    assert_eq!(resolver.language_from_filename(Path::new("movie.pt_BR.srt")).as_deref(), Some("pt"));
    assert_eq!(resolver.language_from_filename(Path::new("movie.en-US.srt")).as_deref(), Some("en"));
    assert_eq!(resolver.language_from_filename(Path::new("movie.ger.srt")).as_deref(), Some("ger"));
    assert_eq!(resolver.language_from_filename(Path::new("movie.forced.fr.srt")).as_deref(), Some("fr"));
    assert_eq!(resolver.language_from_filename(Path::new("movie.srt")), None);
    assert_eq!(resolver.language_from_filename(Path::new("movie.xx.srt")), None);
    // Only the two suffixes before the extension are considered
    assert_eq!(resolver.language_from_filename(Path::new("a.en.x1.x2.srt")), None);
}

/// A separator at the start of a suffix leaves an empty token, and a trailing dot hides all suffixes
#[test]
fn test_language_from_filename_withLeadingSeparatorOrTrailingDot_shouldFindNothing() {
    let detector = StubDetector::silent();
    let resolver = LanguageResolver::new(&IsoLanguageRegistry, &detector);

    for name in ["movie._en.srt", "movie.-en.srt", "movie.:fr.srt", "movie.en.", "movie.en.srt."] {
        assert_eq!(resolver.language_from_filename(Path::new(name)), None, "{}", name);
    }
}

/// Short content is never sent to the detector
#[test]
fn test_determine_withShortContent_shouldBeUndetermined() -> Result<()> {
    let detector = StubDetector::new("en", 0.99);
    let resolver = LanguageResolver::new(&IsoLanguageRegistry, &detector);

    let language = resolver.determine(None, None, Path::new("movie.srt"), "Hello there")?;

    assert_eq!(language, "und");
    assert_eq!(detector.calls(), 0);
    Ok(())
}

/// Detection is adopted only above the confidence threshold
#[test]
fn test_determine_withDetection_shouldRespectThreshold() -> Result<()> {
    let text = common::long_english_text();

    let confident = StubDetector::new("en", 0.95);
    let resolver = LanguageResolver::new(&IsoLanguageRegistry, &confident);
    assert_eq!(resolver.determine(None, None, Path::new("movie.srt"), &text)?, "en");
    assert_eq!(confident.calls(), 1);

    let unsure = StubDetector::new("en", 0.9);
    let resolver = LanguageResolver::new(&IsoLanguageRegistry, &unsure);
    assert_eq!(resolver.determine(None, None, Path::new("movie.srt"), &text)?, "und");

    let silent = StubDetector::silent();
    let resolver = LanguageResolver::new(&IsoLanguageRegistry, &silent);
    assert_eq!(resolver.determine(None, None, Path::new("movie.srt"), &text)?, "und");
    Ok(())
}

/// Validation passes when there is nothing to check
#[test]
fn test_is_correct_withNothingToCheck_shouldPass() -> Result<()> {
    let detector = StubDetector::new("de", 0.99);
    let resolver = LanguageResolver::new(&IsoLanguageRegistry, &detector);
    let text = common::long_english_text();

    assert!(resolver.is_correct("und", &text)?);
    assert!(resolver.is_correct("not-a-language", &text)?);
    assert!(resolver.is_correct("en", "too short")?);
    assert_eq!(detector.calls(), 0);
    Ok(())
}

/// Validation compares 2-letter codes and requires enough confidence
#[test]
fn test_is_correct_withDetection_shouldCompareCodes() -> Result<()> {
    let text = common::long_english_text();

    let english = StubDetector::new("en", 0.85);
    let resolver = LanguageResolver::new(&IsoLanguageRegistry, &english);
    assert!(resolver.is_correct("en", &text)?);
    assert!(resolver.is_correct("eng", &text)?);
    assert!(!resolver.is_correct("de", &text)?);

    let weak = StubDetector::new("en", 0.8);
    let resolver = LanguageResolver::new(&IsoLanguageRegistry, &weak);
    assert!(!resolver.is_correct("en", &text)?);
    Ok(())
}

/// Thresholds come from the detection settings
#[test]
fn test_with_settings_withLowerMinimum_shouldDetectShortText() -> Result<()> {
    let detector = StubDetector::new("en", 0.95);
    let settings = LanguageDetectionConfig { min_content_chars: 5, ..Default::default() };
    let resolver = LanguageResolver::with_settings(&IsoLanguageRegistry, &detector, settings);

    assert_eq!(resolver.determine(None, None, Path::new("movie.srt"), "Hello there")?, "en");
    Ok(())
}

/// A mismatch is recorded on the document without changing its language
#[test]
fn test_from_content_withMislabeledFile_shouldFlagMismatch() -> Result<()> {
    let detector = StubDetector::new("en", 0.99);
    let resolver = LanguageResolver::new(&IsoLanguageRegistry, &detector);
    let long = common::long_english_text();
    let content = common::srt_with_cues(&[long.as_str(), "end"]);

    let subtitle = Subtitle::from_content(&content, "movie.de.srt", &LoadOptions::default(), &resolver)?;

    assert_eq!(subtitle.language(), "de");
    assert!(subtitle.language_mismatch());
    assert!(!subtitle.language_is_correct(&resolver)?);
    Ok(())
}

/// The whatlang detector reports ISO 639-1 codes
#[test]
fn test_whatlang_detector_withEnglishText_shouldReportEn() -> Result<()> {
    let guesses = WhatlangDetector.detect_langs(
        "This is a rather long English sentence, written so that the detector has plenty of \
         ordinary words to look at before it decides which language it is reading.",
    )?;

    assert_eq!(guesses[0].lang, "en");
    assert!(guesses[0].prob > 0.0 && guesses[0].prob <= 1.0);
    Ok(())
}

/// The whatlang detector fails on text without any words
#[test]
fn test_whatlang_detector_withEmptyText_shouldFail() {
    assert!(WhatlangDetector.detect_langs("").is_err());
}
