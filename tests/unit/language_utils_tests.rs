/*!
 * Tests for language utilities
 */

use docuflow::language_utils::{get_language_name, TargetLanguage};

#[test]
fn test_code_shouldMatchWireValues() {
    assert_eq!(TargetLanguage::Hindi.code(), "hi");
    assert_eq!(TargetLanguage::Marathi.code(), "mr");
    assert_eq!(TargetLanguage::Marathi.to_string(), "mr");
    assert_eq!(TargetLanguage::ALL, [TargetLanguage::Hindi, TargetLanguage::Marathi]);
}

#[test]
fn test_fromCode_withVariousForms_shouldResolve() {
    for code in ["hi", "HI", "hin", "Hindi", " hindi "] {
        assert_eq!(TargetLanguage::from_code(code).unwrap(), TargetLanguage::Hindi, "{}", code);
    }
    for code in ["mr", "mar", "Marathi"] {
        assert_eq!(TargetLanguage::from_code(code).unwrap(), TargetLanguage::Marathi, "{}", code);
    }
}

#[test]
fn test_fromCode_withUnsupportedLanguage_shouldFail() {
    assert!(TargetLanguage::from_code("fr").is_err());
    assert!(TargetLanguage::from_code("").is_err());
    assert!("klingon".parse::<TargetLanguage>().is_err());
}

#[test]
fn test_name_shouldBeEnglishName() {
    assert_eq!(TargetLanguage::Hindi.name(), "Hindi");
    assert_eq!(TargetLanguage::Marathi.name(), "Marathi");
    assert_eq!(get_language_name("hin").unwrap(), "Hindi");
    assert!(get_language_name("zz").is_err());
}

#[test]
fn test_serde_shouldUseLowercaseNames() {
    assert_eq!(serde_json::to_string(&TargetLanguage::Hindi).unwrap(), "\"hindi\"");
    let parsed: TargetLanguage = serde_json::from_str("\"marathi\"").unwrap();
    assert_eq!(parsed, TargetLanguage::Marathi);
}
