//! Language display names.
//!
//! Static registry mapping provider language codes to English and native
//! display names. Native names are used for provisioned category names and
//! onboarding notices; unknown codes fall back to the raw code.

/// (code, English name, native name)
const LANGUAGES: &[(&str, &str, &str)] = &[
    ("ar", "Arabic", "العربية"),
    ("bg", "Bulgarian", "Български"),
    ("cs", "Czech", "Čeština"),
    ("da", "Danish", "Dansk"),
    ("de", "German", "Deutsch"),
    ("el", "Greek", "Ελληνικά"),
    ("en", "English", "English"),
    ("es", "Spanish", "Español"),
    ("fi", "Finnish", "Suomi"),
    ("fr", "French", "Français"),
    ("he", "Hebrew", "עברית"),
    ("hi", "Hindi", "हिन्दी"),
    ("hu", "Hungarian", "Magyar"),
    ("id", "Indonesian", "Bahasa Indonesia"),
    ("it", "Italian", "Italiano"),
    ("ja", "Japanese", "日本語"),
    ("ko", "Korean", "한국어"),
    ("nl", "Dutch", "Nederlands"),
    ("no", "Norwegian", "Norsk"),
    ("pl", "Polish", "Polski"),
    ("pt", "Portuguese", "Português"),
    ("ro", "Romanian", "Română"),
    ("ru", "Russian", "Русский"),
    ("sv", "Swedish", "Svenska"),
    ("th", "Thai", "ไทย"),
    ("tr", "Turkish", "Türkçe"),
    ("uk", "Ukrainian", "Українська"),
    ("vi", "Vietnamese", "Tiếng Việt"),
    ("zh", "Chinese", "中文"),
    ("zh-TW", "Chinese (Traditional)", "繁體中文"),
];

fn lookup(code: &str) -> Option<&'static (&'static str, &'static str, &'static str)> {
    LANGUAGES.iter().find(|(c, _, _)| *c == code)
}

/// The language's name in English, or the code itself when unknown.
pub fn english_name(code: &str) -> &str {
    lookup(code).map(|(_, name, _)| *name).unwrap_or(code)
}

/// The language's name in that language, or the code itself when unknown.
pub fn native_name(code: &str) -> &str {
    lookup(code).map(|(_, _, native)| *native).unwrap_or(code)
}
