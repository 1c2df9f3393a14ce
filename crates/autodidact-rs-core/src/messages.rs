//! User-facing Russian strings produced by the pipeline.

use autodidact_rs_protocol::ImprovementKind;

/// Opening line of every chat reply, quoting the user message.
pub fn greeting(message: &str) -> String {
    format!("Привет! Я обработал ваш запрос: '{message}'")
}

/// Heading above the search preview.
pub fn search_header(count: usize) -> String {
    format!("Нашел {count} релевантных результатов в интернете:")
}

/// One numbered search preview line; `snippet_preview` is already truncated.
pub fn search_line(position: usize, title: &str, snippet_preview: &str) -> String {
    format!("{position}. {title}: {snippet_preview}...")
}

/// Heading above the detected improvements.
pub fn improvements_header(count: usize) -> String {
    format!("Обнаружил {count} возможностей для улучшения моего кода:")
}

/// Bullet for one detected improvement.
pub fn improvement_line(kind: ImprovementKind) -> String {
    format!("• {}", kind.label())
}

/// Shown when every attempted improvement applied.
pub const APPLY_SUCCEEDED: &str = "✅ Успешно применил улучшения к своему коду!";
/// Shown when at least one improvement failed.
pub const APPLY_FAILED: &str = "⚠️ Некоторые улучшения не удалось применить.";

/// Summary stored with every improvement run.
pub fn apply_summary(applied: usize, errors: usize) -> String {
    format!("Применено улучшений: {applied}, ошибок: {errors}")
}

/// Error entry for one failed improvement.
pub fn apply_error(kind: ImprovementKind, err: &dyn std::fmt::Display) -> String {
    format!("Ошибка при применении {}: {err}", kind.label())
}

/// Knowledge entry for a Python import.
pub fn python_module(name: &str) -> String {
    format!("Python модуль: {name}")
}

/// Knowledge entry for a Python `def`.
pub fn python_function(name: &str) -> String {
    format!("Python функция: {name}")
}

/// Knowledge entry for a JavaScript `import ... from`.
pub fn javascript_module(name: &str) -> String {
    format!("JavaScript модуль: {name}")
}

/// Knowledge entry for a word from a text or markdown file.
pub fn keyword(word: &str) -> String {
    format!("Ключевое слово: {word}")
}

/// Knowledge entry for a URL found in a text or markdown file.
pub fn url(url: &str) -> String {
    format!("URL: {url}")
}

/// In-band knowledge entry when an upload cannot be read.
pub fn file_error(err: &dyn std::fmt::Display) -> String {
    format!("Ошибка обработки файла: {err}")
}
