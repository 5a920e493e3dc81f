//! Locale-dependent labels.

use super::title::DocumentStyle;

/// Language used for generated labels (captions, placeholders, defaults).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    /// Parse a locale tag such as `ru`, `ru-RU` or `en_US`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lang = tag.split(['-', '_']).next()?.to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Locale::En),
            "ru" => Some(Locale::Ru),
            _ => None,
        }
    }

    pub fn table_label(self) -> &'static str {
        match self {
            Locale::En => "Table",
            Locale::Ru => "Таблица",
        }
    }

    pub fn figure_label(self) -> &'static str {
        match self {
            Locale::En => "Figure",
            Locale::Ru => "Рисунок",
        }
    }

    /// Caption title used when a table has none.
    pub fn table_fallback_title(self) -> &'static str {
        match self {
            Locale::En => "Table description",
            Locale::Ru => "Описание таблицы",
        }
    }

    /// Placeholder for a bibliography ordinal that was cited but never listed.
    pub fn missing_source(self, ordinal: u32) -> String {
        match self {
            Locale::En => format!("Source {ordinal}. Missing"),
            Locale::Ru => format!("Источник {ordinal}. Отсутствует"),
        }
    }

    /// Line emitted in place of a chart that could not be rasterized.
    pub fn chart_unavailable(self, title: &str) -> String {
        match self {
            Locale::En => format!("[Chart \"{title}\" could not be rendered]"),
            Locale::Ru => format!("[Диаграмма «{title}» не может быть отображена]"),
        }
    }

    pub fn toc_heading(self) -> &'static str {
        match self {
            Locale::En => "Contents",
            Locale::Ru => "Содержание",
        }
    }

    pub fn bibliography_heading(self) -> &'static str {
        match self {
            Locale::En => "References",
            Locale::Ru => "Список литературы",
        }
    }

    /// Document-type label printed on the default title page.
    pub fn document_type(self, style: DocumentStyle) -> &'static str {
        match (self, style) {
            (Locale::En, DocumentStyle::Essay) => "ESSAY",
            (Locale::En, DocumentStyle::Report) => "REPORT",
            (Locale::En, DocumentStyle::Coursework) => "TERM PAPER",
            (Locale::En, DocumentStyle::Research) => "RESEARCH PAPER",
            (Locale::Ru, DocumentStyle::Essay) => "РЕФЕРАТ",
            (Locale::Ru, DocumentStyle::Report) => "ДОКЛАД",
            (Locale::Ru, DocumentStyle::Coursework) => "КУРСОВАЯ РАБОТА",
            (Locale::Ru, DocumentStyle::Research) => "НАУЧНО-ИССЛЕДОВАТЕЛЬСКАЯ РАБОТА",
        }
    }

    pub(crate) fn discipline_line(self, discipline: &str) -> String {
        match self {
            Locale::En => format!("in {discipline}"),
            Locale::Ru => format!("по дисциплине «{discipline}»"),
        }
    }

    pub(crate) fn quoted(self, title: &str) -> String {
        match self {
            Locale::En => format!("\u{201C}{title}\u{201D}"),
            Locale::Ru => format!("«{title}»"),
        }
    }

    pub(crate) fn author_line(self, author: &str) -> String {
        match self {
            Locale::En => format!("Author: {author}"),
            Locale::Ru => format!("Выполнил(а): {author}"),
        }
    }

    pub(crate) fn group_line(self, group: &str) -> String {
        match self {
            Locale::En => format!("Group: {group}"),
            Locale::Ru => format!("Группа: {group}"),
        }
    }

    pub(crate) fn supervisor_line(self, supervisor: &str) -> String {
        match self {
            Locale::En => format!("Supervisor: {supervisor}"),
            Locale::Ru => format!("Проверил(а): {supervisor}"),
        }
    }

    pub(crate) fn default_organization(self) -> &'static str {
        match self {
            Locale::En => "Educational Institution",
            Locale::Ru => "Образовательное учреждение",
        }
    }

    pub(crate) fn default_author(self) -> &'static str {
        match self {
            Locale::En => "Student",
            Locale::Ru => "Студент",
        }
    }

    pub(crate) fn default_supervisor(self) -> &'static str {
        match self {
            Locale::En => "Instructor",
            Locale::Ru => "Преподаватель",
        }
    }

    pub(crate) fn default_city(self) -> &'static str {
        match self {
            Locale::En => "London",
            Locale::Ru => "Москва",
        }
    }

    /// BCP 47 tag written into the package properties.
    pub fn language_tag(self) -> &'static str {
        match self {
            Locale::En => "en-US",
            Locale::Ru => "ru-RU",
        }
    }
}
