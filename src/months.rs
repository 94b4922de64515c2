/// Fixed table of the twelve localized month names, January first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthTable {
    names: [&'static str; 12],
}

/// Russian nominative month names, as used in the calendar page headings.
pub const RUSSIAN_MONTHS: MonthTable = MonthTable::new([
    "январь",
    "февраль",
    "март",
    "апрель",
    "май",
    "июнь",
    "июль",
    "август",
    "сентябрь",
    "октябрь",
    "ноябрь",
    "декабрь",
]);

impl MonthTable {
    /// Names must be lowercase.
    pub const fn new(names: [&'static str; 12]) -> Self {
        Self { names }
    }

    /// Returns the 1-based ordinal of `name`, ignoring case and surrounding whitespace.
    /// `None` means the text is not a month heading.
    pub fn month_ordinal(&self, name: &str) -> Option<u32> {
        let name = name.trim().to_lowercase();
        self.names
            .iter()
            .position(|&known| known == name)
            .map(|idx| idx as u32 + 1)
    }

    pub fn names(&self) -> &[&'static str; 12] {
        &self.names
    }
}

impl Default for MonthTable {
    fn default() -> Self {
        RUSSIAN_MONTHS
    }
}

/// `DD-MM`, both parts zero-padded.
pub fn format_date_key(day: u32, month_number: u32) -> String {
    format!("{:02}-{:02}", day, month_number)
}

/// `"<day> <month name>"`, day unpadded.
pub fn format_date_text(day: u32, month_name: &str) -> String {
    format!("{} {}", day, month_name)
}
