use crate::document::{self, DocumentNode};
use crate::errors::ScraperError;
use crate::months::{format_date_key, format_date_text, MonthTable};
use log::{debug, info, warn};
use regex::Regex;
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One calendar day with at least one holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayDay {
    pub day: u32,
    pub month: String,
    pub month_number: u32,
    pub holidays: Vec<String>,
    pub full_date_formatted: String,
    pub full_date_text: String,
    pub year: i32,
}

/// CSS selectors describing where things live on the calendar page.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub section: String,
    pub heading: String,
    pub table: String,
    pub row: String,
    pub cell: String,
    pub entry_block: String,
    pub link: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            section: "section".to_string(),
            heading: ".h2".to_string(),
            table: ".holidays-month-items".to_string(),
            row: "tr".to_string(),
            cell: "td".to_string(),
            entry_block: "div".to_string(),
            link: "a".to_string(),
        }
    }
}

struct Patterns {
    day_prefix: Regex,
    whitespace: Regex,
    day_counter: Regex,
    only_digits: Regex,
}

impl Patterns {
    fn new() -> Result<Self, ScraperError> {
        Ok(Self {
            day_prefix: Regex::new(r"^(\d{1,2})\s+")?,
            whitespace: Regex::new(r"\s+")?,
            day_counter: Regex::new(r"\d+\s+день")?,
            only_digits: Regex::new(r"^\d+\s*$")?,
        })
    }

    /// Counters like "3 день", bare numbers and very short strings are page noise.
    fn is_holiday_name(&self, candidate: &str) -> bool {
        candidate.chars().count() > 2
            && !self.day_counter.is_match(candidate)
            && !self.only_digits.is_match(candidate)
    }
}

pub struct HolidayProcessor {
    raw_html: String,
    year: i32,
    months: MonthTable,
    layout: PageLayout,
    holidays: Vec<HolidayDay>,
}

impl HolidayProcessor {
    pub fn new(html: String, year: i32, months: MonthTable) -> Self {
        Self {
            raw_html: html,
            year,
            months,
            layout: PageLayout::default(),
            holidays: vec![],
        }
    }

    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn holidays(&self) -> &[HolidayDay] {
        &self.holidays
    }

    pub fn into_holidays(self) -> Vec<HolidayDay> {
        self.holidays
    }

    pub fn run(&mut self) -> Result<(), ScraperError> {
        let document = Html::parse_document(&self.raw_html);
        self.holidays = extract_holidays(
            &document::root(&document),
            &self.layout,
            &self.months,
            self.year,
        )?;
        Ok(())
    }

    /// Days with holidays per month, in the order months were first seen.
    pub fn month_stats(&self) -> Vec<(String, usize)> {
        let mut stats: Vec<(String, usize)> = Vec::new();
        for holiday in &self.holidays {
            match stats.iter_mut().find(|(month, _)| *month == holiday.month) {
                Some((_, count)) => *count += 1,
                None => stats.push((holiday.month.clone(), 1)),
            }
        }
        stats
    }

    pub fn pretty_print(&self) {
        info!("Found {} dates with holidays", self.holidays.len());
        if self.holidays.is_empty() {
            warn!("No holidays extracted. The page layout may have changed.");
            return;
        }
        info!("--- Days with holidays per month ---");
        for (month, count) in self.month_stats() {
            info!("{}: {}", month, count);
        }
        info!("--- End of statistics ---");
    }
}

/// Walks every month section of the page and collects day records in
/// section-then-row order. A day listed twice keeps its first position and
/// gains the names of the later row.
pub fn extract_holidays<N: DocumentNode>(
    root: &N,
    layout: &PageLayout,
    months: &MonthTable,
    year: i32,
) -> Result<Vec<HolidayDay>, ScraperError> {
    let patterns = Patterns::new()?;
    let mut holidays: Vec<HolidayDay> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for section in root.select_all(&layout.section)? {
        let month_name = match section.select_first(&layout.heading)? {
            Some(heading) => heading.text().trim().to_string(),
            None => continue,
        };
        let Some(month_number) = months.month_ordinal(&month_name) else {
            debug!("Skipping section {:?}", month_name);
            continue;
        };
        let Some(table) = section.select_first(&layout.table)? else {
            debug!("No holiday table in {}", month_name);
            continue;
        };

        for row in table.select_all(&layout.row)? {
            if let Some(day) =
                parse_row(&row, layout, &patterns, &month_name, month_number, year)?
            {
                match seen.get(&day.full_date_formatted) {
                    Some(&idx) => {
                        warn!("Date {} listed more than once", day.full_date_formatted);
                        merge_names(&mut holidays[idx].holidays, day.holidays);
                    }
                    None => {
                        seen.insert(day.full_date_formatted.clone(), holidays.len());
                        holidays.push(day);
                    }
                }
            }
        }
    }

    Ok(holidays)
}

fn merge_names(names: &mut Vec<String>, more: Vec<String>) {
    for name in more {
        if !names.contains(&name) {
            names.push(name);
        }
    }
}

fn parse_row<N: DocumentNode>(
    row: &N,
    layout: &PageLayout,
    patterns: &Patterns,
    month_name: &str,
    month_number: u32,
    year: i32,
) -> Result<Option<HolidayDay>, ScraperError> {
    let cells = row.select_all(&layout.cell)?;
    if cells.len() < 2 {
        return Ok(None);
    }

    let date_text = cells[0].text();
    let Some(day) = patterns
        .day_prefix
        .captures(date_text.trim())
        .and_then(|caps| caps[1].parse::<u32>().ok())
    else {
        return Ok(None);
    };

    let mut names = Vec::new();
    for block in cells[1].children_named(&layout.entry_block) {
        let links = block.select_all(&layout.link)?;
        let name = if links.is_empty() {
            patterns
                .whitespace
                .replace_all(block.text().trim(), " ")
                .into_owned()
        } else {
            for link in &links {
                debug!("Holiday link {:?}", link.attr("href"));
            }
            links.iter().map(|link| link.text()).collect::<String>().trim().to_string()
        };
        if patterns.is_holiday_name(&name) && !names.contains(&name) {
            names.push(name);
        }
    }

    if names.is_empty() {
        return Ok(None);
    }

    Ok(Some(HolidayDay {
        day,
        month: month_name.to_string(),
        month_number,
        holidays: names,
        full_date_formatted: format_date_key(day, month_number),
        full_date_text: format_date_text(day, month_name),
        year,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::months::RUSSIAN_MONTHS;

    fn section(month: &str, rows: &str) -> String {
        format!(
            r#"<section><div class="h2">{}</div>
                <table class="holidays-month-items"><tbody>{}</tbody></table>
            </section>"#,
            month, rows
        )
    }

    fn process(html: String) -> HolidayProcessor {
        let mut processor = HolidayProcessor::new(html, 2026, RUSSIAN_MONTHS);
        processor.run().expect("Processor failed");
        processor
    }

    #[test]
    fn test_single_linked_holiday() {
        let html = section(
            "Декабрь",
            r#"<tr><td>15 декабря</td><td><div><a href="/h/1">Новый год</a></div></td></tr>"#,
        );
        let processor = process(html);

        assert_eq!(
            processor.holidays(),
            &[HolidayDay {
                day: 15,
                month: "Декабрь".to_string(),
                month_number: 12,
                holidays: vec!["Новый год".to_string()],
                full_date_formatted: "15-12".to_string(),
                full_date_text: "15 Декабрь".to_string(),
                year: 2026,
            }]
        );
    }

    #[test]
    fn test_text_blocks_and_noise_filter() {
        let html = section(
            "Январь",
            r#"<tr><td>1 января</td><td>
                <div><a href="/a">  Новый год  </a></div>
                <div>Праздник
                     народный</div>
                <div>3 день</div>
                <div>Ёж</div>
                <div>2026</div>
                <div>День <a href="/b">Святок</a></div>
            </td></tr>"#,
        );
        let processor = process(html);

        assert_eq!(processor.holidays().len(), 1);
        assert_eq!(
            processor.holidays()[0].holidays,
            vec!["Новый год", "Праздник народный", "Святок"]
        );
        assert_eq!(processor.holidays()[0].full_date_formatted, "01-01");
    }

    #[test]
    fn test_rows_without_valid_names_are_dropped() {
        let html = section(
            "Март",
            r#"<tr><th>Дата</th><th>Праздники</th></tr>
               <tr><td>only one cell</td></tr>
               <tr><td>Неделя</td><td><div>Масленица</div></td></tr>
               <tr><td>5 марта</td><td><div>12</div><div>ab</div></td></tr>
               <tr><td>8 марта</td><td><div>Международный женский день</div></td></tr>"#,
        );
        let processor = process(html);

        assert_eq!(processor.holidays().len(), 1);
        assert_eq!(processor.holidays()[0].day, 8);
        assert_eq!(processor.holidays()[0].month_number, 3);
        assert_eq!(processor.holidays()[0].full_date_text, "8 Март");
    }

    #[test]
    fn test_unknown_sections_and_missing_tables() {
        let html = format!(
            "{}{}{}",
            section(
                "Праздники года",
                r#"<tr><td>1 января</td><td><div>Лишнее</div></td></tr>"#
            ),
            r#"<section><div class="h2">Февраль</div><p>Нет праздников</p></section>"#,
            section(
                "Май",
                r#"<tr><td>9 мая</td><td><div>День Победы</div></td></tr>"#
            ),
        );
        let processor = process(html);

        assert_eq!(processor.holidays().len(), 1);
        assert_eq!(processor.holidays()[0].full_date_formatted, "09-05");
    }

    #[test]
    fn test_document_order_is_kept() {
        let html = format!(
            "{}{}",
            section(
                "Ноябрь",
                r#"<tr><td>4 ноября</td><td><div>День народного единства</div></td></tr>"#
            ),
            section(
                "Февраль",
                r#"<tr><td>23 февраля</td><td><div>День защитника Отечества</div></td></tr>
                   <tr><td>14 февраля</td><td><div>День святого Валентина</div></td></tr>"#
            ),
        );
        let processor = process(html);

        let keys: Vec<_> = processor
            .holidays()
            .iter()
            .map(|h| h.full_date_formatted.as_str())
            .collect();
        assert_eq!(keys, vec!["04-11", "23-02", "14-02"]);
        assert_eq!(
            processor.month_stats(),
            vec![("Ноябрь".to_string(), 1), ("Февраль".to_string(), 2)]
        );
    }

    #[test]
    fn test_custom_layout_and_months() {
        let english = MonthTable::new([
            "january", "february", "march", "april", "may", "june", "july", "august",
            "september", "october", "november", "december",
        ]);
        let html = r#"
            <article><h2>July</h2>
                <table class="days"><tr><td>4 July</td><td><p>Independence Day</p></td></tr></table>
            </article>"#
            .to_string();
        let layout = PageLayout {
            section: "article".to_string(),
            heading: "h2".to_string(),
            table: "table.days".to_string(),
            entry_block: "p".to_string(),
            ..PageLayout::default()
        };
        let mut processor = HolidayProcessor::new(html, 2026, english).with_layout(layout);
        processor.run().expect("Processor failed");

        assert_eq!(processor.holidays().len(), 1);
        assert_eq!(processor.holidays()[0].full_date_formatted, "04-07");
        assert_eq!(processor.holidays()[0].holidays, vec!["Independence Day"]);
    }

    #[test]
    fn test_repeated_day_is_merged() {
        let html = section(
            "Май",
            r#"<tr><td>9 мая</td><td><div>День Победы</div><div><a href="/p">День Победы</a></div></td></tr>
               <tr><td>9 мая</td><td><div>Другой праздник</div><div>День Победы</div></td></tr>
               <tr><td>10 мая</td><td><div>День матери</div></td></tr>"#,
        );
        let processor = process(html);

        let keys: Vec<_> = processor
            .holidays()
            .iter()
            .map(|h| h.full_date_formatted.as_str())
            .collect();
        assert_eq!(keys, vec!["09-05", "10-05"]);
        assert_eq!(
            processor.holidays()[0].holidays,
            vec!["День Победы", "Другой праздник"]
        );
    }

    #[test]
    fn test_all_links_of_a_block_are_joined() {
        let html = section(
            "Апрель",
            r#"<tr><td>12 апреля</td><td><div><a href="/a">День </a><a href="/b">космонавтики</a></div></td></tr>"#,
        );
        let processor = process(html);

        assert_eq!(processor.holidays()[0].holidays, vec!["День космонавтики"]);
    }

    #[test]
    fn test_empty_html() {
        let processor = process(String::new());
        assert!(processor.holidays().is_empty());
        assert!(processor.month_stats().is_empty());
    }

    #[test]
    fn test_noise_filter() {
        let patterns = Patterns::new().unwrap();
        assert!(!patterns.is_holiday_name("3 день"));
        assert!(!patterns.is_holiday_name("256 день"));
        assert!(!patterns.is_holiday_name("Ёж"));
        assert!(!patterns.is_holiday_name("42"));
        assert!(!patterns.is_holiday_name(""));
        assert!(patterns.is_holiday_name("Пир"));
        assert!(patterns.is_holiday_name("День знаний"));
    }
}
