//! Locale-aware number, currency, date and relative-time formatting.
//!
//! The tables here cover the three supported languages only. Every method
//! returns a string; inputs that cannot be formatted fall back to a plain
//! rendering instead of failing.

use crate::interpolate::format_plain_number;
use crate::language::Language;
use crate::plural::PluralCategory;
use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;

const NBSP: char = '\u{a0}';

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NumberOptions {
    pub min_fraction_digits: usize,
    pub max_fraction_digits: usize,
    pub grouping: bool,
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self {
            min_fraction_digits: 0,
            max_fraction_digits: 3,
            grouping: true,
        }
    }
}

impl NumberOptions {
    /// Exactly `digits` fraction digits.
    pub fn fixed(digits: usize) -> Self {
        Self {
            min_fraction_digits: digits,
            max_fraction_digits: digits,
            grouping: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DateStyle {
    #[default]
    Short,
    Long,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    /// Largest first.
    const DESCENDING: [(TimeUnit, f64); 6] = [
        (TimeUnit::Year, 365.0 * 86_400.0),
        (TimeUnit::Month, 30.0 * 86_400.0),
        (TimeUnit::Day, 86_400.0),
        (TimeUnit::Hour, 3_600.0),
        (TimeUnit::Minute, 60.0),
        (TimeUnit::Second, 1.0),
    ];
}

/// Formats values for one language.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Formatter {
    lang: Language,
}

impl Formatter {
    pub fn new(lang: Language) -> Self {
        Self { lang }
    }

    pub fn lang(&self) -> Language {
        self.lang
    }

    fn separators(&self) -> (char, char) {
        match self.lang {
            Language::En => (',', '.'),
            Language::Az => ('.', ','),
            Language::Ru => (NBSP, ','),
        }
    }

    /// `1234.5` → `1,234.5` (en), `1.234,5` (az), `1 234,5` (ru).
    pub fn number(&self, value: f64, options: &NumberOptions) -> String {
        if !value.is_finite() {
            return format_plain_number(value);
        }

        let max = options.max_fraction_digits.max(options.min_fraction_digits);
        let fixed = format!("{:.*}", max, value.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

        let mut frac = frac_part.trim_end_matches('0');
        if frac.len() < options.min_fraction_digits {
            frac = &frac_part[..options.min_fraction_digits];
        }

        let (group_sep, decimal_sep) = self.separators();
        let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);

        let is_zero = int_part.bytes().all(|b| b == b'0') && frac.bytes().all(|b| b == b'0');
        if value.is_sign_negative() && !is_zero {
            out.push('-');
        }

        if options.grouping {
            push_grouped(&mut out, int_part, group_sep);
        } else {
            out.push_str(int_part);
        }

        if !frac.is_empty() {
            out.push(decimal_sep);
            out.push_str(frac);
        }

        out
    }

    /// Formats `value` with two fraction digits and the currency's symbol.
    ///
    /// `currency` must be a three-letter code; anything else, or a
    /// non-finite value, renders as `"<value> <currency>"`.
    pub fn currency(&self, value: f64, currency: &str) -> String {
        let code = currency.trim();
        if !value.is_finite() || code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            tracing::debug!("Cannot format {} as currency '{}'", value, currency);
            return format!("{} {}", format_plain_number(value), currency);
        }

        let code = code.to_ascii_uppercase();
        let amount = self.number(value.abs(), &NumberOptions::fixed(2));
        let sign = if value < 0.0 && amount.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            "-"
        } else {
            ""
        };

        match self.lang {
            Language::En => match currency_symbol(&code) {
                Some(symbol) if matches!(code.as_str(), "USD" | "EUR" | "GBP") => {
                    format!("{}{}{}", sign, symbol, amount)
                },
                _ => format!("{}{}{}{}", sign, code, NBSP, amount),
            },
            Language::Az | Language::Ru => {
                let symbol = currency_symbol(&code).unwrap_or(code.as_str());
                format!("{}{}{}{}", sign, amount, NBSP, symbol)
            },
        }
    }

    /// `2026-10-19` → `19.10.2026` (az, ru) or `10/19/2026` (en) in the
    /// short style; month names in the long style.
    pub fn date(&self, date: Date, style: DateStyle) -> String {
        let (year, month, day) = (date.year(), date.month(), date.day());
        match (style, self.lang) {
            (DateStyle::Short, Language::En) => format!("{}/{}/{}", month, day, year),
            (DateStyle::Short, Language::Az | Language::Ru) => {
                format!("{:02}.{:02}.{}", day, month, year)
            },
            (DateStyle::Long, Language::En) => {
                format!("{} {}, {}", month_name(self.lang, month), day, year)
            },
            (DateStyle::Long, Language::Az) => {
                format!("{} {} {}", day, month_name(self.lang, month), year)
            },
            (DateStyle::Long, Language::Ru) => {
                format!("{} {} {} г.", day, month_name(self.lang, month), year)
            },
        }
    }

    /// Formats the UTC calendar date of a Unix-millisecond timestamp.
    pub fn timestamp_millis(&self, millis: i64, style: DateStyle) -> String {
        match Timestamp::from_millisecond(millis) {
            Ok(ts) => self.date(ts.to_zoned(TimeZone::UTC).date(), style),
            Err(err) => {
                tracing::debug!("Timestamp {} out of range: {}", millis, err);
                millis.to_string()
            },
        }
    }

    /// Describes a signed offset in seconds: negative is the past.
    pub fn relative_time(&self, diff_seconds: f64) -> String {
        if !diff_seconds.is_finite() {
            return format!("{}s", format_plain_number(diff_seconds));
        }

        let magnitude = diff_seconds.abs();
        let (unit, length) = TimeUnit::DESCENDING
            .iter()
            .copied()
            .find(|(_, length)| *length <= magnitude)
            .unwrap_or((TimeUnit::Second, 1.0));

        let value = round_half_up(diff_seconds / length);
        if let Some(phrase) = self.relative_phrase(unit, value) {
            return phrase.to_string();
        }

        let count = self.number(value.abs(), &NumberOptions::default());
        let category = self.lang.plural_category(value.abs());
        let unit_name = unit_name(self.lang, unit, category);

        match (self.lang, value < 0.0) {
            (Language::En, false) => format!("in {} {}", count, unit_name),
            (Language::En, true) => format!("{} {} ago", count, unit_name),
            (Language::Ru, false) => format!("через {} {}", count, unit_name),
            (Language::Ru, true) => format!("{} {} назад", count, unit_name),
            (Language::Az, false) => format!("{} {} ərzində", count, unit_name),
            (Language::Az, true) => format!("{} {} öncə", count, unit_name),
        }
    }

    /// Words used instead of numbers for nearby offsets.
    fn relative_phrase(&self, unit: TimeUnit, value: f64) -> Option<&'static str> {
        if value.fract() != 0.0 || value.abs() > 2.0 {
            return None;
        }
        let phrase = match (self.lang, unit, value as i64) {
            (Language::En, TimeUnit::Second, 0) => "now",
            (Language::En, TimeUnit::Minute, 0) => "this minute",
            (Language::En, TimeUnit::Hour, 0) => "this hour",
            (Language::En, TimeUnit::Day, -1) => "yesterday",
            (Language::En, TimeUnit::Day, 0) => "today",
            (Language::En, TimeUnit::Day, 1) => "tomorrow",
            (Language::En, TimeUnit::Month, -1) => "last month",
            (Language::En, TimeUnit::Month, 0) => "this month",
            (Language::En, TimeUnit::Month, 1) => "next month",
            (Language::En, TimeUnit::Year, -1) => "last year",
            (Language::En, TimeUnit::Year, 0) => "this year",
            (Language::En, TimeUnit::Year, 1) => "next year",

            (Language::Ru, TimeUnit::Second, 0) => "сейчас",
            (Language::Ru, TimeUnit::Minute, 0) => "в эту минуту",
            (Language::Ru, TimeUnit::Hour, 0) => "в этот час",
            (Language::Ru, TimeUnit::Day, -2) => "позавчера",
            (Language::Ru, TimeUnit::Day, -1) => "вчера",
            (Language::Ru, TimeUnit::Day, 0) => "сегодня",
            (Language::Ru, TimeUnit::Day, 1) => "завтра",
            (Language::Ru, TimeUnit::Day, 2) => "послезавтра",
            (Language::Ru, TimeUnit::Month, -1) => "в прошлом месяце",
            (Language::Ru, TimeUnit::Month, 0) => "в этом месяце",
            (Language::Ru, TimeUnit::Month, 1) => "в следующем месяце",
            (Language::Ru, TimeUnit::Year, -1) => "в прошлом году",
            (Language::Ru, TimeUnit::Year, 0) => "в этом году",
            (Language::Ru, TimeUnit::Year, 1) => "в следующем году",

            (Language::Az, TimeUnit::Second, 0) => "indi",
            (Language::Az, TimeUnit::Minute, 0) => "bu dəqiqə",
            (Language::Az, TimeUnit::Hour, 0) => "bu saat",
            (Language::Az, TimeUnit::Day, -1) => "dünən",
            (Language::Az, TimeUnit::Day, 0) => "bu gün",
            (Language::Az, TimeUnit::Day, 1) => "sabah",
            (Language::Az, TimeUnit::Month, -1) => "keçən ay",
            (Language::Az, TimeUnit::Month, 0) => "bu ay",
            (Language::Az, TimeUnit::Month, 1) => "gələn ay",
            (Language::Az, TimeUnit::Year, -1) => "keçən il",
            (Language::Az, TimeUnit::Year, 0) => "bu il",
            (Language::Az, TimeUnit::Year, 1) => "gələn il",
            _ => return None,
        };
        Some(phrase)
    }
}

fn push_grouped(out: &mut String, digits: &str, separator: char) {
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
}

/// Rounds halves toward positive infinity, so `-1.5` becomes `-1`.
fn round_half_up(value: f64) -> f64 {
    let rounded = (value + 0.5).floor();
    if rounded == 0.0 { 0.0 } else { rounded }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "AZN" => Some("₼"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "RUB" => Some("₽"),
        "GBP" => Some("£"),
        _ => None,
    }
}

fn month_name(lang: Language, month: i8) -> &'static str {
    const EN: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ];
    const AZ: [&str; 12] = [
        "yanvar", "fevral", "mart", "aprel", "may", "iyun", "iyul", "avqust", "sentyabr",
        "oktyabr", "noyabr", "dekabr",
    ];
    // Genitive, as used after a day number.
    const RU: [&str; 12] = [
        "января", "февраля", "марта", "апреля", "мая", "июня", "июля", "августа", "сентября",
        "октября", "ноября", "декабря",
    ];

    let names = match lang {
        Language::En => &EN,
        Language::Az => &AZ,
        Language::Ru => &RU,
    };
    let index = usize::try_from(month.clamp(1, 12) - 1).unwrap_or_default();
    names[index]
}

fn unit_name(lang: Language, unit: TimeUnit, category: PluralCategory) -> &'static str {
    match lang {
        Language::En => {
            let one = category == PluralCategory::One;
            match (unit, one) {
                (TimeUnit::Second, true) => "second",
                (TimeUnit::Second, false) => "seconds",
                (TimeUnit::Minute, true) => "minute",
                (TimeUnit::Minute, false) => "minutes",
                (TimeUnit::Hour, true) => "hour",
                (TimeUnit::Hour, false) => "hours",
                (TimeUnit::Day, true) => "day",
                (TimeUnit::Day, false) => "days",
                (TimeUnit::Month, true) => "month",
                (TimeUnit::Month, false) => "months",
                (TimeUnit::Year, true) => "year",
                (TimeUnit::Year, false) => "years",
            }
        },
        Language::Az => match unit {
            TimeUnit::Second => "saniyə",
            TimeUnit::Minute => "dəqiqə",
            TimeUnit::Hour => "saat",
            TimeUnit::Day => "gün",
            TimeUnit::Month => "ay",
            TimeUnit::Year => "il",
        },
        Language::Ru => {
            let forms: [&'static str; 3] = match unit {
                TimeUnit::Second => ["секунду", "секунды", "секунд"],
                TimeUnit::Minute => ["минуту", "минуты", "минут"],
                TimeUnit::Hour => ["час", "часа", "часов"],
                TimeUnit::Day => ["день", "дня", "дней"],
                TimeUnit::Month => ["месяц", "месяца", "месяцев"],
                TimeUnit::Year => ["год", "года", "лет"],
            };
            match category {
                PluralCategory::One => forms[0],
                PluralCategory::Few | PluralCategory::Other => forms[1],
                PluralCategory::Many => forms[2],
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use rstest::rstest;

    #[rstest]
    #[case(Language::En, 1234.5, "1,234.5")]
    #[case(Language::Az, 1234.5, "1.234,5")]
    #[case(Language::Ru, 1234.5, "1\u{a0}234,5")]
    #[case(Language::En, 1_000_000.0, "1,000,000")]
    #[case(Language::En, -9876.54321, "-9,876.543")]
    #[case(Language::En, 0.1 + 0.2, "0.3")]
    #[case(Language::Az, 12.0, "12")]
    #[case(Language::En, -0.0001, "0")]
    fn number_default_options(#[case] lang: Language, #[case] value: f64, #[case] expected: &str) {
        assert_eq!(Formatter::new(lang).number(value, &NumberOptions::default()), expected);
    }

    #[test]
    fn number_options_are_honoured() {
        let en = Formatter::new(Language::En);
        let options = NumberOptions {
            min_fraction_digits: 2,
            max_fraction_digits: 4,
            grouping: false,
        };
        assert_eq!(en.number(1234.5, &options), "1234.50");
        assert_eq!(en.number(1234.56789, &options), "1234.5679");
        assert_eq!(en.number(2.6, &NumberOptions::fixed(0)), "3");
    }

    #[test]
    fn number_non_finite_is_plain() {
        let ru = Formatter::new(Language::Ru);
        assert_eq!(ru.number(f64::NAN, &NumberOptions::default()), "NaN");
        assert_eq!(ru.number(f64::NEG_INFINITY, &NumberOptions::default()), "-Infinity");
    }

    #[rstest]
    #[case(Language::En, 12.5, "AZN", "AZN\u{a0}12.50")]
    #[case(Language::En, 12.5, "usd", "$12.50")]
    #[case(Language::En, -3.0, "EUR", "-€3.00")]
    #[case(Language::Az, 12.5, "AZN", "12,50\u{a0}₼")]
    #[case(Language::Ru, 1500.0, "RUB", "1\u{a0}500,00\u{a0}₽")]
    #[case(Language::Ru, 7.0, "CHF", "7,00\u{a0}CHF")]
    #[case(Language::Az, 12.5, "MANAT", "12.5 MANAT")]
    #[case(Language::En, f64::NAN, "USD", "NaN USD")]
    fn currency_formats(
        #[case] lang: Language,
        #[case] value: f64,
        #[case] code: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(Formatter::new(lang).currency(value, code), expected);
    }

    #[rstest]
    #[case(Language::Az, DateStyle::Short, "19.10.2026")]
    #[case(Language::Ru, DateStyle::Short, "19.10.2026")]
    #[case(Language::En, DateStyle::Short, "10/19/2026")]
    #[case(Language::En, DateStyle::Long, "October 19, 2026")]
    #[case(Language::Az, DateStyle::Long, "19 oktyabr 2026")]
    #[case(Language::Ru, DateStyle::Long, "19 октября 2026 г.")]
    fn date_styles(#[case] lang: Language, #[case] style: DateStyle, #[case] expected: &str) {
        assert_eq!(Formatter::new(lang).date(date(2026, 10, 19), style), expected);
    }

    #[test]
    fn short_dates_pad_only_outside_english() {
        let day = date(2026, 1, 5);
        assert_eq!(Formatter::new(Language::En).date(day, DateStyle::Short), "1/5/2026");
        assert_eq!(Formatter::new(Language::Az).date(day, DateStyle::Short), "05.01.2026");
    }

    #[test]
    fn timestamp_millis_uses_utc_date() {
        let en = Formatter::new(Language::En);
        // 2026-10-19T23:30:00Z
        assert_eq!(en.timestamp_millis(1_792_452_600_000, DateStyle::Short), "10/19/2026");
        assert_eq!(en.timestamp_millis(i64::MAX, DateStyle::Short), i64::MAX.to_string());
    }

    #[rstest]
    #[case(Language::En, 0.0, "now")]
    #[case(Language::En, 0.4, "now")]
    #[case(Language::En, 30.0, "in 30 seconds")]
    #[case(Language::En, -1.0, "1 second ago")]
    #[case(Language::En, -7_200.0, "2 hours ago")]
    #[case(Language::En, -86_400.0, "yesterday")]
    #[case(Language::En, 86_400.0, "tomorrow")]
    #[case(Language::En, 3.0 * 86_400.0, "in 3 days")]
    #[case(Language::En, -31.0 * 86_400.0, "last month")]
    #[case(Language::En, 2.0 * 365.0 * 86_400.0, "in 2 years")]
    #[case(Language::Ru, -86_400.0, "вчера")]
    #[case(Language::Ru, 5.0 * 86_400.0, "через 5 дней")]
    #[case(Language::Ru, -3.0 * 3_600.0, "3 часа назад")]
    #[case(Language::Ru, 21.0 * 60.0, "через 21 минуту")]
    #[case(Language::Az, 0.0, "indi")]
    #[case(Language::Az, 86_400.0, "sabah")]
    #[case(Language::Az, -120.0, "2 dəqiqə öncə")]
    #[case(Language::Az, 4.0 * 86_400.0, "4 gün ərzində")]
    fn relative_time_phrases(#[case] lang: Language, #[case] diff: f64, #[case] expected: &str) {
        assert_eq!(Formatter::new(lang).relative_time(diff), expected);
    }

    #[test]
    fn relative_time_rounds_half_up() {
        let en = Formatter::new(Language::En);
        assert_eq!(en.relative_time(-90.0), "1 minute ago");
        assert_eq!(en.relative_time(150.0), "in 3 minutes");
    }

    #[test]
    fn relative_time_non_finite() {
        assert_eq!(Formatter::new(Language::En).relative_time(f64::NAN), "NaNs");
    }
}
