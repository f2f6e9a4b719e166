use crate::calendar::VisibleMonth;
use thiserror::Error;
use time::{Date, Month, Weekday};

/// How the long form of a date is laid out
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LongForm {
    /// "February 15, 2024"
    MonthDayYear,
    /// "15. Februar 2024"
    DayMonthYear,
}

/// Month and weekday names used when displaying dates
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NameTable {
    months: [&'static str; 12],
    // Starting from Sunday
    weekdays: [&'static str; 7],
    long_form: LongForm,
}

impl NameTable {
    pub(crate) const ENGLISH: NameTable = NameTable {
        months: [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ],
        weekdays: ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
        long_form: LongForm::MonthDayYear,
    };

    pub(crate) const GERMAN: NameTable = NameTable {
        months: [
            "Januar",
            "Februar",
            "März",
            "April",
            "Mai",
            "Juni",
            "Juli",
            "August",
            "September",
            "Oktober",
            "November",
            "Dezember",
        ],
        weekdays: ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"],
        long_form: LongForm::DayMonthYear,
    };

    pub(crate) fn for_language(lang: &str) -> Result<NameTable, UnknownLanguageError> {
        match lang {
            "en" => Ok(NameTable::ENGLISH),
            "de" => Ok(NameTable::GERMAN),
            _ => Err(UnknownLanguageError(lang.to_owned())),
        }
    }

    pub(crate) fn month_name(&self, month: Month) -> &'static str {
        self.months[usize::from(u8::from(month) - 1)]
    }

    pub(crate) fn weekday_abbrev(&self, wd: Weekday) -> &'static str {
        self.weekdays[usize::from(wd.number_days_from_sunday())]
    }

    /// Long-form rendering of a date for the closed field, e.g. "February 15,
    /// 2024"
    pub(crate) fn format_date(&self, date: Date) -> String {
        let month = self.month_name(date.month());
        match self.long_form {
            LongForm::MonthDayYear => format!("{month} {}, {}", date.day(), date.year()),
            LongForm::DayMonthYear => format!("{}. {month} {}", date.day(), date.year()),
        }
    }

    /// Caption for the overlay's navigation row, e.g. "February 2024"
    pub(crate) fn month_title(&self, vm: VisibleMonth) -> String {
        format!("{} {}", self.month_name(vm.month()), vm.year())
    }
}

impl Default for NameTable {
    fn default() -> NameTable {
        NameTable::ENGLISH
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown language {0:?}; expected \"en\" or \"de\"")]
pub(crate) struct UnknownLanguageError(String);

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_format_date() {
        let names = NameTable::default();
        assert_eq!(names.format_date(date!(2024 - 02 - 15)), "February 15, 2024");
        assert_eq!(names.format_date(date!(1999 - 12 - 01)), "December 1, 1999");
    }

    #[test]
    fn test_format_date_german() {
        assert_eq!(
            NameTable::GERMAN.format_date(date!(2024 - 03 - 05)),
            "5. März 2024"
        );
    }

    #[test]
    fn test_month_title() {
        let vm = VisibleMonth::new(2023, Month::December);
        assert_eq!(NameTable::ENGLISH.month_title(vm), "December 2023");
        assert_eq!(NameTable::GERMAN.month_title(vm), "Dezember 2023");
    }

    #[test]
    fn test_weekday_abbrev() {
        assert_eq!(NameTable::ENGLISH.weekday_abbrev(Weekday::Sunday), "Su");
        assert_eq!(NameTable::ENGLISH.weekday_abbrev(Weekday::Saturday), "Sa");
        assert_eq!(NameTable::GERMAN.weekday_abbrev(Weekday::Wednesday), "Mi");
    }

    #[test]
    fn test_for_language() {
        assert_eq!(NameTable::for_language("de"), Ok(NameTable::GERMAN));
        assert_eq!(
            NameTable::for_language("fr"),
            Err(UnknownLanguageError(String::from("fr")))
        );
    }
}
