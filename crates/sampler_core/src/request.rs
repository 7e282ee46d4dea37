use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// First period available in the remote dataset.
pub const DATASET_FIRST: YearMonth = YearMonth { year: 2007, month: 1 };
/// Last period available in the remote dataset.
pub const DATASET_LAST: YearMonth = YearMonth {
    year: 2023,
    month: 12,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialGroup {
    Race,
    Sexuality,
}

impl SocialGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            SocialGroup::Race => "race",
            SocialGroup::Sexuality => "sexuality",
        }
    }
}

impl fmt::Display for SocialGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialGroup {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "race" => Ok(SocialGroup::Race),
            "sexuality" => Ok(SocialGroup::Sexuality),
            other => Err(ValidationError::UnknownSocialGroup(other.to_string())),
        }
    }
}

/// Calendar month with year granularity; ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: u16,
    month: u8,
}

impl YearMonth {
    pub fn new(year: u16, month: u8) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidPeriod(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn year(self) -> u16 {
        self.year
    }

    pub fn month(self) -> u8 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ValidationError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidPeriod(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
            return Err(invalid());
        }
        let year = year.parse::<u16>().map_err(|_| invalid())?;
        let month = month.parse::<u8>().map_err(|_| invalid())?;
        YearMonth::new(year, month)
    }
}

/// Raw user input, every field optional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SamplingForm {
    pub social_group: Option<SocialGroup>,
    pub start: Option<YearMonth>,
    pub end: Option<YearMonth>,
    /// Document cap as typed; blank means unbounded.
    pub num_docs: Option<String>,
}

/// Validated sampling request. Only constructible through [`SamplingRequest::new`]
/// or [`SamplingForm::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingRequest {
    social_group: SocialGroup,
    start: YearMonth,
    end: YearMonth,
    num_docs: Option<u32>,
}

impl SamplingRequest {
    pub fn new(
        social_group: SocialGroup,
        start: YearMonth,
        end: YearMonth,
        num_docs: Option<u32>,
    ) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::EndBeforeStart { start, end });
        }
        for period in [start, end] {
            if period < DATASET_FIRST || period > DATASET_LAST {
                return Err(ValidationError::OutOfRange(period));
            }
        }
        if num_docs == Some(0) {
            return Err(ValidationError::InvalidDocumentCap("0".to_string()));
        }
        Ok(Self {
            social_group,
            start,
            end,
            num_docs,
        })
    }

    pub fn social_group(&self) -> SocialGroup {
        self.social_group
    }

    pub fn start(&self) -> YearMonth {
        self.start
    }

    pub fn end(&self) -> YearMonth {
        self.end
    }

    /// `None` means every matching document is bundled.
    pub fn num_docs(&self) -> Option<u32> {
        self.num_docs
    }
}

impl SamplingForm {
    pub fn validate(&self) -> Result<SamplingRequest, ValidationError> {
        let social_group = self.social_group.ok_or(ValidationError::MissingSocialGroup)?;
        let start = self.start.ok_or(ValidationError::MissingPeriod("start"))?;
        let end = self.end.ok_or(ValidationError::MissingPeriod("end"))?;
        let num_docs = match self.num_docs.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => Some(n),
                _ => return Err(ValidationError::InvalidDocumentCap(raw.to_string())),
            },
        };
        SamplingRequest::new(social_group, start, end, num_docs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("social group is required")]
    MissingSocialGroup,
    #[error("unknown social group {0:?}")]
    UnknownSocialGroup(String),
    #[error("{0} period is required")]
    MissingPeriod(&'static str),
    #[error("invalid period {0:?}, expected YYYY-MM")]
    InvalidPeriod(String),
    #[error("end period {end} precedes start period {start}")]
    EndBeforeStart { start: YearMonth, end: YearMonth },
    #[error("period {0} is outside {first}..={last}", first = DATASET_FIRST, last = DATASET_LAST)]
    OutOfRange(YearMonth),
    #[error("document count must be a positive integer, got {0:?}")]
    InvalidDocumentCap(String),
}
