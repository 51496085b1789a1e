use chrono::{Datelike, NaiveDate};

use crate::utils::constants::{
    COMMENT_PREFIX, DATE_FORMAT, HEADER_PREFIX, HUMIDITY_SUFFIX, PRESSURE_SUFFIX,
};

/// Why a raw line produced no record. `Blank`, `Comment` and `Header` are
/// routine filtering; the rest are malformed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    Comment,
    Header,
    FieldCount,
    BadNumber,
    BadDate,
}

impl SkipReason {
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            SkipReason::FieldCount | SkipReason::BadNumber | SkipReason::BadDate
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::Blank => "blank line",
            SkipReason::Comment => "comment",
            SkipReason::Header => "header row",
            SkipReason::FieldCount => "fewer than 5 fields",
            SkipReason::BadNumber => "non-numeric metric value",
            SkipReason::BadDate => "unparseable date",
        }
    }
}

/// One metric field: the parsed value plus the raw text it came from.
/// Emission echoes the raw text so values are never re-formatted on the
/// way through the map stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricField<'a> {
    pub raw: &'a str,
    pub value: f64,
}

impl<'a> MetricField<'a> {
    fn parse(raw: &'a str) -> Option<Self> {
        let value = raw.parse::<f64>().ok()?;
        Some(Self { raw, value })
    }
}

/// A well-formed raw climate record, borrowed from one CSV input line:
/// `date,location,temperature,humidity,pressure[,...]` with any extra
/// trailing fields ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawRecord<'a> {
    pub date: NaiveDate,
    pub location: &'a str,
    pub temperature: MetricField<'a>,
    pub humidity: MetricField<'a>,
    pub pressure: MetricField<'a>,
}

impl<'a> RawRecord<'a> {
    /// Parse one raw input line. Filtering and rejection follow the wire
    /// contract: trim, drop blank/comment/header lines, require at least
    /// five comma-separated fields, numeric metrics, and a strict
    /// `YYYY-MM-DD` date. A rejected line yields its reason; nothing is
    /// ever partially parsed.
    pub fn parse(line: &'a str) -> Result<Self, SkipReason> {
        let line = line.trim();
        if line.is_empty() {
            return Err(SkipReason::Blank);
        }
        if line.starts_with(COMMENT_PREFIX) {
            return Err(SkipReason::Comment);
        }
        let bytes = line.as_bytes();
        if bytes.len() >= HEADER_PREFIX.len()
            && bytes[..HEADER_PREFIX.len()].eq_ignore_ascii_case(HEADER_PREFIX.as_bytes())
        {
            return Err(SkipReason::Header);
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 5 {
            return Err(SkipReason::FieldCount);
        }

        let temperature = MetricField::parse(fields[2]).ok_or(SkipReason::BadNumber)?;
        let humidity = MetricField::parse(fields[3]).ok_or(SkipReason::BadNumber)?;
        let pressure = MetricField::parse(fields[4]).ok_or(SkipReason::BadNumber)?;

        let date = NaiveDate::parse_from_str(fields[0], DATE_FORMAT)
            .map_err(|_| SkipReason::BadDate)?;

        Ok(Self {
            date,
            location: fields[1],
            temperature,
            humidity,
            pressure,
        })
    }

    /// Calendar-month bucket, e.g. `2024-01`
    pub fn month_key(&self) -> String {
        format!("{}-{:02}", self.date.year(), self.date.month())
    }

    /// `{location}_{year}-{month:02}`, the shared base of all three
    /// metric keys
    pub fn group_key(&self) -> String {
        format!("{}_{}", self.location, self.month_key())
    }

    /// The three key/metric emissions for this record, in wire order.
    /// Temperature takes the bare group key; humidity and pressure are
    /// suffixed.
    pub fn emissions(&self) -> [(String, MetricField<'a>); 3] {
        let base = self.group_key();
        [
            (base.clone(), self.temperature),
            (format!("{}{}", base, HUMIDITY_SUFFIX), self.humidity),
            (format!("{}{}", base, PRESSURE_SUFFIX), self.pressure),
        ]
    }
}
