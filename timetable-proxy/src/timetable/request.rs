//! Typed timetable requests.

use chrono::NaiveDate;

use crate::stations::StationTable;

use super::error::ValidationError;
use super::params::QueryParams;

/// Schedule variant selector for the subway timetable.
///
/// Upstream codes: `7` Saturday, `8` weekday, `9` holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayCode {
    #[default]
    Weekday,
    Saturday,
    Holiday,
}

impl DayCode {
    /// Parse a day code, falling back to [`DayCode::Weekday`] for anything
    /// outside the known set (including an absent value).
    pub fn parse_lenient(code: Option<&str>) -> Self {
        match code {
            Some("7") => DayCode::Saturday,
            Some("9") => DayCode::Holiday,
            _ => DayCode::Weekday,
        }
    }

    /// The upstream wire code.
    pub fn as_code(self) -> &'static str {
        match self {
            DayCode::Weekday => "8",
            DayCode::Saturday => "7",
            DayCode::Holiday => "9",
        }
    }
}

/// Body format requested from the upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    /// Only a case-insensitive `xml` selects XML.
    pub fn parse_lenient(format: Option<&str>) -> Self {
        match format {
            Some(f) if f.eq_ignore_ascii_case("xml") => ResponseFormat::Xml,
            _ => ResponseFormat::Json,
        }
    }

    /// The upstream wire value (upper case).
    pub fn as_upstream(self) -> &'static str {
        match self {
            ResponseFormat::Json => "JSON",
            ResponseFormat::Xml => "XML",
        }
    }
}

/// A validated subway timetable query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubwayTimetableRequest {
    /// Railway operator code (`railOprIsttCd`)
    pub operator_code: String,
    /// Line code (`lnCd`)
    pub line_code: String,
    /// Station code (`stinCd`)
    pub station_code: String,
    pub day: DayCode,
    pub format: ResponseFormat,
}

impl SubwayTimetableRequest {
    /// Required identifier parameters, in the order they are reported.
    pub const REQUIRED: [&'static str; 3] = ["railOprIsttCd", "lnCd", "stinCd"];

    /// Validate raw query parameters.
    pub fn from_params(params: &QueryParams) -> Result<Self, ValidationError> {
        let [operator_code, line_code, station_code] = params.require(Self::REQUIRED)?;

        Ok(Self {
            operator_code: operator_code.to_string(),
            line_code: line_code.to_string(),
            station_code: station_code.to_string(),
            day: DayCode::parse_lenient(params.get("dayCd")),
            format: ResponseFormat::parse_lenient(params.get("format")),
        })
    }

    /// Non-secret upstream query parameters, in wire order.
    pub fn upstream_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("format", self.format.as_upstream().to_string()),
            ("railOprIsttCd", self.operator_code.clone()),
            ("lnCd", self.line_code.clone()),
            ("stinCd", self.station_code.clone()),
            ("dayCd", self.day.as_code().to_string()),
        ]
    }
}

/// A validated intercity (two-station journey) timetable query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntercityTimetableRequest {
    /// Departure station name as given by the caller
    pub from: String,
    /// Arrival station name as given by the caller
    pub to: String,
    /// Upstream ID of the departure station
    pub from_id: String,
    /// Upstream ID of the arrival station
    pub to_id: String,
    pub date: NaiveDate,
}

impl IntercityTimetableRequest {
    pub const REQUIRED: [&'static str; 3] = ["from", "to", "date"];

    /// Rows requested per upstream page.
    const ROWS_PER_PAGE: &'static str = "200";

    /// Validate raw query parameters, resolving station names through `stations`.
    pub fn from_params(
        params: &QueryParams,
        stations: &StationTable,
    ) -> Result<Self, ValidationError> {
        let [from, to, date] = params.require(Self::REQUIRED)?;
        let date = parse_compact_date(date)?;

        let from_id = stations.resolve(from);
        let to_id = stations.resolve(to);
        let (Some(from_id), Some(to_id)) = (from_id, to_id) else {
            let unresolved = [(from, from_id), (to, to_id)]
                .into_iter()
                .filter(|(_, id)| id.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            return Err(ValidationError::UnknownStations(unresolved));
        };

        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
            from_id: from_id.to_string(),
            to_id: to_id.to_string(),
            date,
        })
    }

    /// Non-secret upstream query parameters, in wire order.
    pub fn upstream_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("depPlaceId", self.from_id.clone()),
            ("arrPlaceId", self.to_id.clone()),
            ("depPlandTime", self.date.format("%Y%m%d").to_string()),
            ("numOfRows", Self::ROWS_PER_PAGE.to_string()),
            ("pageNo", "1".to_string()),
            ("_type", "json".to_string()),
        ]
    }
}

/// Parse an eight-digit `YYYYMMDD` date.
fn parse_compact_date(s: &str) -> Result<NaiveDate, ValidationError> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y%m%d").map_err(|_| ValidationError::InvalidDate(s.to_string()))
}
