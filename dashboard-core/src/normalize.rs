//! Stationboard normalization.
//!
//! Turns the transit API's raw stationboard payload into a display-ready
//! [`NormalizedStationBoard`]. The mapping is 1:1 and order-preserving: no
//! entries are filtered, merged or re-sorted.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike};
use serde::Deserialize;
use serde_json::Value;

use crate::error::DashboardError;
use crate::model::{NormalizedDeparture, NormalizedStationBoard};

#[derive(Debug, Deserialize)]
struct RawStation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawStop {
    departure: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDeparture {
    stop: RawStop,
    to: String,
    category: String,
}

#[derive(Debug, Deserialize)]
struct RawStationBoard {
    station: RawStation,
    stationboard: Vec<RawDeparture>,
}

/// Normalize a raw stationboard in the host's local time zone.
pub fn normalize(payload: Value) -> Result<NormalizedStationBoard, DashboardError> {
    normalize_in(payload, &Local)
}

/// Normalize a raw stationboard, rendering departure times in `tz`.
///
/// Timestamps without an offset are taken as wall-clock time already and are
/// not shifted.
pub fn normalize_in<Tz: TimeZone>(
    payload: Value,
    tz: &Tz,
) -> Result<NormalizedStationBoard, DashboardError> {
    let raw: RawStationBoard = serde_json::from_value(payload)
        .map_err(|e| DashboardError::data_format("stationboard", e.to_string()))?;

    let departures = raw
        .stationboard
        .into_iter()
        .map(|entry| -> Result<NormalizedDeparture, DashboardError> {
            let stamp = entry.stop.departure.ok_or_else(|| {
                DashboardError::data_format("stationboard", "departure without a timestamp")
            })?;

            Ok(NormalizedDeparture {
                departure_time: format_departure(&stamp, tz)?,
                destination: entry.to,
                category: entry.category,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NormalizedStationBoard { station: raw.station.name, departures })
}

/// `HH:MM` for a departure timestamp.
pub fn format_departure<Tz: TimeZone>(stamp: &str, tz: &Tz) -> Result<String, DashboardError> {
    let (hour, minute) = local_hour_minute(stamp, tz)?;
    Ok(format!("{hour:02}:{minute:02}"))
}

fn local_hour_minute<Tz: TimeZone>(stamp: &str, tz: &Tz) -> Result<(u32, u32), DashboardError> {
    // transport.opendata.ch sends `+0100`, RFC 3339 wants `+01:00`.
    let with_offset = DateTime::parse_from_rfc3339(stamp)
        .or_else(|_| DateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S%z"));

    if let Ok(dt) = with_offset {
        let local = dt.with_timezone(tz);
        return Ok((local.hour(), local.minute()));
    }

    NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M"))
        .map(|naive| (naive.hour(), naive.minute()))
        .map_err(|_| {
            DashboardError::data_format("stationboard", format!("unparseable departure time '{stamp}'"))
        })
}
