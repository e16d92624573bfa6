// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Line-based parser for the IGC flight recorder data format.
//!
//! Only the records needed for summarizing a flight are evaluated:
//! the leading A record, the H records for date, pilot and glider, and
//! the B records with the fixes. All other records are ignored.

use std::str::FromStr;

use anyhow::{anyhow, bail};
use jiff::civil::{Date, Time};
use nom::{
    IResult, Parser,
    bytes::complete::{tag, take, take_while_m_n},
    character::complete::one_of,
    combinator::map_res,
    error::{Error as NomError, ErrorKind},
};

use crate::{Fix, FlightRecording};

const BYTE_ORDER_MARK: char = '\u{feff}';

fn fixed_digits<T: FromStr>(input: &str, count: usize) -> IResult<&str, T> {
    map_res(
        take_while_m_n(count, count, |c: char| c.is_ascii_digit()),
        str::parse::<T>,
    )
    .parse(input)
}

fn signed_number<T: FromStr>(input: &str, count: usize) -> IResult<&str, T> {
    map_res(take(count), str::parse::<T>).parse(input)
}

fn verify_error(input: &str) -> nom::Err<NomError<&str>> {
    nom::Err::Error(NomError::new(input, ErrorKind::Verify))
}

/// `HHMMSS`
fn fix_time(input: &str) -> IResult<&str, Time> {
    let (rest, hour) = fixed_digits::<i8>(input, 2)?;
    let (rest, minute) = fixed_digits::<i8>(rest, 2)?;
    let (rest, second) = fixed_digits::<i8>(rest, 2)?;
    let time = Time::new(hour, minute, second, 0).map_err(|_| verify_error(input))?;
    Ok((rest, time))
}

/// `DDMMmmm[NS]`
fn latitude(input: &str) -> IResult<&str, f64> {
    let (rest, degrees) = fixed_digits::<u32>(input, 2)?;
    let (rest, minutes_milli) = fixed_digits::<u32>(rest, 5)?;
    let (rest, hemisphere) = one_of("NS").parse(rest)?;
    let value = f64::from(degrees) + f64::from(minutes_milli) / 60_000.0;
    if value > 90.0 {
        return Err(verify_error(input));
    }
    Ok((rest, if hemisphere == 'S' { -value } else { value }))
}

/// `DDDMMmmm[EW]`
fn longitude(input: &str) -> IResult<&str, f64> {
    let (rest, degrees) = fixed_digits::<u32>(input, 3)?;
    let (rest, minutes_milli) = fixed_digits::<u32>(rest, 5)?;
    let (rest, hemisphere) = one_of("EW").parse(rest)?;
    let value = f64::from(degrees) + f64::from(minutes_milli) / 60_000.0;
    if value > 180.0 {
        return Err(verify_error(input));
    }
    Ok((rest, if hemisphere == 'W' { -value } else { value }))
}

/// `BHHMMSSDDMMmmmNDDDMMmmmEVPPPPPGGGGG`
///
/// Trailing extensions (I record) are ignored.
pub fn fix_record(input: &str) -> IResult<&str, Fix> {
    let (rest, _) = tag("B").parse(input)?;
    let (rest, time) = fix_time(rest)?;
    let (rest, latitude) = latitude(rest)?;
    let (rest, longitude) = longitude(rest)?;
    let (rest, validity) = one_of("AV").parse(rest)?;
    let (rest, pressure_altitude) = signed_number::<i32>(rest, 5)?;
    let (rest, gnss_altitude) = signed_number::<i32>(rest, 5)?;
    let fix = Fix {
        time,
        latitude,
        longitude,
        valid: validity == 'A',
        pressure_altitude,
        gnss_altitude,
    };
    Ok((rest, fix))
}

/// `H[FOP]<TLC><text>`
///
/// Returns the three-letter code and the remaining text.
pub fn header_record(input: &str) -> IResult<&str, (&str, &str)> {
    let (rest, _) = tag("H").parse(input)?;
    let (rest, _source) = one_of("FOP").parse(rest)?;
    let (text, code) = take(3usize).parse(rest)?;
    Ok(("", (code, text)))
}

/// Long names like `PILOTINCHARGE:` are separated by a colon.
fn header_value(text: &str) -> &str {
    text.split_once(':')
        .map_or(text, |(_, value)| value)
        .trim()
}

/// `DDMMYY` optionally followed by a flight number, e.g. `160701,01`.
fn header_date(input: &str) -> IResult<&str, (i8, i8, i16)> {
    let (rest, day) = fixed_digits::<i8>(input, 2)?;
    let (rest, month) = fixed_digits::<i8>(rest, 2)?;
    let (rest, year) = fixed_digits::<i16>(rest, 2)?;
    Ok((rest, (day, month, year)))
}

fn parse_header_date(value: &str) -> anyhow::Result<Date> {
    let (_, (day, month, year)) =
        header_date(value).map_err(|err| anyhow!("invalid date '{value}': {err}"))?;
    // Two-digit years
    let year = if year < 80 { 2000 + year } else { 1900 + year };
    Date::new(year, month, day).map_err(|err| anyhow!("invalid date '{value}': {err}"))
}

/// Parses the contents of an IGC file.
///
/// Fails if the content does not start with an A record or if the
/// date header is missing or malformed. Malformed B records are skipped.
pub fn parse_flight_recording(content: &str) -> anyhow::Result<FlightRecording> {
    let mut lines = content
        .trim_start_matches(BYTE_ORDER_MARK)
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty());
    let Some(first_line) = lines.next() else {
        bail!("empty content");
    };
    if !first_line.starts_with('A') {
        bail!("missing A record");
    }
    let mut recording = FlightRecording::default();
    for line in lines {
        if line.starts_with('H') {
            let Ok((_, (code, text))) = header_record(line) else {
                log::debug!("Skipping malformed H record: {line}");
                continue;
            };
            let value = header_value(text);
            match code {
                "DTE" => {
                    recording.date = Some(parse_header_date(value)?);
                }
                "PLT" => value.clone_into(&mut recording.pilot),
                "GTY" => value.clone_into(&mut recording.glider_type),
                "GID" => value.clone_into(&mut recording.glider_id),
                _ => (),
            }
        } else if line.starts_with('B') {
            match fix_record(line) {
                Ok((_, fix)) => recording.fixes.push(fix),
                Err(err) => {
                    log::debug!("Skipping malformed B record '{line}': {err}");
                }
            }
        }
    }
    if recording.date.is_none() {
        bail!("missing date header");
    }
    log::debug!(
        "Parsed flight recording with {num_fixes} fix(es)",
        num_fixes = recording.fixes.len()
    );
    Ok(recording)
}
