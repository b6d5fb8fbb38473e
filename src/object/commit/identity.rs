use std::fmt::Display;
use std::io::Cursor;

use time::{OffsetDateTime, UtcOffset};

use crate::utils::cursor::EasyRead;
use crate::{Constants, Error, Result};

use super::TIMEZONE_FORMAT;

/// Author or committer of a commit: who, and when in which timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    email: String,
    /// Seconds since the unix epoch
    timestamp: i64,
    /// Minutes east of UTC
    utc_offset: i32,
}

impl Identity {
    /// Builds an identity, checking that it can be written out and read back unchanged.
    ///
    /// # Errors
    ///
    /// This function will fail if:
    /// - `name` is blank or contains `<` or a line terminator.
    /// - `email` contains `<`, `>` or a line terminator.
    /// - `utc_offset` is outside of the accepted range.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        timestamp: i64,
        utc_offset: i32,
    ) -> Result<Self> {
        let name = name.into();
        let email = email.into();

        validate_name(name.as_bytes())?;
        if email.bytes().any(|b| {
            b == Constants::EMAIL_OPEN
                || b == Constants::EMAIL_CLOSE
                || b == Constants::LINE_TERMINATOR
        }) {
            return Err(Error::formatting(format!("invalid email {:?}", email)));
        }
        if utc_offset.unsigned_abs() / Constants::MINUTES_PER_HOUR > Constants::MAX_OFFSET_HOURS {
            return Err(Error::formatting(format!(
                "utc offset of {} minutes is out of range",
                utc_offset
            )));
        }

        Ok(Self {
            name,
            email,
            timestamp,
            utc_offset,
        })
    }

    /// Builds an identity stamped with the current time and the local timezone, falling back to
    /// UTC when the local offset can't be determined.
    pub fn now(name: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        let now = OffsetDateTime::now_utc();
        Identity::new(
            name,
            email,
            now.unix_timestamp(),
            i32::from(offset.whole_minutes()),
        )
    }

    /// Parses a `{header}{name} <{email}> {timestamp} {±HHMM}\n` line starting at the cursor,
    /// leaving it right after the line terminator.
    ///
    /// The timezone may be missing, in which case the offset is zero. Anything after the
    /// timezone and before the terminator is ignored.
    ///
    /// # Errors
    ///
    /// Fails with `Error::Formatting` if the header does not match byte for byte, the line has
    /// no terminator, or any of the fields is missing or malformed.
    pub fn parse(cursor: &mut Cursor<&[u8]>, header: &[u8]) -> Result<Self> {
        cursor.expect_literal(header)?;
        let line = cursor.read_until_checked(Constants::LINE_TERMINATOR)?;

        let email_open = line
            .iter()
            .position(|b| *b == Constants::EMAIL_OPEN)
            .ok_or_else(|| Error::formatting("identity has no email"))?;
        // the space right before `<` separates the name and is not part of it
        let name_end = email_open
            .checked_sub(1)
            .filter(|i| line[*i] == Constants::HEADER_SEPARATOR)
            .ok_or_else(|| Error::formatting("expected a space between name and email"))?;
        let name = &line[..name_end];
        validate_name(name)?;

        let after_open = &line[email_open + 1..];
        let email_len = after_open
            .iter()
            .position(|b| *b == Constants::EMAIL_CLOSE)
            .ok_or_else(|| Error::formatting("email is not closed"))?;
        let email = &after_open[..email_len];
        if email.contains(&Constants::EMAIL_OPEN) {
            return Err(Error::formatting("email contains a nested '<'"));
        }

        let mut rest = &after_open[email_len + 1..];
        rest = rest
            .strip_prefix(&[Constants::HEADER_SEPARATOR])
            .unwrap_or(rest);
        let (timestamp, mut rest) = parse_timestamp(rest)?;

        let utc_offset = if rest.is_empty() {
            0
        } else {
            rest = rest
                .strip_prefix(&[Constants::HEADER_SEPARATOR])
                .ok_or_else(|| Error::formatting("expected a space after the timestamp"))?;
            if rest.is_empty() {
                0
            } else {
                parse_timezone(rest)?
            }
        };

        Ok(Self {
            name: std::str::from_utf8(name)?.to_owned(),
            email: std::str::from_utf8(email)?.to_owned(),
            timestamp,
            utc_offset,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn utc_offset(&self) -> i32 {
        self.utc_offset
    }

    pub fn offset(&self) -> Result<UtcOffset> {
        Ok(UtcOffset::from_whole_seconds(self.utc_offset * 60)?)
    }

    /// The moment this identity was recorded, in its own timezone.
    ///
    /// # Errors
    ///
    /// This function will fail if the moment can't be represented, either in UTC or once shifted
    /// to the identity's offset.
    pub fn when(&self) -> Result<OffsetDateTime> {
        let offset = self.offset()?;
        OffsetDateTime::from_unix_timestamp(self.timestamp)?
            .checked_to_offset(offset)
            .ok_or_else(|| {
                Error::formatting(format!(
                    "timestamp {} is out of range at offset {}",
                    self.timestamp, offset
                ))
            })
    }

    /// Returns the timezone as a `±HHMM` token.
    pub fn timezone(&self) -> Result<String> {
        Ok(self.offset()?.format(TIMEZONE_FORMAT)?)
    }
}

impl Display for Identity {
    /// `{name} <{email}> {timestamp} {±HHMM}`, the form stored in a commit.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp,
            self.timezone().map_err(|_| std::fmt::Error)?
        )
    }
}

fn validate_name(name: &[u8]) -> Result<()> {
    if name.trim_ascii().is_empty() {
        return Err(Error::formatting("identity name is empty"));
    }
    if name
        .iter()
        .any(|b| *b == Constants::EMAIL_OPEN || *b == Constants::LINE_TERMINATOR)
    {
        return Err(Error::formatting(format!(
            "invalid identity name {:?}",
            String::from_utf8_lossy(name)
        )));
    }
    Ok(())
}

/// Reads an optionally negative run of decimal digits, returning the value and what follows it.
fn parse_timestamp(bytes: &[u8]) -> Result<(i64, &[u8])> {
    let sign_len = usize::from(bytes.first() == Some(&b'-'));
    let digits = bytes[sign_len..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return Err(Error::formatting("expected a timestamp"));
    }

    let end = sign_len + digits;
    let timestamp = std::str::from_utf8(&bytes[..end])?
        .parse::<i64>()
        .map_err(|e| Error::formatting(format!("timestamp out of range: {}", e)))?;
    Ok((timestamp, &bytes[end..]))
}

/// Parses a `±HHMM` token into minutes east of UTC. The token must be followed by a space or
/// nothing at all.
fn parse_timezone(bytes: &[u8]) -> Result<i32> {
    let invalid = || {
        Error::formatting(format!(
            "invalid timezone {:?}",
            String::from_utf8_lossy(bytes)
        ))
    };

    let token_len = "+HHMM".len();
    if bytes.len() < token_len
        || bytes
            .get(token_len)
            .is_some_and(|b| *b != Constants::HEADER_SEPARATOR)
    {
        return Err(invalid());
    }

    let token = std::str::from_utf8(&bytes[..token_len]).map_err(|_| invalid())?;
    let offset = UtcOffset::parse(token, TIMEZONE_FORMAT).map_err(|_| invalid())?;
    if u32::from(offset.whole_hours().unsigned_abs()) > Constants::MAX_OFFSET_HOURS {
        return Err(invalid());
    }

    Ok(i32::from(offset.whole_minutes()))
}

// Tests
