// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! ASCII line protocol
//!
//! | Command | Meaning | Reply |
//! |---------|---------|-------|
//! | `r <path>` | read a leaf | value text |
//! | `w <path> <value>` | write a leaf | none |
//! | `l [path]` | list members | space separated names |
//!
//! Failures reply with one of the fixed error strings below.

use std::fmt;

use fibre_micro::{Error, Handle, MAX_TEXT_LEN};

/// Parsed protocol command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'l> {
    /// `r <path>`
    Read(&'l str),
    /// `w <path> <value>`
    Write(&'l str, &'l str),
    /// `l [path]`
    List(&'l str),
}

/// Protocol-level failure, rendered as the reply line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    InvalidCommand,
    InvalidProperty,
    InvalidValue,
    ReadOnly,
    NotAValue,
    Internal,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InvalidCommand => write!(f, "invalid command format"),
            ProtocolError::InvalidProperty => write!(f, "invalid property"),
            ProtocolError::InvalidValue => write!(f, "invalid value"),
            ProtocolError::ReadOnly => write!(f, "read-only"),
            ProtocolError::NotAValue => write!(f, "not a value"),
            ProtocolError::Internal => write!(f, "internal error"),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<Error> for ProtocolError {
    fn from(err: Error) -> Self {
        match err {
            err if err.is_conversion_failure() => ProtocolError::InvalidValue,
            Error::NotFound | Error::InvalidHandle => ProtocolError::InvalidProperty,
            Error::ReadOnly => ProtocolError::ReadOnly,
            Error::NotConvertible => ProtocolError::NotAValue,
            _ => ProtocolError::Internal,
        }
    }
}

impl<'l> Command<'l> {
    /// Parse one protocol line
    pub fn parse(line: &'l str) -> Result<Self, ProtocolError> {
        let mut tokens = line.split_ascii_whitespace();
        let command = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some("r"), Some(path), None) => Command::Read(path),
            (Some("w"), Some(path), Some(value)) => Command::Write(path, value),
            (Some("l"), path, None) => Command::List(path.unwrap_or("")),
            _ => return Err(ProtocolError::InvalidCommand),
        };
        if tokens.next().is_some() {
            return Err(ProtocolError::InvalidCommand);
        }
        Ok(command)
    }
}

/// Execute `command` against the object graph under `root`.
///
/// Returns the reply line, or `None` when the command has no reply.
pub fn execute(root: &Handle<'_>, command: Command<'_>) -> Result<Option<String>, ProtocolError> {
    match command {
        Command::Read(path) => {
            let value = root.lookup(path)?.get_string::<MAX_TEXT_LEN>()?;
            Ok(Some(value.as_str().to_owned()))
        }
        Command::Write(path, value) => {
            root.lookup(path)?.set_from_text(value.as_bytes())?;
            log::info!("{} <- {}", path, value);
            Ok(None)
        }
        Command::List(path) => {
            let node = if path.is_empty() { *root } else { root.lookup(path)? };
            let registry = node.registry().ok_or(ProtocolError::InvalidProperty)?;
            let names: Vec<&str> = registry.entries().iter().map(|entry| entry.name()).collect();
            Ok(Some(names.join(" ")))
        }
    }
}

/// Parse and execute one line, rendering failures as reply text
pub fn handle_line(root: &Handle<'_>, line: &str) -> Option<String> {
    let reply = Command::parse(line).and_then(|command| execute(root, command));
    match reply {
        Ok(reply) => reply,
        Err(err) => {
            log::debug!("'{}' failed: {}", line.trim(), err);
            Some(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{AxisState, Device};

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("r axis0.motor.error"), Ok(Command::Read("axis0.motor.error")));
        assert_eq!(
            Command::parse("w axis0.controller.input_vel 2.5"),
            Ok(Command::Write("axis0.controller.input_vel", "2.5"))
        );
        assert_eq!(Command::parse("l"), Ok(Command::List("")));
        assert_eq!(Command::parse("l axis1"), Ok(Command::List("axis1")));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(Command::parse(""), Err(ProtocolError::InvalidCommand));
        assert_eq!(Command::parse("r"), Err(ProtocolError::InvalidCommand));
        assert_eq!(Command::parse("r a b"), Err(ProtocolError::InvalidCommand));
        assert_eq!(Command::parse("w a"), Err(ProtocolError::InvalidCommand));
        assert_eq!(Command::parse("w a 1 2"), Err(ProtocolError::InvalidCommand));
        assert_eq!(Command::parse("x a"), Err(ProtocolError::InvalidCommand));
    }

    #[test]
    fn test_read_write() {
        let device = Device::power_on();
        let root = Handle::new(&device);

        assert_eq!(handle_line(&root, "r axis0.motor.config.pole_pairs"), Some("7".into()));
        assert_eq!(handle_line(&root, "w axis0.motor.config.pole_pairs 14"), None);
        assert_eq!(device.axis0.motor.config.pole_pairs.get(), 14);
        assert_eq!(device.axis1.motor.config.pole_pairs.get(), 7);
    }

    #[test]
    fn test_enum_state_request() {
        let device = Device::power_on();
        let root = Handle::new(&device);

        assert_eq!(handle_line(&root, "w axis1.requested_state 8"), None);
        assert_eq!(device.axis1.requested_state.get(), AxisState::ClosedLoopControl);
        assert_eq!(
            handle_line(&root, "w axis1.requested_state 5"),
            Some("invalid value".into())
        );
    }

    #[test]
    fn test_error_replies() {
        let device = Device::power_on();
        let root = Handle::new(&device);

        assert_eq!(handle_line(&root, "r axis2.motor"), Some("invalid property".into()));
        assert_eq!(handle_line(&root, "w vbus_voltage 12"), Some("read-only".into()));
        assert_eq!(handle_line(&root, "r axis0"), Some("not a value".into()));
        assert_eq!(
            handle_line(&root, "w axis0.controller.vel_gain fast"),
            Some("invalid value".into())
        );
        assert_eq!(handle_line(&root, "bogus"), Some("invalid command format".into()));
    }

    #[test]
    fn test_core_error_mapping() {
        for err in [Error::BufferTooSmall, Error::ParseError, Error::InvalidValue] {
            assert_eq!(ProtocolError::from(err), ProtocolError::InvalidValue);
        }
        assert_eq!(ProtocolError::from(Error::NotFound), ProtocolError::InvalidProperty);
        assert_eq!(ProtocolError::from(Error::InvalidHandle), ProtocolError::InvalidProperty);
        assert_eq!(ProtocolError::from(Error::ReadOnly), ProtocolError::ReadOnly);
        assert_eq!(ProtocolError::from(Error::NotConvertible), ProtocolError::NotAValue);
        assert_eq!(ProtocolError::from(Error::TypeMismatch), ProtocolError::Internal);
    }

    #[test]
    fn test_list() {
        let device = Device::power_on();
        let root = Handle::new(&device);

        assert_eq!(
            handle_line(&root, "l"),
            Some("vbus_voltage serial_number axis0 axis1".into())
        );
        assert_eq!(
            handle_line(&root, "l axis0"),
            Some("current_state requested_state motor controller is_armed".into())
        );
        assert_eq!(handle_line(&root, "l axis0.motor.error"), Some(String::new()));
    }

    #[test]
    fn test_computed_member() {
        let device = Device::power_on();
        let root = Handle::new(&device);

        assert_eq!(handle_line(&root, "r axis0.is_armed"), Some("0".into()));
        device.axis0.current_state.set(AxisState::ClosedLoopControl);
        assert_eq!(handle_line(&root, "r axis0.is_armed"), Some("1".into()));
        assert_eq!(handle_line(&root, "w axis0.is_armed 0"), Some("read-only".into()));
    }
}
