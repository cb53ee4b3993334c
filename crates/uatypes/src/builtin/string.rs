// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! String-like leaves: [`UaString`], [`ByteString`], [`XmlElement`].
//!
//! All three share one representation: an optional byte buffer. `None` is the
//! null string (length `-1`), `Some` of zero bytes is the empty string. The
//! two never compare equal and both survive copy and release.
//!
//! Buffers may borrow `'static` data (literal assignment) or own a heap copy.
//! Copies always own.

use crate::alloc::{try_copy_bytes, try_vec};
use crate::config;
use crate::descriptor::TypeIndex;
use crate::error::{Error, Result};
use crate::ns0::types;
use crate::value::DataType;
use std::borrow::Cow;
use std::fmt;

macro_rules! string_like {
    ($(#[$meta:meta])* $name:ident => $index:path) => {
        $(#[$meta])*
        #[derive(Clone, Default, PartialEq, Eq, Hash)]
        pub struct $name {
            data: Option<Cow<'static, [u8]>>,
        }

        impl $name {
            /// The null value (length `-1`).
            #[must_use]
            pub const fn null() -> Self {
                Self { data: None }
            }

            /// Present with zero bytes.
            #[must_use]
            pub const fn empty() -> Self {
                Self {
                    data: Some(Cow::Borrowed(&[])),
                }
            }

            /// Borrow static bytes without copying.
            #[must_use]
            pub fn from_static<B: AsRef<[u8]> + ?Sized>(bytes: &'static B) -> Self {
                Self {
                    data: Some(Cow::Borrowed(bytes.as_ref())),
                }
            }

            /// Owned copy of `bytes`.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                Ok(Self::from_vec(try_copy_bytes(bytes)?))
            }

            /// Take ownership of `bytes`.
            #[must_use]
            pub fn from_vec(bytes: Vec<u8>) -> Self {
                Self {
                    data: Some(Cow::Owned(bytes)),
                }
            }

            /// Zero-filled buffer of `length` bytes.
            pub fn new_members(length: i32) -> Result<Self> {
                let n = usize::try_from(length).map_err(|_| {
                    Error::InvalidArgument(format!(
                        "{} length {}",
                        stringify!($name),
                        length
                    ))
                })?;
                let mut bytes = try_vec(n)?;
                bytes.resize(n, 0);
                Ok(Self::from_vec(bytes))
            }

            /// Byte length, `-1` when null.
            #[must_use]
            pub fn len(&self) -> i32 {
                self.data
                    .as_ref()
                    .map_or(-1, |b| i32::try_from(b.len()).unwrap_or(i32::MAX))
            }

            #[must_use]
            pub fn is_null(&self) -> bool {
                self.data.is_none()
            }

            /// Present with zero bytes. A null value is not empty.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.data.as_ref().is_some_and(|b| b.is_empty())
            }

            #[must_use]
            pub fn as_bytes(&self) -> Option<&[u8]> {
                self.data.as_deref()
            }

            #[must_use]
            pub fn into_bytes(self) -> Option<Vec<u8>> {
                self.data.map(Cow::into_owned)
            }
        }

        impl DataType for $name {
            const TYPE_INDEX: TypeIndex = $index;

            fn try_copy(&self) -> Result<Self> {
                match &self.data {
                    None => Ok(Self::null()),
                    Some(bytes) => Self::from_bytes(bytes),
                }
            }

            fn delete_members(&mut self) {
                self.data = None;
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match &self.data {
                    None => write!(f, "{}(null)", stringify!($name)),
                    Some(bytes) => f
                        .debug_tuple(stringify!($name))
                        .field(&String::from_utf8_lossy(bytes))
                        .finish(),
                }
            }
        }
    };
}

string_like! {
    /// UTF-8 text.
    UaString => types::STRING
}

string_like! {
    /// Opaque octets.
    ByteString => types::BYTESTRING
}

string_like! {
    /// Serialized XML fragment.
    XmlElement => types::XMLELEMENT
}

impl UaString {
    /// Owned copy of `text`.
    pub fn copy_cstring(text: &str) -> Result<Self> {
        Self::from_bytes(text.as_bytes())
    }

    /// Render `args` into a fresh string, bounded by the runtime
    /// [`format_capacity`](crate::config::TypesConfig::format_capacity).
    ///
    /// ```
    /// use uatypes::UaString;
    ///
    /// let s = UaString::copy_printf(format_args!("sensor-{:03}", 7)).unwrap();
    /// assert_eq!(s.as_str(), Some("sensor-007"));
    /// ```
    pub fn copy_printf(args: fmt::Arguments<'_>) -> Result<Self> {
        Self::format_bounded(args, config::runtime().format_capacity)
    }

    /// Render `args` into at most `capacity - 1` bytes (the last slot is the
    /// terminator of the fixed buffer). Overflow is an encoding error, never a
    /// silent truncation.
    pub fn format_bounded(args: fmt::Arguments<'_>, capacity: usize) -> Result<Self> {
        let limit = capacity.saturating_sub(1);
        let mut writer = BoundedWriter {
            buf: try_vec(limit)?,
            limit,
            overflow: false,
        };
        if fmt::write(&mut writer, args).is_err() {
            let reason = if writer.overflow {
                format!("formatted text exceeds {} bytes", limit)
            } else {
                "formatter failed".to_string()
            };
            log::debug!("[string] copy_printf rejected: {}", reason);
            return Err(Error::Encoding(reason));
        }
        Ok(Self::from_vec(writer.buf))
    }

    /// Text view, if present and valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }
}

impl fmt::Display for UaString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_bytes() {
            Some(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            None => Ok(()),
        }
    }
}

struct BoundedWriter {
    buf: Vec<u8>,
    limit: usize,
    overflow: bool,
}

impl fmt::Write for BoundedWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.buf.len() + s.len() > self.limit {
            self.overflow = true;
            return Err(fmt::Error);
        }
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_not_empty() {
        let null = UaString::null();
        let empty = UaString::empty();
        assert_eq!(null.len(), -1);
        assert_eq!(empty.len(), 0);
        assert!(null.is_null() && !null.is_empty());
        assert!(empty.is_empty() && !empty.is_null());
        assert_ne!(null, empty);
        assert_eq!(UaString::default(), null);
    }

    #[test]
    fn test_null_and_empty_survive_copy() {
        for src in [UaString::null(), UaString::empty()] {
            let mut copy = src.try_copy().expect("copy");
            assert_eq!(copy, src);
            copy.delete_members();
            copy.delete_members();
            assert!(copy.is_null());
        }
    }

    #[test]
    fn test_copy_owns_its_buffer() {
        let src = UaString::from_static("static text");
        let copy = src.try_copy().expect("copy");
        assert_eq!(copy, src);
        assert_ne!(
            copy.as_bytes().map(<[u8]>::as_ptr),
            src.as_bytes().map(<[u8]>::as_ptr)
        );
    }

    #[test]
    fn test_byte_exact_equality() {
        let a = ByteString::from_bytes(&[0, 1, 2]).expect("bytes");
        let b = ByteString::from_vec(vec![0, 1, 2]);
        let c = ByteString::from_vec(vec![0, 1]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_new_members() {
        let b = ByteString::new_members(4).expect("alloc");
        assert_eq!(b.as_bytes(), Some(&[0u8; 4][..]));
        assert!(ByteString::new_members(0).expect("empty").is_empty());
        assert!(matches!(
            ByteString::new_members(-1),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_format_bounded() {
        let s = UaString::format_bounded(format_args!("{}-{}", "ab", 12), 8).expect("fits");
        assert_eq!(s.as_str(), Some("ab-12"));

        // 7 content bytes + terminator fill an 8-byte buffer exactly.
        assert!(UaString::format_bounded(format_args!("{}", "abcdefg"), 8).is_ok());
        let err = UaString::format_bounded(format_args!("{}", "abcdefgh"), 8).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_debug_and_display() {
        assert_eq!(format!("{:?}", UaString::null()), "UaString(null)");
        assert_eq!(format!("{:?}", UaString::from_static("x")), "UaString(\"x\")");
        assert_eq!(UaString::from_static("hello").to_string(), "hello");
        assert_eq!(XmlElement::from_static("<a/>").len(), 4);
    }
}
