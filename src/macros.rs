//! Macros for newtyping wire-format byte vectors and 32-byte digests.

#[macro_export]
/// Implement `serde::Serialize` and `serde::Deserialize` by passing through to the hex
/// serialization of the wire format.
macro_rules! impl_hex_serde {
    ($item:ty) => {
        impl serde::Serialize for $item {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let s = $crate::ser::ByteFormat::serialize_hex(self);
                serializer.serialize_str(&s)
            }
        }

        impl<'de> serde::Deserialize<'de> for $item {
            fn deserialize<D>(deserializer: D) -> Result<$item, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s: String = serde::Deserialize::deserialize(deserializer)?;
                <$item as $crate::ser::ByteFormat>::deserialize_hex(&s)
                    .map_err(|e| serde::de::Error::custom(e.to_string()))
            }
        }
    };
}

#[macro_export]
/// Wrap an opaque script byte vector in a newtype. The wire format is the underlying bytes
/// with a compact-size length prefix.
macro_rules! wrap_script_bytes {
    (
        $(#[$outer:meta])*
        $wrapper_name:ident
    ) => {
        $(#[$outer])*
        #[derive(Clone, Debug, Eq, PartialEq, Default, Hash, PartialOrd, Ord)]
        pub struct $wrapper_name(Vec<u8>);

        impl $crate::ser::ByteFormat for $wrapper_name {
            type Error = $crate::ser::SerError;

            fn serialized_length(&self) -> usize {
                self.len() + $crate::ser::prefix_byte_len(self.len() as u64) as usize
            }

            fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
            where
                R: std::io::Read,
            {
                Ok(Self::read_prefix_vec(reader)?.into())
            }

            fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
            where
                W: std::io::Write,
            {
                Self::write_prefix_vec(writer, &self.0)
            }
        }

        $crate::impl_hex_serde!($wrapper_name);

        impl $wrapper_name {
            /// Instantiate a new wrapped vector.
            pub fn new(v: Vec<u8>) -> Self {
                Self(v)
            }

            /// Construct the empty instance. On the wire this is a single `0x00` length
            /// prefix.
            pub fn null() -> Self {
                Self(vec![])
            }

            /// Return a reference to the underlying bytes.
            pub fn items(&self) -> &[u8] {
                &self.0
            }

            /// Return the length of the underlying byte vector.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// True if the underlying byte vector is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl std::convert::AsRef<[u8]> for $wrapper_name {
            fn as_ref(&self) -> &[u8] {
                &self.0[..]
            }
        }

        impl From<&[u8]> for $wrapper_name {
            fn from(v: &[u8]) -> Self {
                Self(v.to_vec())
            }
        }

        impl From<Vec<u8>> for $wrapper_name {
            fn from(v: Vec<u8>) -> Self {
                Self(v)
            }
        }
    };
}

#[macro_export]
/// Implement conversion between script newtypes by rewrapping the underlying bytes.
macro_rules! impl_script_conversion {
    ($t1:ty, $t2:ty) => {
        impl From<&$t2> for $t1 {
            fn from(t: &$t2) -> $t1 {
                t.as_ref().into()
            }
        }
        impl From<&$t1> for $t2 {
            fn from(t: &$t1) -> $t2 {
                t.as_ref().into()
            }
        }
    };
}

#[macro_export]
/// Mark a 32-byte hash as a distinct digest type. Prevents type confusion between txids,
/// sighashes, and other same-length digests. The wire format is the raw internal
/// (little-endian) bytes; `from_be_hex`/`to_be_hex` convert to the big-endian form block
/// explorers display.
macro_rules! mark_hash256 {
    (
        $(#[$outer:meta])*
        $hash_name:ident
    ) => {
        $(#[$outer])*
        #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub struct $hash_name(pub [u8; 32]);

        impl $hash_name {
            /// Parse from big-endian (display-order) hex.
            pub fn from_be_hex(be: &str) -> $crate::ser::SerResult<Self> {
                Ok(<Self as $crate::ser::ByteFormat>::deserialize_hex(be)?.reversed())
            }

            /// Render as big-endian (display-order) hex.
            pub fn to_be_hex(&self) -> String {
                $crate::ser::ByteFormat::serialize_hex(&self.reversed())
            }

            /// A byte-reversed copy of the digest.
            pub fn reversed(&self) -> Self {
                let mut buf = self.0;
                buf.reverse();
                Self(buf)
            }
        }

        impl From<[u8; 32]> for $hash_name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8; 32]> for $hash_name {
            fn as_ref(&self) -> &[u8; 32] {
                &self.0
            }
        }

        impl $crate::ser::ByteFormat for $hash_name {
            type Error = $crate::ser::SerError;

            fn serialized_length(&self) -> usize {
                32
            }

            fn read_from<R>(reader: &mut R) -> $crate::ser::SerResult<Self>
            where
                R: std::io::Read,
            {
                let mut buf = [0u8; 32];
                reader.read_exact(&mut buf)?;
                Ok(Self(buf))
            }

            fn write_to<W>(&self, writer: &mut W) -> $crate::ser::SerResult<usize>
            where
                W: std::io::Write,
            {
                Ok(writer.write(&self.0)?)
            }
        }

        $crate::impl_hex_serde!($hash_name);
    };
}
