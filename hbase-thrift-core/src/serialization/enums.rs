//! Enumerated scalars carried as `i32` codes.

/// Declares an enumerated scalar: a newtype over `i32` with named constants.
///
/// Decoding never validates the code, so values unknown to this build pass
/// through unchanged and re-encode to the same bytes. The generated
/// `is_known()` tells named codes apart from unknown ones.
///
/// # Example
///
/// ```
/// use hbase_thrift_core::thrift_enum;
///
/// thrift_enum! {
///     /// Write-ahead-log policy.
///     pub struct Durability {
///         SKIP_WAL = 1,
///         SYNC_WAL = 3,
///     }
/// }
///
/// assert_eq!(Durability::SYNC_WAL.0, 3);
/// assert_eq!(Durability::SKIP_WAL.name(), Some("SKIP_WAL"));
/// assert!(!Durability(9).is_known());
/// assert_eq!("SYNC_WAL".parse::<Durability>().unwrap(), Durability::SYNC_WAL);
/// ```
#[macro_export]
macro_rules! thrift_enum {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        $vis struct $name(pub i32);

        impl $name {
            $(
                $(#[$variant_meta])*
                pub const $variant: $name = $name($value);
            )+

            /// Every named value, in declaration order.
            pub const VARIANTS: &'static [$name] = &[$($name::$variant),+];

            /// Returns the symbolic name of a known code.
            pub fn name(self) -> ::std::option::Option<&'static str> {
                match self {
                    $(Self::$variant => ::std::option::Option::Some(stringify!($variant)),)+
                    _ => ::std::option::Option::None,
                }
            }

            /// Returns true if the code has a symbolic name.
            pub fn is_known(self) -> bool {
                self.name().is_some()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self.name() {
                    ::std::option::Option::Some(name) => f.write_str(name),
                    ::std::option::Option::None => {
                        write!(f, "{}({})", stringify!($name), self.0)
                    }
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::ThriftError;

            fn from_str(s: &str) -> $crate::Result<Self> {
                match s {
                    $(stringify!($variant) => ::std::result::Result::Ok(Self::$variant),)+
                    other => ::std::result::Result::Err($crate::ThriftError::Protocol(
                        format!("not a valid {} value: {:?}", stringify!($name), other),
                    )),
                }
            }
        }

        impl ::std::convert::From<i32> for $name {
            fn from(code: i32) -> Self {
                $name(code)
            }
        }

        impl ::std::convert::From<$name> for i32 {
            fn from(value: $name) -> i32 {
                value.0
            }
        }

        impl $crate::ThriftValue for $name {
            const TTYPE: $crate::TType = $crate::TType::I32;

            fn read_value(input: &mut dyn $crate::TInputProtocol) -> $crate::Result<Self> {
                input.read_i32().map($name)
            }

            fn write_value(&self, output: &mut dyn $crate::TOutputProtocol) -> $crate::Result<()> {
                output.write_i32(self.0)
            }
        }
    };
}
