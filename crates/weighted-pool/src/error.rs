//! Module listing every failure kind the registry and the liquidity engine
//! can surface. Each kind carries a stable numeric code so hosts can match
//! on the rendered message without depending on this crate's enum layout.

use std::fmt;

macro_rules! errors_from_codes {
    ( $( ( $variant:ident, $code:literal ) ),+ $(,)? ) => {
        #[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Error {
            $(
                $variant,
            )*
        }

        impl fmt::Display for Error {
            fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
                match self {
                    $(
                        Self::$variant => write!(f, "{}", format!("AMM#{:0>3}: {}", $code, stringify!($variant))),
                    )*
                }
            }
        }

        impl Error {
            pub fn code(&self) -> u16 {
                match self {
                    $(
                        Self::$variant => $code,
                    )*
                }
            }
        }

        #[cfg(test)]
        impl From<&str> for Error {
            fn from(errno: &str) -> Self {
                match errno.parse::<u16>().unwrap() {
                    $(
                        $code => Self::$variant,
                    )*
                    _ => panic!("Invalid error code"),
                }
            }
        }
    }
}

errors_from_codes!(
    (ZeroAmount, 0),
    (SameAsset, 1),
    (PairMustBeOrdered, 2),
    (PoolAlreadyRegistered, 3),
    (PoolNotRegistered, 4),
    (WeightsSumInvalid, 5),
    (DecimalsInvalid, 6),
    (Unauthorized, 7),
    (Paused, 8),
    (InsufficientAmountX, 9),
    (InsufficientAmountY, 10),
    (OverLimit, 11),
    (BootstrapLiquidityTooLow, 12),
    (InsufficientLiquidityMinted, 13),
    (Overflow, 14),
    (ZeroDivision, 15),
    (PoolValueExceedsCap, 16),
    (FeeOutOfBounds, 17),
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_error_formatting() {
        assert_eq!(format!("{}", Error::ZeroAmount), "AMM#000: ZeroAmount");
        assert_eq!(
            format!("{}", Error::PoolValueExceedsCap),
            "AMM#016: PoolValueExceedsCap"
        );
    }

    #[test]
    fn codes_round_trip() {
        assert_eq!(Error::from("14"), Error::Overflow);
        assert_eq!(Error::Overflow.code(), 14);
    }
}
