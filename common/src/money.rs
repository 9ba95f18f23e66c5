//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};
use strum::{Display, EnumString};

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if amount.is_integer() {
            write!(f, "{}{currency}", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{amount}{currency}")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

/// Currency of a [`Money`] amount.
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "UPPERCASE")
)]
#[repr(u8)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    /// Central African CFA Franc.
    Xaf = 1,

    /// US Dollar.
    Usd = 2,

    /// Euro.
    Eur = 3,
}

impl Currency {
    /// Converts this into its [`u8`] representation.
    #[must_use]
    pub const fn u8(self) -> u8 {
        self as u8
    }
}

#[cfg(feature = "postgres")]
mod postgres {
    //! Module providing integration with [`postgres_types`] crate.

    use std::error::Error as StdError;

    use postgres_types::{
        accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql,
        Type,
    };

    use super::Currency;

    impl FromSql<'_> for Currency {
        accepts!(INT2);

        fn from_sql(
            ty: &Type,
            raw: &[u8],
        ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
            match u8::try_from(i16::from_sql(ty, raw)?)? {
                v if Self::Xaf.u8() == v => Ok(Self::Xaf),
                v if Self::Usd.u8() == v => Ok(Self::Usd),
                v if Self::Eur.u8() == v => Ok(Self::Eur),
                v => Err(format!("invalid `Currency` value: {v}").into()),
            }
        }
    }

    impl ToSql for Currency {
        accepts!(INT2);
        to_sql_checked!();

        fn to_sql(
            &self,
            ty: &Type,
            w: &mut BytesMut,
        ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
            i16::from(self.u8()).to_sql(ty, w)
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("25000000XAF").unwrap(),
            Money {
                amount: decimal("25000000"),
                currency: Currency::Xaf,
            },
        );

        assert_eq!(
            Money::from_str("123.45USD").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            },
        );

        assert_eq!(
            Money::from_str("123.45EUR").unwrap(),
            Money {
                amount: decimal("123.45"),
                currency: Currency::Eur,
            },
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Xa").is_err());
        assert!(Money::from_str("123.45Francs").is_err());

        assert!(Money::from_str("123.00XAF").is_ok());
        assert!(Money::from_str("123.0XAF").is_ok());
        assert!(Money::from_str("123XAF").is_ok());
    }

    #[test]
    fn to_string() {
        assert_eq!(
            Money {
                amount: decimal("123.45"),
                currency: Currency::Usd,
            }
            .to_string(),
            "123.45USD",
        );

        assert_eq!(
            Money {
                amount: decimal("25000000"),
                currency: Currency::Xaf,
            }
            .to_string(),
            "25000000XAF",
        );

        assert_eq!(
            Money {
                amount: decimal("123.00"),
                currency: Currency::Eur,
            }
            .to_string(),
            "123EUR",
        );
    }
}
