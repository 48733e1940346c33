use std::{fmt::Display, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The wiki writes this word instead of channel values for the "none" map colour.
pub const TRANSPARENT: &str = "transparent";

/// Channels are expected in `0..=255` but are taken from the wiki as written.
pub type Channel = i64;

pub const OPAQUE: Channel = 255;

/// A map colour as listed on the wiki.
/// Serialized as `[r, g, b, a]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(into = "[Channel; 4]", from = "[Channel; 4]")]
pub struct Colour {
    pub r: Channel,
    pub g: Channel,
    pub b: Channel,
    pub a: Channel,
}

impl Colour {
    pub const fn rgb(r: Channel, g: Channel, b: Channel) -> Self {
        Self::rgba(r, g, b, OPAQUE)
    }

    pub const fn rgba(r: Channel, g: Channel, b: Channel, a: Channel) -> Self {
        Self { r, g, b, a }
    }

    /// Euclidean distance in RGB space.  Alpha is ignored.
    pub fn distance(&self, other: &Colour) -> f64 {
        let d = |x: Channel, y: Channel| x as f64 - y as f64;
        let (dr, dg, db) = (d(self.r, other.r), d(self.g, other.g), d(self.b, other.b));
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

#[derive(PartialEq, Eq, Debug, Error)]
pub enum ColourParseError {
    #[error("Expected at least 3 channels, found {0}")]
    NotEnoughChannels(usize),
    #[error("Channel {index} cannot be parsed as an integer: {token:?}: {source}")]
    InvalidChannel {
        index: usize,
        token: String,
        source: ParseIntError,
    },
}

impl FromStr for Colour {
    type Err = ColourParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Alpha stays opaque here; this matches what the wiki data has always produced.
        if s.trim().eq_ignore_ascii_case(TRANSPARENT) {
            return Ok(Colour::rgb(0, 0, 0));
        }
        let channels = s
            .split(',')
            .map(str::trim)
            .enumerate()
            .map(|(index, token)| {
                token
                    .parse::<Channel>()
                    .map_err(|source| ColourParseError::InvalidChannel {
                        index,
                        token: token.to_owned(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        // Anything past the fourth channel is ignored.
        match channels[..] {
            [r, g, b] => Ok(Colour::rgb(r, g, b)),
            [r, g, b, a, ..] => Ok(Colour::rgba(r, g, b, a)),
            _ => Err(ColourParseError::NotEnoughChannels(channels.len())),
        }
    }
}

impl Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}, {}", self.r, self.g, self.b, self.a)
    }
}

impl From<[Channel; 4]> for Colour {
    fn from([r, g, b, a]: [Channel; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Colour> for [Channel; 4] {
    fn from(c: Colour) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

#[cfg(test)]
mod tests {
    use super::{Channel, Colour, ColourParseError};

    #[test]
    fn three_channels_are_opaque() {
        for (s, expected) in [
            ("0,0,0", Colour::rgba(0, 0, 0, 255)),
            ("127, 178, 56", Colour::rgba(127, 178, 56, 255)),
            ("  255 ,  255,255 ", Colour::rgba(255, 255, 255, 255)),
        ] {
            assert_eq!(s.parse::<Colour>().unwrap(), expected, "{s:?}");
        }
    }

    #[test]
    fn four_channels_keep_alpha() {
        let c: Colour = "255, 255, 255, 128".parse().unwrap();
        assert_eq!(c, Colour::rgba(255, 255, 255, 128));
        let c: Colour = "1,2,3,0".parse().unwrap();
        assert_eq!(c, Colour::rgba(1, 2, 3, 0));
    }

    #[test]
    fn extra_channels_are_ignored() {
        let c: Colour = "1, 2, 3, 4, 5".parse().unwrap();
        assert_eq!(c, Colour::rgba(1, 2, 3, 4));
        assert!("1, 2, 3, 4, x".parse::<Colour>().is_err());
    }

    #[test]
    fn transparent_is_opaque_black() {
        for s in ["transparent", "Transparent", "  TRANSPARENT \n"] {
            assert_eq!(s.parse::<Colour>().unwrap(), Colour::rgba(0, 0, 0, 255));
        }
    }

    #[test]
    fn too_few_channels() {
        assert_eq!(
            "1, 2".parse::<Colour>(),
            Err(ColourParseError::NotEnoughChannels(2))
        );
        assert_eq!(
            "7".parse::<Colour>(),
            Err(ColourParseError::NotEnoughChannels(1))
        );
    }

    #[test]
    fn non_integer_channel() {
        for s in ["1, two, 3", "1.5, 2, 3", "", "1, 2, 3, ", "#ffffff"] {
            match s.parse::<Colour>() {
                Err(ColourParseError::InvalidChannel { .. }) => {}
                res => panic!("{s:?} was parsed as {res:?}"),
            }
        }
        match "1, 2, 0x10".parse::<Colour>() {
            Err(ColourParseError::InvalidChannel { index, token, .. }) => {
                assert_eq!((index, token.as_str()), (2, "0x10"));
            }
            res => panic!("{res:?}"),
        }
    }

    #[test]
    fn out_of_range_channels_pass_through() {
        let c: Colour = "256, 0, -1".parse().unwrap();
        assert_eq!(c, Colour::rgba(256, 0, -1, 255));
        assert_eq!(serde_json::to_string(&c).unwrap(), "[256,0,-1,255]");
        let c: Colour = "1000, 2, 3, -20".parse().unwrap();
        assert_eq!(c, Colour::rgba(1000, 2, 3, -20));
    }

    #[test]
    fn display_and_arrays() {
        let c = Colour::rgba(10, 20, 30, 40);
        assert_eq!(c.to_string(), "10, 20, 30, 40");
        assert_eq!(<[Channel; 4]>::from(c), [10, 20, 30, 40]);
        assert_eq!(Colour::from([10, 20, 30, 40]), c);
        assert_eq!(serde_json::to_string(&c).unwrap(), "[10,20,30,40]");
    }

    #[test]
    fn distance_ignores_alpha() {
        let a = Colour::rgba(0, 0, 0, 0);
        let b = Colour::rgba(3, 4, 0, 255);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&b), 0.0);
    }
}
