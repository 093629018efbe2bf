use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr, SerializeDisplay)]
pub struct Ntime(u32);

impl FromStr for Ntime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let time = u32::from_str_radix(s, 16).map_err(|e| Error::Parse {
            message: format!("invalid ntime hex string '{s}': {e}"),
        })?;
        Ok(Ntime(time))
    }
}

impl fmt::Display for Ntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl From<Ntime> for u32 {
    fn from(n: Ntime) -> u32 {
        n.0
    }
}

impl From<u32> for Ntime {
    fn from(n: u32) -> Ntime {
        Ntime(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_seconds_roundtrip() {
        let ntime = Ntime::from(1234567890);
        assert_eq!(ntime.to_string(), "499602d2");
        assert_eq!("499602d2".parse::<Ntime>().unwrap(), ntime);
        assert_eq!(u32::from(ntime), 1234567890);
    }

    #[test]
    fn parse_errors() {
        assert!("".parse::<Ntime>().is_err());
        assert!("499602d2ff".parse::<Ntime>().is_err());
    }
}
