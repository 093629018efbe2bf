use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr, SerializeDisplay)]
pub struct Version(pub bitcoin::block::Version);

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let n = u32::from_str_radix(s, 16).map_err(|e| Error::Parse {
            message: format!("invalid version hex string '{s}': {e}"),
        })?;
        // The as conversion matches Bitcoin's behaviour
        Ok(Self(bitcoin::block::Version::from_consensus(n as i32)))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0.to_consensus())
    }
}

impl From<bitcoin::block::Version> for Version {
    fn from(v: bitcoin::block::Version) -> Self {
        Self(v)
    }
}

impl From<Version> for bitcoin::block::Version {
    fn from(v: Version) -> Self {
        v.0
    }
}

impl From<i32> for Version {
    fn from(value: i32) -> Self {
        Self(bitcoin::block::Version::from_consensus(value))
    }
}
