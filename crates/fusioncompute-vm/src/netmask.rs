//! Subnet mask normalisation for clone customization.

use fusioncompute_core::{Error, Result};
use std::net::Ipv4Addr;

/// Longest IPv4 prefix.
pub const MAX_PREFIX_LEN: u32 = 32;

/// Convert a CIDR prefix length into a dotted-decimal subnet mask.
///
/// ```
/// use fusioncompute_vm::netmask::prefix_to_netmask;
///
/// assert_eq!(prefix_to_netmask(24).unwrap(), "255.255.255.0");
/// assert_eq!(prefix_to_netmask(0).unwrap(), "0.0.0.0");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when `prefix` is greater than 32.
pub fn prefix_to_netmask(prefix: u32) -> Result<String> {
    if prefix > MAX_PREFIX_LEN {
        return Err(Error::InvalidInput(format!(
            "netmask prefix length {prefix} is outside 0..={MAX_PREFIX_LEN}"
        )));
    }

    // `checked_shl(32)` is None, which is the all-zero mask.
    let bits = u32::MAX
        .checked_shl(MAX_PREFIX_LEN - prefix)
        .unwrap_or(0);
    Ok(Ipv4Addr::from(bits).to_string())
}

/// Normalise a NIC netmask field to dotted decimal.
///
/// Values containing `.` are returned unchanged. Anything else must be a decimal
/// prefix length.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when the value is neither dotted decimal nor a
/// prefix length in `0..=32`.
pub fn normalize_netmask(value: &str) -> Result<String> {
    if value.contains('.') {
        return Ok(value.to_string());
    }

    let prefix = value.parse::<u32>().map_err(|err| {
        Error::InvalidInput(format!("can not parse netmask `{value}`: {err}"))
    })?;
    prefix_to_netmask(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_prefixes() {
        assert_eq!(prefix_to_netmask(0).unwrap(), "0.0.0.0");
        assert_eq!(prefix_to_netmask(1).unwrap(), "128.0.0.0");
        assert_eq!(prefix_to_netmask(8).unwrap(), "255.0.0.0");
        assert_eq!(prefix_to_netmask(16).unwrap(), "255.255.0.0");
        assert_eq!(prefix_to_netmask(20).unwrap(), "255.255.240.0");
        assert_eq!(prefix_to_netmask(24).unwrap(), "255.255.255.0");
        assert_eq!(prefix_to_netmask(30).unwrap(), "255.255.255.252");
        assert_eq!(prefix_to_netmask(32).unwrap(), "255.255.255.255");
    }

    #[test]
    fn every_prefix_has_that_many_leading_ones() {
        for prefix in 0..=MAX_PREFIX_LEN {
            let mask: Ipv4Addr = prefix_to_netmask(prefix).unwrap().parse().unwrap();
            let bits = u32::from(mask);
            assert_eq!(bits.leading_ones(), prefix, "prefix {prefix}");
            assert_eq!(bits.count_ones(), prefix, "prefix {prefix} is not contiguous");
        }
    }

    #[test]
    fn conversion_is_deterministic() {
        for prefix in 0..=MAX_PREFIX_LEN {
            assert_eq!(prefix_to_netmask(prefix), prefix_to_netmask(prefix));
        }
    }

    #[test]
    fn rejects_out_of_range_prefix() {
        for prefix in [33, 64, u32::MAX] {
            let err = prefix_to_netmask(prefix).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "prefix {prefix}");
        }
    }

    #[test]
    fn normalize_keeps_dotted_values() {
        assert_eq!(normalize_netmask("255.255.0.0").unwrap(), "255.255.0.0");
        // Dotted values pass through untouched, even odd ones.
        assert_eq!(normalize_netmask("255.255.255.1").unwrap(), "255.255.255.1");
    }

    #[test]
    fn normalize_converts_prefix() {
        assert_eq!(normalize_netmask("24").unwrap(), "255.255.255.0");
        assert_eq!(normalize_netmask("0").unwrap(), "0.0.0.0");
    }

    #[test]
    fn normalize_rejects_garbage() {
        for value in ["", "abc", "-1", "24/", " 24", "33"] {
            let err = normalize_netmask(value).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "value {value:?}");
        }
    }
}
