// SPDX-License-Identifier: MIT

//! Network predicates

use crate::exp::ast::{Expression, Predicate};
use ipnet::IpNet;

/// Value is an IP address inside `cidr`. A value that is not an IP address,
/// or is of the other address family, makes the predicate false. An
/// IPv4-mapped IPv6 value such as `::ffff:10.0.0.1` counts as IPv4.
///
/// ```
/// use exp_rs::exp::{catalog::network::contains_ip, Map};
///
/// let m = Map::from([
///     ("ip1".to_string(), "192.168.1.1".to_string()),
///     ("ip2".to_string(), "192.168.32.128".to_string()),
/// ]);
/// let cidr = "192.168.1.0/24".parse().unwrap();
/// assert!(contains_ip("ip1", cidr).eval(&m));
/// assert!(!contains_ip("ip2", cidr).eval(&m));
/// ```
pub fn contains_ip(key: impl Into<String>, cidr: IpNet) -> Expression {
    Expression::compare(key, Predicate::InNet(cidr))
}
