use std::{
    collections::BTreeSet,
    net::{IpAddr, Ipv4Addr},
};

/// Interface name fragments that indicate container/virtual interfaces.
const VIRTUAL_INTERFACE_MARKERS: &[&str] = &["docker", "veth", "loopback"];

/// List deduplicated private-range IPv4 addresses of this machine, for
/// operator display only.
///
/// Enumeration failures degrade: first to a single-address lookup through
/// the local routing table, then to an empty list. Never an error.
pub fn lan_addresses() -> Vec<Ipv4Addr> {
    match if_addrs::get_if_addrs() {
        Ok(interfaces) => {
            let addresses: BTreeSet<Ipv4Addr> = interfaces
                .into_iter()
                .filter(|iface| !is_virtual_interface(&iface.name))
                .filter_map(|iface| match iface.addr.ip() {
                    IpAddr::V4(ip) => Some(ip),
                    IpAddr::V6(_) => None,
                })
                .filter(|ip| is_lan_address(*ip))
                .collect();
            addresses.into_iter().collect()
        }
        Err(e) => {
            tracing::warn!("interface enumeration failed, falling back to address lookup: {}", e);
            fallback_addresses()
        }
    }
}

fn fallback_addresses() -> Vec<Ipv4Addr> {
    match local_ip_address::local_ip() {
        Ok(IpAddr::V4(ip)) if is_lan_address(ip) => vec![ip],
        Ok(_) => Vec::new(),
        Err(e) => {
            tracing::warn!("local address lookup failed: {}", e);
            Vec::new()
        }
    }
}

/// True for the RFC 1918 private blocks (10/8, 172.16/12, 192.168/16),
/// which is exactly what `Ipv4Addr::is_private` covers.
pub fn is_lan_address(ip: Ipv4Addr) -> bool {
    !ip.is_loopback() && ip.is_private()
}

fn is_virtual_interface(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    VIRTUAL_INTERFACE_MARKERS
        .iter()
        .any(|marker| name.contains(marker))
}
