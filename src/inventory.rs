use crate::types::{DEFAULT_SSH_PORT, Host};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub group_name: String,
    #[serde(default)]
    pub hosts: Vec<Host>,
}

impl Inventory {
    pub fn new(group_name: &str) -> Self {
        Self {
            group_name: group_name.to_string(),
            hosts: Vec::new(),
        }
    }

    /// 以简写形式添加主机: "hostname" 或 "hostname:port"
    ///
    /// 带端口时主机名保留完整的原始字符串（包括 ":port"），端口解析失败则回退到 22。
    /// 出现两个及以上冒号时整个字符串原样作为主机名和地址。
    pub fn add_shorthand(mut self, shorthand: &str) -> Self {
        self.hosts.push(parse_shorthand(shorthand));
        self
    }

    pub fn add_host(mut self, host: Host) -> Self {
        self.hosts.push(host);
        self
    }

    /// 每台主机一行，换行分隔，没有结尾换行
    pub fn content(&self) -> String {
        self.hosts
            .iter()
            .map(|host| {
                format!(
                    "{} ansible_host={} ansible_port={} ansible_user={}",
                    host.name, host.address, host.port, host.user
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 写入临时 inventory 文件的完整内容（带组名头）
    pub fn to_file_contents(&self) -> String {
        format!("[{}]\n{}", self.group_name, self.content())
    }
}

fn parse_shorthand(shorthand: &str) -> Host {
    let parts: Vec<&str> = shorthand.split(':').collect();
    match parts.as_slice() {
        [address, port] => {
            let port = port.parse::<i32>().unwrap_or(DEFAULT_SSH_PORT);
            Host::new(shorthand, address).with_port(port)
        }
        _ => Host::new(shorthand, shorthand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthand_without_port() {
        let inventory = Inventory::new("myhosts").add_shorthand("localhost");
        let host = &inventory.hosts[0];

        assert_eq!(host.name, "localhost");
        assert_eq!(host.address, "localhost");
        assert_eq!(host.port, 22);
        assert_eq!(host.user, "root");
        assert_eq!(
            inventory.content(),
            "localhost ansible_host=localhost ansible_port=22 ansible_user=root"
        );
    }

    #[test]
    fn test_shorthand_with_port_keeps_full_name() {
        let inventory = Inventory::new("myhosts").add_shorthand("localhost:12345");
        let host = &inventory.hosts[0];

        assert_eq!(host.name, "localhost:12345");
        assert_eq!(host.address, "localhost");
        assert_eq!(host.port, 12345);
        assert_eq!(
            inventory.content(),
            "localhost:12345 ansible_host=localhost ansible_port=12345 ansible_user=root"
        );

        // 任何能解析为整数的端口都原样保留
        for (shorthand, port) in [("localhost:70000", 70000), ("localhost:-1", -1), ("localhost:0", 0)] {
            let inventory = Inventory::new("myhosts").add_shorthand(shorthand);
            let host = &inventory.hosts[0];
            assert_eq!(host.name, shorthand);
            assert_eq!(host.address, "localhost");
            assert_eq!(host.port, port, "shorthand: {}", shorthand);
            assert!(inventory.content().contains(&format!("ansible_port={}", port)));
        }
    }

    #[test]
    fn test_shorthand_with_invalid_port() {
        for shorthand in ["localhost:invalid", "localhost:", "localhost:99999999999", "localhost:8o"] {
            let inventory = Inventory::new("myhosts").add_shorthand(shorthand);
            let host = &inventory.hosts[0];
            assert_eq!(host.address, "localhost", "shorthand: {}", shorthand);
            assert_eq!(host.port, 22, "shorthand: {}", shorthand);
            assert_eq!(host.name, shorthand);
        }
    }

    #[test]
    fn test_shorthand_with_multiple_colons() {
        for shorthand in ["localhost:22:extra", "fe80::1", "a:b:c:d"] {
            let inventory = Inventory::new("myhosts").add_shorthand(shorthand);
            let host = &inventory.hosts[0];
            assert_eq!(host.name, shorthand);
            assert_eq!(host.address, shorthand);
            assert_eq!(host.port, 22);
        }

        let inventory = Inventory::new("myhosts").add_shorthand("localhost:22:extra");
        assert_eq!(
            inventory.content(),
            "localhost:22:extra ansible_host=localhost:22:extra ansible_port=22 ansible_user=root"
        );
    }

    #[test]
    fn test_add_host_with_explicit_fields() {
        let inventory = Inventory::new("myhosts").add_host(
            Host::new("host1", "192.168.1.10")
                .with_port(2222)
                .with_user("myuser"),
        );

        assert_eq!(
            inventory.content(),
            "host1 ansible_host=192.168.1.10 ansible_port=2222 ansible_user=myuser"
        );
    }

    #[test]
    fn test_add_host_defaults() {
        let inventory = Inventory::new("myhosts").add_host(Host::new("host1", "192.168.1.10"));
        assert_eq!(
            inventory.content(),
            "host1 ansible_host=192.168.1.10 ansible_port=22 ansible_user=root"
        );
    }

    #[test]
    fn test_empty_inventory() {
        let inventory = Inventory::new("myhosts");
        assert_eq!(inventory.content(), "");
        assert_eq!(inventory.to_file_contents(), "[myhosts]\n");
    }

    #[test]
    fn test_multiple_hosts_keep_insertion_order() {
        let inventory = Inventory::new("myhosts")
            .add_shorthand("localhost")
            .add_host(
                Host::new("host1", "192.168.1.10")
                    .with_port(2222)
                    .with_user("myuser"),
            )
            .add_shorthand("localhost");

        let content = inventory.content();
        let lines: Vec<&str> = content.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "localhost ansible_host=localhost ansible_port=22 ansible_user=root");
        assert_eq!(lines[1], "host1 ansible_host=192.168.1.10 ansible_port=2222 ansible_user=myuser");
        assert_eq!(lines[2], lines[0]);
        assert!(!content.ends_with('\n'));
    }

    #[test]
    fn test_file_contents_has_group_header() {
        let inventory = Inventory::new("webservers").add_shorthand("web1:2200");
        assert_eq!(
            inventory.to_file_contents(),
            "[webservers]\nweb1:2200 ansible_host=web1 ansible_port=2200 ansible_user=root"
        );
    }
}
