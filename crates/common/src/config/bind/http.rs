use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

/// HTTP 服务绑定配置
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpBindConfig {
    /// 域名
    ///
    /// 用于生成对外展示的 URL。
    #[serde(default = "default_domain_name")]
    pub domain_name: String,

    /// 绑定 IP 地址
    ///
    /// 服务实际绑定的网络接口 IP 地址，通常使用 "0.0.0.0" 监听所有接口。
    #[serde(default = "default_ip")]
    pub ip: String,

    /// 绑定端口
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for HttpBindConfig {
    fn default() -> Self {
        Self {
            domain_name: default_domain_name(),
            ip: default_ip(),
            port: default_port(),
        }
    }
}

fn default_domain_name() -> String {
    "localhost".to_string()
}

fn default_ip() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl HttpBindConfig {
    /// 解析监听地址
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let ip: IpAddr = self.ip.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// 对外访问的基础 URL
    ///
    /// `bound_port` 为实际监听的端口（配置端口为 0 时由系统分配）。
    pub fn public_url(&self, bound_port: u16) -> String {
        format!("http://{}:{}", self.domain_name, bound_port)
    }
}
