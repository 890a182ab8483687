use std::net::SocketAddr;
use std::{fs, path::PathBuf};

/// # Errors
///
/// Will return `Err` if the file is not readable
pub fn check_readable_file(file: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The config file '{file}' is not readable."));
    }
    Ok(path)
}

/// # Errors
///
/// Will return `Err` if the value is not a `host:port` socket address
pub fn check_bind_addr(value: &str) -> Result<String, String> {
    value
        .parse::<SocketAddr>()
        .map(|_| value.to_string())
        .map_err(|e| format!("'{value}' is not a valid bind address: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_checks() {
        assert!(check_bind_addr("127.0.0.1:8081").is_ok());
        assert!(check_bind_addr("localhost").is_err());
    }

    #[test]
    fn missing_file_is_rejected() {
        assert!(check_readable_file("/definitely/not/here.toml").is_err());
    }
}
