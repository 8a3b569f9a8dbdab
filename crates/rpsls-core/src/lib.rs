#![deny(warnings)]
pub mod game;
pub mod model;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "rpsls"
    }

    pub const fn codename() -> &'static str {
        "Rock Paper Scissors Lizard Spock"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "rpsls");
        assert_eq!(AppInfo::codename(), "Rock Paper Scissors Lizard Spock");
        assert!(!AppInfo::version().is_empty());
    }
}
