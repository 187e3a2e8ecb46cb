use std::fmt;

const DEV_ORIGIN: &str = "http://localhost:8085";
const PROD_ORIGIN: &str = "https://scraper-tcm-ba-api.duduserver.work";

/// Backend the binary was built against
///
/// Chosen by the `dev-backend` cargo feature; there is no runtime override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    /// The environment selected at build time
    pub const fn current() -> Self {
        if cfg!(feature = "dev-backend") {
            Self::Dev
        } else {
            Self::Prod
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Dev => DEV_ORIGIN,
            Self::Prod => PROD_ORIGIN,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
