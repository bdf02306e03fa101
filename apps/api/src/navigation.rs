use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The screens a visitor can be on. Serialized as their path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Auth,
    Profile,
    Payment,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Landing, Route::Auth, Route::Profile, Route::Payment];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Auth => "/auth",
            Route::Profile => "/profile",
            Route::Payment => "/payment",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = match s.trim().trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Route::ALL
            .into_iter()
            .find(|r| r.path() == path)
            .ok_or_else(|| format!("Unknown route '{s}'"))
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

impl<'de> Deserialize<'de> for Route {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Route transitions requested by controllers (e.g. the session gate's redirect).
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths() {
        assert_eq!("/profile".parse::<Route>().unwrap(), Route::Profile);
        assert_eq!("/payment/".parse::<Route>().unwrap(), Route::Payment);
        assert_eq!("/".parse::<Route>().unwrap(), Route::Landing);
        assert!("/admin".parse::<Route>().is_err());
    }

    #[test]
    fn test_serde_uses_path() {
        assert_eq!(serde_json::to_string(&Route::Auth).unwrap(), "\"/auth\"");
        let r: Route = serde_json::from_str("\"/payment\"").unwrap();
        assert_eq!(r, Route::Payment);
    }
}
